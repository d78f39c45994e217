//! Reading tabular files into DataFrames.

use crate::error::{ProfilerError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::{CsvParseOptions, DataFrame, ParquetReader, SerReader};
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const INFER_SCHEMA_ROWS: usize = 100;

/// Load a CSV or Parquet file, choosing the reader by extension.
pub fn load_dataframe(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        "csv" => load_csv_with_fallbacks(path)?,
        "parquet" => load_parquet(path)?,
        "xls" | "xlsx" => {
            return Err(ProfilerError::UnsupportedFormat(format!(
                "{}: Excel workbooks are not supported, export the sheet to CSV",
                path.display()
            )));
        }
        other => {
            return Err(ProfilerError::UnsupportedFormat(format!(
                "{}: unknown extension '{}'",
                path.display(),
                other
            )));
        }
    };

    info!(
        rows = df.height(),
        columns = df.width(),
        "Loaded {}",
        path.display()
    );
    Ok(df)
}

/// Load a CSV, retrying with relaxed settings and finally with pre-cleaned content.
fn load_csv_with_fallbacks(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ProfilerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )));
    }

    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("Standard CSV loading failed: {}", e),
    }

    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => debug!("CSV loading without quote handling failed: {}", e),
    }

    warn!("Falling back to cleaned CSV content for {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(ProfilerError::from)
        .context(format!("Failed to read {}", path.display()))?;

    CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(clean_csv_content(&content)))
        .finish()
        .context(format!("Failed to parse {}", path.display()))
}

fn load_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    ParquetReader::new(file)
        .finish()
        .context(format!("Failed to read parquet file {}", path.display()))
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
