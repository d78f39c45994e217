use crate::error::Result;
use crate::types::{ColumnSummary, DatasetProfile, MissingColumn, QualityReport, StrongCorrelation};
use crate::utils::percentage;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Profile Report Types
// ============================================================================

/// Profile and quality assessment of one input, as written by `--json` and
/// `--emit-report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    // Metadata
    /// Local time the report was generated
    pub generated_at: String,
    /// Path of the profiled file
    pub input_file: String,

    /// Shape and headline counts
    pub dataset_profile: DatasetProfileSummary,
    /// Columns with missing values, most missing first
    pub missing_by_column: Vec<MissingColumn>,
    pub column_summaries: Vec<ColumnSummary>,
    pub strong_correlations: Vec<StrongCorrelation>,

    /// Score, tier, issues and insights
    pub quality: QualityReport,
}

/// Headline counts of the profiled dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfileSummary {
    pub rows: usize,
    pub columns: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    #[serde(default)]
    pub temporal_columns: usize,
    pub missing_cells: usize,
    pub missing_percentage: f64,
    pub duplicate_rows: usize,
    pub duplicate_percentage: f64,
}

impl From<&DatasetProfile> for DatasetProfileSummary {
    fn from(profile: &DatasetProfile) -> Self {
        let (rows, columns) = profile.shape;
        Self {
            rows,
            columns,
            numeric_columns: profile.numeric_columns,
            categorical_columns: profile.categorical_columns,
            temporal_columns: profile.temporal_columns,
            missing_cells: profile.missing_cells,
            missing_percentage: percentage(profile.missing_cells, rows * columns),
            duplicate_rows: profile.duplicate_rows,
            duplicate_percentage: percentage(profile.duplicate_rows, rows),
        }
    }
}

// ============================================================================
// Report Generator
// ============================================================================

/// Builds profile reports and writes them under an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Combine a dataset profile and its quality report into one document.
    pub fn build_report(
        input_file: &str,
        profile: &DatasetProfile,
        quality: &QualityReport,
    ) -> ProfileReport {
        ProfileReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            dataset_profile: DatasetProfileSummary::from(profile),
            missing_by_column: profile.missing_by_column.clone(),
            column_summaries: profile.summaries.clone(),
            strong_correlations: profile.strong_correlations.clone(),
            quality: quality.clone(),
        }
    }

    /// Write a report as pretty JSON to `<output_dir>/<base_name>_profile.json`.
    pub fn write_report_to_file(&self, report: &ProfileReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_profile.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, Dataset};
    use crate::profiler::DataProfiler;
    use crate::quality::QualityAnalyzer;
    use tempfile::TempDir;

    fn sample_report() -> ProfileReport {
        let ds = Dataset::new(vec![
            Column::numeric("x", [Some(1.0), None, Some(3.0), Some(4.0)]),
            Column::categorical("c", [Some("a"), Some("b"), Some("a"), Some("b")]),
        ])
        .unwrap();
        let profile = DataProfiler::profile(&ds, 0.7);
        let quality = QualityAnalyzer::default().analyze(&ds, &profile.summaries).unwrap();
        ReportGenerator::build_report("data/sample.csv", &profile, &quality)
    }

    #[test]
    fn test_build_report() {
        let report = sample_report();

        assert_eq!(report.input_file, "data/sample.csv");
        assert_eq!(report.dataset_profile.rows, 4);
        assert_eq!(report.dataset_profile.columns, 2);
        assert_eq!(report.dataset_profile.missing_percentage, 12.5);
        assert_eq!(report.column_summaries.len(), 2);
        assert_eq!(report.missing_by_column[0].column, "x");
        assert_eq!(report.quality.missing_cells, 1);
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = TempDir::new().unwrap();
        let generator = ReportGenerator::new(dir.path().join("reports"));
        let report = sample_report();

        let path = generator.write_report_to_file(&report, "sample").unwrap();
        assert!(path.ends_with("reports/sample_profile.json"));

        let written: ProfileReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.input_file, report.input_file);
        assert_eq!(written.dataset_profile, report.dataset_profile);
        assert_eq!(written.quality.tier, report.quality.tier);
        assert_eq!(written.quality.issues, report.quality.issues);
    }
}
