//! Conversion from polars DataFrames into [`Dataset`]s.

use crate::dataset::{Column, Dataset};
use crate::error::{ProfilerError, Result, ResultExt};
use crate::utils::{DtypeCategory, get_dtype_category, is_missing_marker};
use polars::prelude::{Column as FrameColumn, DataFrame, DataType};
use tracing::debug;

/// How DataFrame columns are turned into dataset columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOptions {
    /// Treat strings such as "N/A", "null" or "missing" as missing values.
    pub error_markers_as_missing: bool,
}

impl FrameOptions {
    pub fn with_error_markers_as_missing(mut self, enabled: bool) -> Self {
        self.error_markers_as_missing = enabled;
        self
    }
}

impl Dataset {
    /// Build a dataset from a DataFrame.
    ///
    /// Integer and float columns become numeric; string, categorical, boolean
    /// and temporal columns become categorical through their string rendering.
    /// Nested and binary columns are rejected.
    pub fn from_dataframe(df: &DataFrame, options: FrameOptions) -> Result<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| convert_column(col, options))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            rows = df.height(),
            columns = df.width(),
            "Converted DataFrame to dataset"
        );

        Dataset::new(columns)
    }
}

impl TryFrom<&DataFrame> for Dataset {
    type Error = ProfilerError;

    fn try_from(df: &DataFrame) -> Result<Self> {
        Dataset::from_dataframe(df, FrameOptions::default())
    }
}

fn convert_column(col: &FrameColumn, options: FrameOptions) -> Result<Column> {
    let name = col.name().as_str();
    let dtype = col.dtype();

    if matches!(dtype, DataType::Null) {
        return Ok(Column::categorical(name, vec![None::<String>; col.len()]));
    }

    let series = col.as_materialized_series();
    match get_dtype_category(dtype) {
        DtypeCategory::Numeric => {
            let floats = series
                .cast(&DataType::Float64)
                .context(format!("Failed to cast column '{}' to f64", name))?;
            let values = floats.f64()?.into_iter().collect::<Vec<_>>();
            Ok(Column::numeric(name, values))
        }
        category @ (DtypeCategory::String | DtypeCategory::Boolean | DtypeCategory::Datetime) => {
            let strings = series
                .cast(&DataType::String)
                .context(format!("Failed to render column '{}' as strings", name))?;
            let values = strings
                .str()?
                .into_iter()
                .map(|v| match v {
                    Some(s) if options.error_markers_as_missing && is_missing_marker(s) => None,
                    other => other.map(str::to_string),
                })
                .collect::<Vec<_>>();
            let temporal = category == DtypeCategory::Datetime;
            Ok(Column::categorical(name, values).with_temporal(temporal))
        }
        DtypeCategory::Other => Err(ProfilerError::unsupported_column(
            name,
            format!("data type {} is neither numeric nor categorical", dtype),
        )),
    }
}
