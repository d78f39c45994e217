//! Dataset profiling.
//!
//! This module computes the per-column summaries consumed by the quality
//! analyzer, plus a descriptive overview of the dataset:
//! - Descriptive statistics for numeric columns (mean, std, quartiles, skewness)
//! - Frequency statistics for categorical columns (mode, cardinality, entropy)
//! - Missing-value table and duplicate-row count
//! - Strong pairwise correlations

mod correlation;
mod statistics;

use crate::dataset::{Column, ColumnValues, Dataset};
use crate::types::{ColumnStats, ColumnSummary, DatasetProfile, MissingColumn};
use crate::utils::percentage;
use tracing::debug;

pub use correlation::CorrelationMatrix;

/// Computes summaries and profiles for datasets.
pub struct DataProfiler;

impl DataProfiler {
    /// Summarize every column, in dataset order.
    pub fn summarize(dataset: &Dataset) -> Vec<ColumnSummary> {
        dataset.columns().iter().map(Self::summarize_column).collect()
    }

    /// Summarize a single column.
    pub fn summarize_column(column: &Column) -> ColumnSummary {
        let stats = match column.values() {
            ColumnValues::Numeric(values) => ColumnStats::Numeric(statistics::numeric_stats(values)),
            ColumnValues::Categorical(values) => {
                ColumnStats::Categorical(statistics::categorical_stats(values))
            }
        };

        ColumnSummary {
            name: column.name().to_string(),
            missing_count: column.missing_count(),
            stats,
        }
    }

    /// Profile a dataset: shape, missing and duplicate totals, summaries and
    /// correlations above `correlation_threshold`.
    pub fn profile(dataset: &Dataset, correlation_threshold: f64) -> DatasetProfile {
        let summaries = Self::summarize(dataset);

        let mut missing_by_column: Vec<MissingColumn> = summaries
            .iter()
            .filter(|s| s.missing_count > 0)
            .map(|s| MissingColumn {
                column: s.name.clone(),
                missing_count: s.missing_count,
                missing_percentage: percentage(s.missing_count, dataset.n_rows()),
            })
            .collect();
        // stable sort keeps dataset order among equal counts
        missing_by_column.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));

        let strong_correlations =
            CorrelationMatrix::compute(dataset).strong_pairs(correlation_threshold);

        let profile = DatasetProfile {
            shape: dataset.shape(),
            missing_cells: dataset.missing_cells(),
            duplicate_rows: dataset.duplicate_row_count(),
            numeric_columns: dataset.numeric_columns().count(),
            categorical_columns: dataset.categorical_columns().count(),
            temporal_columns: dataset.temporal_columns().count(),
            missing_by_column,
            summaries,
            strong_correlations,
        };

        debug!(
            rows = profile.shape.0,
            columns = profile.shape.1,
            missing = profile.missing_cells,
            duplicates = profile.duplicate_rows,
            "Dataset profiled"
        );

        profile
    }
}
