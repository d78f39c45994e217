//! Dataset Profiling and Quality Scoring Library
//!
//! Profiles tabular datasets and rates their quality, built with Rust and Polars.
//!
//! # Overview
//!
//! - **Dataset Model**: Rectangular tables of numeric or categorical columns with explicit missing values
//! - **Profiling**: Descriptive statistics, value frequencies, missing-value table, correlations
//! - **Quality Analysis**: A 0-100 score from missing, duplicate and outlier penalties, a
//!   four-tier classification, issues with severities and recommendations
//! - **Loading**: CSV (with fallback strategies) and Parquet through polars
//! - **Reporting**: JSON reports combining profile and quality results
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use data_profiler::{Dataset, QualityAnalyzer, load_dataframe};
//!
//! let df = load_dataframe("data.csv")?;
//! let dataset = Dataset::try_from(&df)?;
//!
//! let report = QualityAnalyzer::default().analyze_dataset(&dataset)?;
//! println!("Score: {:.1} ({})", report.score, report.tier);
//! for issue in &report.issues {
//!     println!("  {}", issue);
//! }
//! ```
//!
//! Summaries computed elsewhere can be passed directly; they must match the
//! dataset column-for-column:
//!
//! ```rust,ignore
//! use data_profiler::{DataProfiler, QualityAnalyzer};
//!
//! let summaries = DataProfiler::summarize(&dataset);
//! let report = QualityAnalyzer::default().analyze(&dataset, &summaries)?;
//! ```
//!
//! # Configuration
//!
//! Use [`AnalyzerConfig`] to change weights and thresholds:
//!
//! ```rust,ignore
//! use data_profiler::{AnalyzerConfig, QualityAnalyzer};
//!
//! let config = AnalyzerConfig::builder()
//!     .missing_bands(2.0, 1.0, 10.0)     // free up to 2%, 1 point per percent up to 10%
//!     .missing_weight(1.5)               // 1.5 points per percent above 10%
//!     .tier_thresholds(90.0, 75.0, 50.0) // Excellent / Good / Acceptable lower bounds
//!     .correlation_threshold(0.8)
//!     .build()?;
//!
//! let analyzer = QualityAnalyzer::new(config)?;
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod frame;
pub mod loader;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, ConfigValidationError};
pub use dataset::{Column, ColumnKind, ColumnValues, Dataset};
pub use error::{ProfilerError, Result as ProfilerResult, ResultExt};
pub use frame::FrameOptions;
pub use loader::load_dataframe;
pub use profiler::{CorrelationMatrix, DataProfiler};
pub use quality::QualityAnalyzer;
pub use reporting::{DatasetProfileSummary, ProfileReport, ReportGenerator};
pub use types::{
    CategoricalStats, ColumnOutliers, ColumnStats, ColumnSummary, DatasetProfile, Insight,
    InsightKind, IssueKind, MissingColumn, NumericStats, PenaltyBreakdown, QualityIssue,
    QualityReport, QualityTier, Severity, StrongCorrelation,
};
pub use utils::{DtypeCategory, get_dtype_category, is_missing_marker, is_numeric_dtype};

static_assertions::assert_impl_all!(Dataset: Send, Sync);
static_assertions::assert_impl_all!(QualityReport: Send, Sync);
