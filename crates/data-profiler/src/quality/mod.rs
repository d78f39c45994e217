//! Data quality analysis.
//!
//! Turns a dataset and its column summaries into a [`QualityReport`](crate::types::QualityReport):
//! - Weighted penalties for missing cells, duplicate rows, IQR outliers and
//!   all-missing columns, subtracted from 100
//! - A four-tier classification of the resulting score
//! - Issues with severities and recommendation insights

mod analyzer;
mod insights;
mod scoring;

pub use analyzer::QualityAnalyzer;
