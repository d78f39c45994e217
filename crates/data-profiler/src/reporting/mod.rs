//! Report generation.
//!
//! [`ProfileReport`] merges a dataset profile with its quality report into a
//! single document suitable for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use data_profiler::{DataProfiler, QualityAnalyzer, ReportGenerator};
//!
//! let profile = DataProfiler::profile(&dataset, 0.7);
//! let quality = QualityAnalyzer::default().analyze(&dataset, &profile.summaries)?;
//! let report = ReportGenerator::build_report("data/train.csv", &profile, &quality);
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to output/train_profile.json
//! ReportGenerator::new("output").write_report_to_file(&report, "train")?;
//! ```

mod generator;

pub use generator::{DatasetProfileSummary, ProfileReport, ReportGenerator};
