//! Error types for dataset profiling and quality analysis.
//!
//! Errors are serializable as `{ code, message }` so a presentation layer can
//! show them without matching on variants.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the profiler.
#[derive(Error, Debug)]
pub enum ProfilerError {
    /// The dataset has no rows or no columns.
    #[error("Dataset is empty ({rows} rows x {columns} columns)")]
    EmptyDataset { rows: usize, columns: usize },

    /// Dataset and summaries (or the dataset itself) disagree.
    #[error("Inconsistent input: {0}")]
    InconsistentInput(String),

    /// A column summary lacks the statistics the analysis needs.
    #[error("Unsupported column type for '{column}': {reason}")]
    UnsupportedColumnType { column: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input file format cannot be loaded.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilerError>,
    },
}

impl ProfilerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for [`ProfilerError::UnsupportedColumnType`].
    pub fn unsupported_column(column: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfilerError::UnsupportedColumnType {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset { .. } => "EMPTY_DATASET",
            Self::InconsistentInput(_) => "INCONSISTENT_INPUT",
            Self::UnsupportedColumnType { .. } => "UNSUPPORTED_COLUMN_TYPE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the caller's input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::EmptyDataset { .. }
            | Self::InconsistentInput(_)
            | Self::UnsupportedColumnType { .. }
            | Self::InvalidConfig(_)
            | Self::UnsupportedFormat(_) => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

impl Serialize for ProfilerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiler operations.
pub type Result<T> = std::result::Result<T, ProfilerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilerError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ProfilerError::EmptyDataset { rows: 0, columns: 3 }.error_code(),
            "EMPTY_DATASET"
        );
        assert_eq!(
            ProfilerError::unsupported_column("age", "missing quartiles").error_code(),
            "UNSUPPORTED_COLUMN_TYPE"
        );
    }

    #[test]
    fn test_empty_dataset_message() {
        let error = ProfilerError::EmptyDataset { rows: 0, columns: 2 };
        assert_eq!(error.to_string(), "Dataset is empty (0 rows x 2 columns)");
    }

    #[test]
    fn test_is_input_error() {
        assert!(ProfilerError::InconsistentInput("x".to_string()).is_input_error());
        assert!(
            ProfilerError::InconsistentInput("x".to_string())
                .with_context("While analyzing")
                .is_input_error()
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!ProfilerError::Io(io).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = ProfilerError::unsupported_column("price", "no standard deviation");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("UNSUPPORTED_COLUMN_TYPE"));
        assert!(json.contains("price"));
    }

    #[test]
    fn test_with_context() {
        let error = ProfilerError::InconsistentInput("2 summaries for 3 columns".to_string())
            .with_context("During analysis");
        assert!(error.to_string().contains("During analysis"));
        assert_eq!(error.error_code(), "INCONSISTENT_INPUT");
    }
}
