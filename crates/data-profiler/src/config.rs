//! Configuration for the quality analyzer.
//!
//! Every threshold and weight used by scoring and issue detection lives here
//! and is injected into [`QualityAnalyzer`](crate::QualityAnalyzer) at
//! construction time.

use crate::error::ProfilerError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds and weights for quality scoring.
///
/// Use [`AnalyzerConfig::builder()`] to create a configuration with a fluent API,
/// or deserialize one from JSON (missing fields take their defaults).
///
/// # Example
///
/// ```rust,ignore
/// use data_profiler::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .missing_weight(1.0)
///     .correlation_threshold(0.8)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum score classified as Excellent.
    /// Default: 85.0
    pub excellent_threshold: f64,

    /// Minimum score classified as Good.
    /// Default: 70.0
    pub good_threshold: f64,

    /// Minimum score classified as Acceptable. Anything lower is Problems.
    /// Default: 50.0
    pub acceptable_threshold: f64,

    /// Missing-cell percentage up to which no missing penalty applies.
    /// Default: 5.0
    pub missing_grace_pct: f64,

    /// Points per percentage point of missing cells above the grace band.
    /// Default: 1.0
    pub missing_moderate_weight: f64,

    /// Missing-cell percentage above which `missing_weight` applies.
    /// Default: 10.0
    pub missing_steep_pct: f64,

    /// Points per percentage point of missing cells above `missing_steep_pct`.
    /// Default: 2.0
    pub missing_weight: f64,

    /// Duplicate-row percentage up to which no duplicate penalty applies.
    /// Default: 1.0
    pub duplicate_grace_pct: f64,

    /// Points per percentage point of duplicate rows above the grace band.
    /// Default: 2.0
    pub duplicate_moderate_weight: f64,

    /// Duplicate-row percentage above which `duplicate_weight` applies.
    /// Default: 5.0
    pub duplicate_steep_pct: f64,

    /// Points per percentage point of duplicate rows above `duplicate_steep_pct`.
    /// Default: 3.0
    pub duplicate_weight: f64,

    /// Points subtracted per percentage point of outlier numeric cells.
    /// Default: 1.5
    pub outlier_weight: f64,

    /// Flat points subtracted for each column that is entirely missing.
    /// Default: 10.0
    pub all_missing_penalty: f64,

    /// IQR multiplier `k` for the bounds `[Q1 - k*IQR, Q3 + k*IQR]`.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Numeric columns with fewer present values are not checked for outliers.
    /// Default: 4
    pub min_outlier_sample: usize,

    /// Outlier percentage above which a column's outliers are "significant".
    /// Default: 5.0
    pub significant_outlier_pct: f64,

    /// Missing percentage above which a missing-value issue is high severity.
    /// Default: 30.0
    pub high_missing_pct: f64,

    /// Missing percentage above which a missing-value issue is medium severity.
    /// Default: 10.0
    pub medium_missing_pct: f64,

    /// Duplicate-row percentage above which the duplicate issue is high severity.
    /// Default: 10.0
    pub high_duplicate_pct: f64,

    /// Missing percentage above which dropping the column is recommended
    /// instead of imputation.
    /// Default: 70.0
    pub drop_column_missing_pct: f64,

    /// Absolute Pearson correlation above which a pair is reported as strong.
    /// Default: 0.7
    pub correlation_threshold: f64,

    /// Absolute skewness above which a numeric column is reported as skewed.
    /// Default: 1.0
    pub skewness_threshold: f64,

    /// Share of the most frequent category above which a categorical column
    /// is reported as near-constant (0.0 - 1.0).
    /// Default: 0.95
    pub dominant_category_share: f64,

    /// A categorical column with a distinct value in every row is reported as
    /// an identifier only when it has more values than this.
    /// Default: 10
    pub identifier_min_values: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excellent_threshold: 85.0,
            good_threshold: 70.0,
            acceptable_threshold: 50.0,
            missing_grace_pct: 5.0,
            missing_moderate_weight: 1.0,
            missing_steep_pct: 10.0,
            missing_weight: 2.0,
            duplicate_grace_pct: 1.0,
            duplicate_moderate_weight: 2.0,
            duplicate_steep_pct: 5.0,
            duplicate_weight: 3.0,
            outlier_weight: 1.5,
            all_missing_penalty: 10.0,
            iqr_multiplier: 1.5,
            min_outlier_sample: 4,
            significant_outlier_pct: 5.0,
            high_missing_pct: 30.0,
            medium_missing_pct: 10.0,
            high_duplicate_pct: 10.0,
            drop_column_missing_pct: 70.0,
            correlation_threshold: 0.7,
            skewness_threshold: 1.0,
            dominant_category_share: 0.95,
            identifier_min_values: 10,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfilerError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AnalyzerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("excellent_threshold", self.excellent_threshold),
            ("good_threshold", self.good_threshold),
            ("acceptable_threshold", self.acceptable_threshold),
            ("missing_grace_pct", self.missing_grace_pct),
            ("missing_steep_pct", self.missing_steep_pct),
            ("duplicate_grace_pct", self.duplicate_grace_pct),
            ("duplicate_steep_pct", self.duplicate_steep_pct),
            ("significant_outlier_pct", self.significant_outlier_pct),
            ("high_missing_pct", self.high_missing_pct),
            ("medium_missing_pct", self.medium_missing_pct),
            ("high_duplicate_pct", self.high_duplicate_pct),
            ("drop_column_missing_pct", self.drop_column_missing_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigValidationError::InvalidPercentage {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if !(self.excellent_threshold > self.good_threshold
            && self.good_threshold > self.acceptable_threshold)
        {
            return Err(ConfigValidationError::UnorderedTiers {
                excellent: self.excellent_threshold,
                good: self.good_threshold,
                acceptable: self.acceptable_threshold,
            });
        }

        for (field, grace, steep) in [
            ("missing", self.missing_grace_pct, self.missing_steep_pct),
            ("duplicate", self.duplicate_grace_pct, self.duplicate_steep_pct),
        ] {
            if grace > steep {
                return Err(ConfigValidationError::UnorderedBands {
                    field: field.to_string(),
                    grace,
                    steep,
                });
            }
        }

        for (field, value) in [
            ("missing_moderate_weight", self.missing_moderate_weight),
            ("missing_weight", self.missing_weight),
            ("duplicate_moderate_weight", self.duplicate_moderate_weight),
            ("duplicate_weight", self.duplicate_weight),
            ("outlier_weight", self.outlier_weight),
            ("all_missing_penalty", self.all_missing_penalty),
            ("skewness_threshold", self.skewness_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::NegativeValue {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier <= 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "correlation_threshold".to_string(),
                value: self.correlation_threshold,
            });
        }

        if !(self.dominant_category_share > 0.0 && self.dominant_category_share <= 1.0) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "dominant_category_share".to_string(),
                value: self.dominant_category_share,
            });
        }

        if self.min_outlier_sample == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(
                self.min_outlier_sample,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid percentage for '{field}': {value} (must be between 0 and 100)")]
    InvalidPercentage { field: String, value: f64 },

    #[error("Invalid ratio for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("Invalid value for '{field}': {value} (must be a non-negative number)")]
    NegativeValue { field: String, value: f64 },

    #[error(
        "Tier thresholds must be strictly decreasing: excellent {excellent} > good {good} > acceptable {acceptable}"
    )]
    UnorderedTiers {
        excellent: f64,
        good: f64,
        acceptable: f64,
    },

    #[error("The {field} grace band ({grace}%) must not exceed its steep band ({steep}%)")]
    UnorderedBands { field: String, grace: f64, steep: f64 },

    #[error("Invalid IQR multiplier: {0} (must be positive)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid minimum outlier sample: {0} (must be at least 1)")]
    InvalidSampleSize(usize),
}

impl From<ConfigValidationError> for ProfilerError {
    fn from(err: ConfigValidationError) -> Self {
        ProfilerError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalyzerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Set the three tier thresholds at once.
    pub fn tier_thresholds(mut self, excellent: f64, good: f64, acceptable: f64) -> Self {
        self.config.excellent_threshold = excellent;
        self.config.good_threshold = good;
        self.config.acceptable_threshold = acceptable;
        self
    }

    /// Set the penalty per percentage point of missing cells above the steep band.
    pub fn missing_weight(mut self, weight: f64) -> Self {
        self.config.missing_weight = weight;
        self
    }

    /// Set the missing-cell bands: no penalty up to `grace_pct`,
    /// `moderate_weight` per point up to `steep_pct`, `missing_weight` above.
    pub fn missing_bands(mut self, grace_pct: f64, moderate_weight: f64, steep_pct: f64) -> Self {
        self.config.missing_grace_pct = grace_pct;
        self.config.missing_moderate_weight = moderate_weight;
        self.config.missing_steep_pct = steep_pct;
        self
    }

    /// Set the penalty per percentage point of duplicate rows above the steep band.
    pub fn duplicate_weight(mut self, weight: f64) -> Self {
        self.config.duplicate_weight = weight;
        self
    }

    /// Set the duplicate-row bands, like [`missing_bands`](Self::missing_bands).
    pub fn duplicate_bands(mut self, grace_pct: f64, moderate_weight: f64, steep_pct: f64) -> Self {
        self.config.duplicate_grace_pct = grace_pct;
        self.config.duplicate_moderate_weight = moderate_weight;
        self.config.duplicate_steep_pct = steep_pct;
        self
    }

    /// Set the penalty per percentage point of outlier cells.
    pub fn outlier_weight(mut self, weight: f64) -> Self {
        self.config.outlier_weight = weight;
        self
    }

    /// Set the flat penalty for each all-missing column.
    pub fn all_missing_penalty(mut self, points: f64) -> Self {
        self.config.all_missing_penalty = points;
        self
    }

    /// Set the IQR multiplier used for outlier bounds.
    pub fn iqr_multiplier(mut self, k: f64) -> Self {
        self.config.iqr_multiplier = k;
        self
    }

    /// Set the minimum number of present values for outlier detection.
    pub fn min_outlier_sample(mut self, n: usize) -> Self {
        self.config.min_outlier_sample = n;
        self
    }

    /// Set the outlier percentage that makes a column's outliers significant.
    pub fn significant_outlier_pct(mut self, pct: f64) -> Self {
        self.config.significant_outlier_pct = pct;
        self
    }

    /// Set the missing percentages for high and medium severity issues.
    pub fn missing_severity(mut self, high_pct: f64, medium_pct: f64) -> Self {
        self.config.high_missing_pct = high_pct;
        self.config.medium_missing_pct = medium_pct;
        self
    }

    /// Set the duplicate-row percentage for high severity duplicate issues.
    pub fn high_duplicate_pct(mut self, pct: f64) -> Self {
        self.config.high_duplicate_pct = pct;
        self
    }

    /// Set the missing percentage above which dropping a column is recommended.
    pub fn drop_column_missing_pct(mut self, pct: f64) -> Self {
        self.config.drop_column_missing_pct = pct;
        self
    }

    /// Set the absolute correlation that counts as strong.
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.config.correlation_threshold = threshold;
        self
    }

    /// Set the absolute skewness that counts as highly skewed.
    pub fn skewness_threshold(mut self, threshold: f64) -> Self {
        self.config.skewness_threshold = threshold;
        self
    }

    /// Set the dominant category share for near-constant detection.
    pub fn dominant_category_share(mut self, share: f64) -> Self {
        self.config.dominant_category_share = share;
        self
    }

    /// Set the value count above which all-distinct columns are identifiers.
    pub fn identifier_min_values(mut self, n: usize) -> Self {
        self.config.identifier_min_values = n;
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalyzerConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalyzerConfig, ConfigValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.excellent_threshold, 85.0);
        assert_eq!(config.good_threshold, 70.0);
        assert_eq!(config.acceptable_threshold, 50.0);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.correlation_threshold, 0.7);
        assert_eq!(config.missing_grace_pct, 5.0);
        assert_eq!(config.duplicate_steep_pct, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalyzerConfig::builder()
            .missing_weight(1.0)
            .duplicate_weight(0.5)
            .correlation_threshold(0.9)
            .tier_thresholds(90.0, 75.0, 60.0)
            .build()
            .unwrap();

        assert_eq!(config.missing_weight, 1.0);
        assert_eq!(config.duplicate_weight, 0.5);
        assert_eq!(config.correlation_threshold, 0.9);
        assert_eq!(config.excellent_threshold, 90.0);
        assert_eq!(config.acceptable_threshold, 60.0);
    }

    #[test]
    fn test_validation_unordered_tiers() {
        let result = AnalyzerConfig::builder()
            .tier_thresholds(70.0, 85.0, 50.0)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::UnorderedTiers { .. }
        ));
    }

    #[test]
    fn test_validation_negative_weight() {
        let result = AnalyzerConfig::builder().outlier_weight(-1.0).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::NegativeValue { .. }
        ));
    }

    #[test]
    fn test_validation_unordered_bands() {
        let result = AnalyzerConfig::builder()
            .duplicate_bands(8.0, 2.0, 5.0)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::UnorderedBands { .. }
        ));
    }

    #[test]
    fn test_validation_band_outside_percentage_range() {
        let result = AnalyzerConfig::builder()
            .missing_bands(5.0, 1.0, 150.0)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPercentage { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_correlation_threshold() {
        let result = AnalyzerConfig::builder().correlation_threshold(1.5).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidRatio { .. }
        ));
    }

    #[test]
    fn test_validation_zero_iqr_multiplier() {
        let result = AnalyzerConfig::builder().iqr_multiplier(0.0).build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidIqrMultiplier(_)
        ));
    }

    #[test]
    fn test_validation_error_converts_to_invalid_config() {
        let err: ProfilerError = ConfigValidationError::InvalidSampleSize(0).into();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "missing_weight": 1.25, "correlation_threshold": 0.8 }"#;
        let config: AnalyzerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.missing_weight, 1.25);
        assert_eq!(config.correlation_threshold, 0.8);
        assert_eq!(config.duplicate_weight, 3.0);
        assert_eq!(config.missing_moderate_weight, 1.0);
        assert_eq!(config.excellent_threshold, 85.0);
    }

    #[test]
    fn test_from_json_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "good_threshold": 95.0 }"#).unwrap();

        let err = AnalyzerConfig::from_json_file(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
