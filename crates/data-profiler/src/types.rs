use crate::config::AnalyzerConfig;
use crate::dataset::ColumnKind;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Column Summaries
// ============================================================================

/// Descriptive statistics of a numeric column.
///
/// Every statistic is optional: a column without present values has none, and
/// summaries supplied by a caller may omit fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Number of present (non-missing) values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    /// First quartile (25th percentile).
    pub q1: Option<f64>,
    /// Third quartile (75th percentile).
    pub q3: Option<f64>,
    pub skewness: Option<f64>,
}

/// Frequency statistics of a categorical column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalStats {
    /// Number of present (non-missing) values.
    pub count: usize,
    pub unique_count: usize,
    pub most_frequent: Option<String>,
    pub most_frequent_count: usize,
    /// Shannon entropy of the value distribution, in bits.
    pub entropy: f64,
}

/// Kind-specific statistics of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

/// Precomputed per-column statistics consumed by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub missing_count: usize,
    pub stats: ColumnStats,
}

impl ColumnSummary {
    pub fn kind(&self) -> ColumnKind {
        match self.stats {
            ColumnStats::Numeric(_) => ColumnKind::Numeric,
            ColumnStats::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.stats {
            ColumnStats::Numeric(s) => Some(s),
            ColumnStats::Categorical(_) => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalStats> {
        match &self.stats {
            ColumnStats::Categorical(s) => Some(s),
            ColumnStats::Numeric(_) => None,
        }
    }

    /// Interquartile range `Q3 - Q1`, when both quartiles are known.
    pub fn iqr(&self) -> Option<f64> {
        let stats = self.numeric()?;
        Some(stats.q3? - stats.q1?)
    }

    /// Outlier fences `(Q1 - k*IQR, Q3 + k*IQR)`.
    pub fn outlier_bounds(&self, multiplier: f64) -> Option<(f64, f64)> {
        let stats = self.numeric()?;
        let (q1, q3) = (stats.q1?, stats.q3?);
        let iqr = q3 - q1;
        Some((q1 - multiplier * iqr, q3 + multiplier * iqr))
    }
}

// ============================================================================
// Quality Report
// ============================================================================

/// Classification of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Excellent,
    Good,
    Acceptable,
    Problems,
}

impl QualityTier {
    /// Classify a score. Each threshold is the inclusive lower bound of its tier.
    pub fn from_score(score: f64, config: &AnalyzerConfig) -> Self {
        if score >= config.excellent_threshold {
            Self::Excellent
        } else if score >= config.good_threshold {
            Self::Good
        } else if score >= config.acceptable_threshold {
            Self::Acceptable
        } else {
            Self::Problems
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::Problems => "Problems",
        }
    }

    /// Excellent and Good datasets are considered high quality.
    pub fn is_high_quality(&self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity of a detected issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingValues,
    AllMissing,
    DuplicateRows,
    Outliers,
}

/// A detected data quality problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub columns: Vec<String>,
    pub description: String,
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Imputation,
    DropColumn,
    Deduplicate,
    StrongCorrelation,
    Skewness,
    ConstantColumn,
    DominantCategory,
    LikelyIdentifier,
    NoIssues,
}

/// A textual observation or recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub columns: Vec<String>,
    pub message: String,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Points subtracted from 100, per source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    pub missing: f64,
    pub duplicate: f64,
    pub outlier: f64,
    pub all_missing: f64,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> f64 {
        self.missing + self.duplicate + self.outlier + self.all_missing
    }
}

/// IQR outliers found in one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    pub column: String,
    pub outlier_count: usize,
    /// Outliers as a percentage of the column's present values.
    pub percentage: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Result of a quality analysis. Built fresh by every call to
/// [`QualityAnalyzer::analyze`](crate::QualityAnalyzer::analyze).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Quality score in `[0, 100]`.
    pub score: f64,
    pub tier: QualityTier,
    pub penalties: PenaltyBreakdown,

    pub rows: usize,
    pub columns: usize,
    /// Missing cells outside all-missing columns.
    pub missing_cells: usize,
    pub missing_percentage: f64,
    pub all_missing_columns: Vec<String>,
    pub duplicate_rows: usize,
    pub duplicate_percentage: f64,
    pub outlier_cells: usize,
    pub outlier_percentage: f64,
    pub outlier_columns: Vec<ColumnOutliers>,

    pub issues: Vec<QualityIssue>,
    pub insights: Vec<Insight>,
}

impl QualityReport {
    pub fn issue_descriptions(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.description.as_str()).collect()
    }

    pub fn insight_messages(&self) -> Vec<&str> {
        self.insights.iter().map(|i| i.message.as_str()).collect()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Highest severity among the detected issues.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}

// ============================================================================
// Dataset Profile
// ============================================================================

/// Missing-value count of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub column: String,
    pub missing_count: usize,
    pub missing_percentage: f64,
}

/// A pair of numeric columns whose correlation exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub first: String,
    pub second: String,
    pub coefficient: f64,
}

/// Descriptive overview of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub missing_cells: usize,
    pub duplicate_rows: usize,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    /// Categorical columns rendered from dates or timestamps.
    pub temporal_columns: usize,
    /// Columns with at least one missing value, most missing first.
    pub missing_by_column: Vec<MissingColumn>,
    pub summaries: Vec<ColumnSummary>,
    pub strong_correlations: Vec<StrongCorrelation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_summary(q1: Option<f64>, q3: Option<f64>) -> ColumnSummary {
        ColumnSummary {
            name: "x".to_string(),
            missing_count: 0,
            stats: ColumnStats::Numeric(NumericStats {
                count: 10,
                q1,
                q3,
                ..Default::default()
            }),
        }
    }

    // ==================== ColumnSummary tests ====================

    #[test]
    fn test_outlier_bounds() {
        let summary = numeric_summary(Some(10.0), Some(20.0));
        assert_eq!(summary.iqr(), Some(10.0));
        assert_eq!(summary.outlier_bounds(1.5), Some((-5.0, 35.0)));
    }

    #[test]
    fn test_outlier_bounds_missing_quartile() {
        let summary = numeric_summary(Some(10.0), None);
        assert_eq!(summary.iqr(), None);
        assert_eq!(summary.outlier_bounds(1.5), None);
    }

    #[test]
    fn test_categorical_summary_has_no_bounds() {
        let summary = ColumnSummary {
            name: "c".to_string(),
            missing_count: 0,
            stats: ColumnStats::Categorical(CategoricalStats::default()),
        };
        assert_eq!(summary.kind(), ColumnKind::Categorical);
        assert_eq!(summary.outlier_bounds(1.5), None);
    }

    #[test]
    fn test_summary_json_is_tagged() {
        let json = serde_json::to_value(numeric_summary(Some(1.0), Some(2.0))).unwrap();
        assert_eq!(json["stats"]["kind"], "numeric");
        assert_eq!(json["stats"]["q1"], 1.0);
    }

    // ==================== QualityTier tests ====================

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let config = AnalyzerConfig::default();
        assert_eq!(QualityTier::from_score(100.0, &config), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(85.0, &config), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(84.999, &config), QualityTier::Good);
        assert_eq!(QualityTier::from_score(70.0, &config), QualityTier::Good);
        assert_eq!(QualityTier::from_score(69.999, &config), QualityTier::Acceptable);
        assert_eq!(QualityTier::from_score(50.0, &config), QualityTier::Acceptable);
        assert_eq!(QualityTier::from_score(49.999, &config), QualityTier::Problems);
        assert_eq!(QualityTier::from_score(0.0, &config), QualityTier::Problems);
    }

    #[test]
    fn test_tier_is_high_quality() {
        assert!(QualityTier::Good.is_high_quality());
        assert!(!QualityTier::Acceptable.is_high_quality());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_penalty_total() {
        let penalties = PenaltyBreakdown {
            missing: 10.0,
            duplicate: 6.0,
            outlier: 1.5,
            all_missing: 10.0,
        };
        assert_eq!(penalties.total(), 27.5);
    }
}
