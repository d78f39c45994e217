use crate::config::AnalyzerConfig;
use crate::dataset::{ColumnValues, Dataset};
use crate::error::{ProfilerError, Result};
use crate::profiler::DataProfiler;
use crate::quality::insights::{InsightInputs, generate_insights};
use crate::quality::scoring::{PenaltyInputs, compute_penalties, detect_column_outliers, score};
use crate::types::{
    ColumnOutliers, ColumnStats, ColumnSummary, IssueKind, QualityIssue, QualityReport,
    QualityTier, Severity,
};
use crate::utils::percentage;
use tracing::{debug, info};

/// Scores a dataset and reports its quality issues.
///
/// The analyzer holds only its configuration; every call to [`analyze`](Self::analyze)
/// is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct QualityAnalyzer {
    config: AnalyzerConfig,
}

static_assertions::assert_impl_all!(QualityAnalyzer: Send, Sync);

/// Counts gathered before scoring.
struct Measurements {
    missing_cells: usize,
    all_missing_columns: Vec<String>,
    duplicate_rows: usize,
    outlier_columns: Vec<ColumnOutliers>,
    outlier_cells: usize,
    numeric_cells: usize,
}

impl QualityAnalyzer {
    /// Create an analyzer, rejecting an invalid configuration.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a dataset against caller-supplied column summaries.
    ///
    /// Summaries must match the dataset column-for-column: same order, name,
    /// kind and missing count. Numeric columns with present values need `q1`,
    /// `q3` and `std`.
    pub fn analyze(&self, dataset: &Dataset, summaries: &[ColumnSummary]) -> Result<QualityReport> {
        Self::check_not_empty(dataset)?;
        Self::validate_inputs(dataset, summaries)?;

        let m = self.measure(dataset, summaries);

        let total_cells = dataset.total_cells();
        let inputs = PenaltyInputs {
            missing_pct: percentage(m.missing_cells, total_cells),
            duplicate_pct: percentage(m.duplicate_rows, dataset.n_rows()),
            outlier_pct: percentage(m.outlier_cells, m.numeric_cells),
            all_missing_columns: m.all_missing_columns.len(),
        };
        let penalties = compute_penalties(&inputs, &self.config);
        let score = score(&penalties);
        let tier = QualityTier::from_score(score, &self.config);

        debug!(
            missing = penalties.missing,
            duplicate = penalties.duplicate,
            outlier = penalties.outlier,
            all_missing = penalties.all_missing,
            "Penalties computed"
        );

        let issues = self.detect_issues(dataset, summaries, &m, inputs.duplicate_pct);
        let insights = generate_insights(
            &InsightInputs {
                dataset,
                summaries,
                outliers: &m.outlier_columns,
                duplicate_rows: m.duplicate_rows,
                has_issues: !issues.is_empty(),
            },
            &self.config,
        );

        info!(
            score,
            tier = %tier,
            issues = issues.len(),
            "Quality analysis completed"
        );

        Ok(QualityReport {
            score,
            tier,
            penalties,
            rows: dataset.n_rows(),
            columns: dataset.n_columns(),
            missing_cells: m.missing_cells,
            missing_percentage: inputs.missing_pct,
            all_missing_columns: m.all_missing_columns,
            duplicate_rows: m.duplicate_rows,
            duplicate_percentage: inputs.duplicate_pct,
            outlier_cells: m.outlier_cells,
            outlier_percentage: inputs.outlier_pct,
            outlier_columns: m.outlier_columns,
            issues,
            insights,
        })
    }

    /// Summarize the dataset with [`DataProfiler`] and analyze it.
    pub fn analyze_dataset(&self, dataset: &Dataset) -> Result<QualityReport> {
        Self::check_not_empty(dataset)?;
        let summaries = DataProfiler::summarize(dataset);
        self.analyze(dataset, &summaries)
    }

    fn check_not_empty(dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            return Err(ProfilerError::EmptyDataset {
                rows: dataset.n_rows(),
                columns: dataset.n_columns(),
            });
        }
        Ok(())
    }

    fn validate_inputs(dataset: &Dataset, summaries: &[ColumnSummary]) -> Result<()> {
        if summaries.len() != dataset.n_columns() {
            return Err(ProfilerError::InconsistentInput(format!(
                "expected {} column summaries, got {}",
                dataset.n_columns(),
                summaries.len()
            )));
        }

        for (position, (column, summary)) in dataset.columns().iter().zip(summaries).enumerate() {
            if column.name() != summary.name {
                return Err(ProfilerError::InconsistentInput(format!(
                    "summary {} is for column '{}' but the dataset has '{}' at that position",
                    position,
                    summary.name,
                    column.name()
                )));
            }
            if column.kind() != summary.kind() {
                return Err(ProfilerError::InconsistentInput(format!(
                    "column '{}' is {} but its summary is {}",
                    column.name(),
                    column.kind(),
                    summary.kind()
                )));
            }
            if column.missing_count() != summary.missing_count {
                return Err(ProfilerError::InconsistentInput(format!(
                    "column '{}' has {} missing values but its summary reports {}",
                    column.name(),
                    column.missing_count(),
                    summary.missing_count
                )));
            }

            if let ColumnStats::Numeric(stats) = &summary.stats
                && column.present_count() > 0
            {
                let (q1, q3, std) = match (stats.q1, stats.q3, stats.std) {
                    (Some(q1), Some(q3), Some(std)) => (q1, q3, std),
                    (None, _, _) => return Err(Self::missing_statistic(column.name(), "q1")),
                    (_, None, _) => return Err(Self::missing_statistic(column.name(), "q3")),
                    (_, _, None) => return Err(Self::missing_statistic(column.name(), "std")),
                };

                if !(q1.is_finite() && q3.is_finite() && std.is_finite()) || std < 0.0 {
                    return Err(ProfilerError::InconsistentInput(format!(
                        "column '{}' has invalid summary statistics (q1 {}, q3 {}, std {})",
                        column.name(),
                        q1,
                        q3,
                        std
                    )));
                }
                if q1 > q3 {
                    return Err(ProfilerError::InconsistentInput(format!(
                        "column '{}' has q1 {} above q3 {}",
                        column.name(),
                        q1,
                        q3
                    )));
                }
            }
        }

        Ok(())
    }

    fn missing_statistic(column: &str, field: &str) -> ProfilerError {
        ProfilerError::unsupported_column(column, format!("numeric summary has no '{}'", field))
    }

    fn measure(&self, dataset: &Dataset, summaries: &[ColumnSummary]) -> Measurements {
        let mut m = Measurements {
            missing_cells: 0,
            all_missing_columns: Vec::new(),
            duplicate_rows: dataset.duplicate_row_count(),
            outlier_columns: Vec::new(),
            outlier_cells: 0,
            numeric_cells: 0,
        };

        for (column, summary) in dataset.columns().iter().zip(summaries) {
            if column.is_all_missing() {
                m.all_missing_columns.push(column.name().to_string());
            } else {
                m.missing_cells += column.missing_count();
            }

            if let ColumnValues::Numeric(values) = column.values() {
                m.numeric_cells += column.present_count();
                if let Some(outliers) = detect_column_outliers(values, summary, &self.config) {
                    debug!(
                        column = %outliers.column,
                        count = outliers.outlier_count,
                        "Outliers detected"
                    );
                    m.outlier_cells += outliers.outlier_count;
                    m.outlier_columns.push(outliers);
                }
            }
        }

        m
    }

    fn detect_issues(
        &self,
        dataset: &Dataset,
        summaries: &[ColumnSummary],
        m: &Measurements,
        duplicate_pct: f64,
    ) -> Vec<QualityIssue> {
        let rows = dataset.n_rows();
        let mut issues = Vec::new();

        for summary in summaries {
            if summary.missing_count == 0 {
                continue;
            }

            if m.all_missing_columns.contains(&summary.name) {
                issues.push(QualityIssue {
                    kind: IssueKind::AllMissing,
                    severity: Severity::Critical,
                    columns: vec![summary.name.clone()],
                    description: format!("Column '{}' contains only missing values", summary.name),
                });
                continue;
            }

            let pct = percentage(summary.missing_count, rows);
            let severity = if pct > self.config.high_missing_pct {
                Severity::High
            } else if pct > self.config.medium_missing_pct {
                Severity::Medium
            } else {
                Severity::Low
            };

            issues.push(QualityIssue {
                kind: IssueKind::MissingValues,
                severity,
                columns: vec![summary.name.clone()],
                description: format!(
                    "Column '{}' has {:.1}% missing values ({} of {} rows)",
                    summary.name, pct, summary.missing_count, rows
                ),
            });
        }

        if m.duplicate_rows > 0 {
            let severity = if duplicate_pct > self.config.high_duplicate_pct {
                Severity::High
            } else {
                Severity::Medium
            };
            issues.push(QualityIssue {
                kind: IssueKind::DuplicateRows,
                severity,
                columns: Vec::new(),
                description: format!(
                    "{} duplicate rows detected ({:.1}%)",
                    m.duplicate_rows, duplicate_pct
                ),
            });
        }

        for outliers in &m.outlier_columns {
            let issue = if outliers.percentage > self.config.significant_outlier_pct {
                QualityIssue {
                    kind: IssueKind::Outliers,
                    severity: Severity::Medium,
                    columns: vec![outliers.column.clone()],
                    description: format!(
                        "Column '{}' has significant outliers ({} values, {:.1}%)",
                        outliers.column, outliers.outlier_count, outliers.percentage
                    ),
                }
            } else {
                QualityIssue {
                    kind: IssueKind::Outliers,
                    severity: Severity::Low,
                    columns: vec![outliers.column.clone()],
                    description: format!(
                        "Column '{}' has {} outlier values",
                        outliers.column, outliers.outlier_count
                    ),
                }
            };
            issues.push(issue);
        }

        issues
    }
}
