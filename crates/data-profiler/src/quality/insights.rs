//! Recommendations and observations derived from a dataset and its summaries.

use crate::config::AnalyzerConfig;
use crate::dataset::Dataset;
use crate::profiler::CorrelationMatrix;
use crate::types::{ColumnOutliers, ColumnStats, ColumnSummary, Insight, InsightKind};
use crate::utils::percentage;

/// Everything the insight rules look at.
pub(crate) struct InsightInputs<'a> {
    pub dataset: &'a Dataset,
    pub summaries: &'a [ColumnSummary],
    pub outliers: &'a [ColumnOutliers],
    pub duplicate_rows: usize,
    pub has_issues: bool,
}

pub(crate) fn generate_insights(inputs: &InsightInputs<'_>, config: &AnalyzerConfig) -> Vec<Insight> {
    let mut insights = Vec::new();

    insights.extend(missing_value_insights(inputs, config));

    if inputs.duplicate_rows > 0 {
        insights.push(Insight {
            kind: InsightKind::Deduplicate,
            columns: Vec::new(),
            message: format!(
                "Remove the {} duplicate rows before training or aggregating",
                inputs.duplicate_rows
            ),
        });
    }

    insights.extend(correlation_insights(inputs.dataset, config));

    for summary in inputs.summaries {
        insights.extend(distribution_insights(summary, config));
    }

    if !inputs.has_issues {
        insights.push(Insight {
            kind: InsightKind::NoIssues,
            columns: Vec::new(),
            message: "No data quality issues detected".to_string(),
        });
    }

    insights
}

fn missing_value_insights(inputs: &InsightInputs<'_>, config: &AnalyzerConfig) -> Vec<Insight> {
    let rows = inputs.dataset.n_rows();
    let mut insights = Vec::new();

    for summary in inputs.summaries {
        if summary.missing_count == 0 {
            continue;
        }
        let name = summary.name.clone();

        if summary.missing_count == rows {
            insights.push(Insight {
                kind: InsightKind::DropColumn,
                columns: vec![name.clone()],
                message: format!("Column '{}' has no values; drop it", name),
            });
            continue;
        }

        let missing_pct = percentage(summary.missing_count, rows);
        if missing_pct > config.drop_column_missing_pct {
            insights.push(Insight {
                kind: InsightKind::DropColumn,
                columns: vec![name.clone()],
                message: format!(
                    "Column '{}' is {:.1}% missing; consider dropping it instead of imputing",
                    name, missing_pct
                ),
            });
            continue;
        }

        let strategy = match &summary.stats {
            ColumnStats::Numeric(stats) => {
                let skewed = stats
                    .skewness
                    .is_some_and(|s| s.abs() > config.skewness_threshold);
                let has_outliers = inputs.outliers.iter().any(|o| o.column == name);
                if skewed || has_outliers {
                    "the median (robust to skew and outliers)".to_string()
                } else {
                    "the mean".to_string()
                }
            }
            ColumnStats::Categorical(stats) => match &stats.most_frequent {
                Some(mode) => format!("the most frequent value '{}'", mode),
                None => "the most frequent value".to_string(),
            },
        };

        insights.push(Insight {
            kind: InsightKind::Imputation,
            columns: vec![name.clone()],
            message: format!(
                "Consider imputing missing values in '{}' with {}",
                name, strategy
            ),
        });
    }

    insights
}

fn correlation_insights(dataset: &Dataset, config: &AnalyzerConfig) -> Vec<Insight> {
    CorrelationMatrix::compute(dataset)
        .strong_pairs(config.correlation_threshold)
        .into_iter()
        .map(|pair| {
            let direction = if pair.coefficient < 0.0 {
                "negative"
            } else {
                "positive"
            };
            Insight {
                kind: InsightKind::StrongCorrelation,
                message: format!(
                    "Strong {} correlation between '{}' and '{}' (r = {:.3}); one of them may be redundant",
                    direction, pair.first, pair.second, pair.coefficient
                ),
                columns: vec![pair.first, pair.second],
            }
        })
        .collect()
}

fn distribution_insights(summary: &ColumnSummary, config: &AnalyzerConfig) -> Option<Insight> {
    let name = summary.name.clone();

    match &summary.stats {
        ColumnStats::Numeric(stats) => {
            if stats.count > 1 && stats.std == Some(0.0) {
                return Some(Insight {
                    kind: InsightKind::ConstantColumn,
                    columns: vec![name.clone()],
                    message: format!("Column '{}' has a single distinct value", name),
                });
            }
            let skewness = stats.skewness?;
            (skewness.abs() > config.skewness_threshold).then(|| Insight {
                kind: InsightKind::Skewness,
                columns: vec![name.clone()],
                message: format!(
                    "Column '{}' is highly skewed (skewness {:.2}); consider a log or rank transform",
                    name, skewness
                ),
            })
        }
        ColumnStats::Categorical(stats) => {
            if stats.count <= 1 {
                return None;
            }
            if stats.unique_count == 1 {
                return Some(Insight {
                    kind: InsightKind::ConstantColumn,
                    columns: vec![name.clone()],
                    message: format!("Column '{}' has a single distinct value", name),
                });
            }
            if stats.unique_count == stats.count && stats.count > config.identifier_min_values {
                return Some(Insight {
                    kind: InsightKind::LikelyIdentifier,
                    columns: vec![name.clone()],
                    message: format!(
                        "Column '{}' has a distinct value in every row; it is likely an identifier",
                        name
                    ),
                });
            }
            let share = stats.most_frequent_count as f64 / stats.count as f64;
            (share >= config.dominant_category_share).then(|| Insight {
                kind: InsightKind::DominantCategory,
                columns: vec![name.clone()],
                message: format!(
                    "Column '{}' is dominated by '{}' ({:.1}% of values)",
                    name,
                    stats.most_frequent.as_deref().unwrap_or_default(),
                    share * 100.0
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::profiler::DataProfiler;

    fn insights_for(dataset: &Dataset) -> Vec<Insight> {
        let summaries = DataProfiler::summarize(dataset);
        let inputs = InsightInputs {
            dataset,
            summaries: &summaries,
            outliers: &[],
            duplicate_rows: dataset.duplicate_row_count(),
            has_issues: true,
        };
        generate_insights(&inputs, &AnalyzerConfig::default())
    }

    fn kinds(insights: &[Insight]) -> Vec<InsightKind> {
        insights.iter().map(|i| i.kind).collect()
    }

    #[test]
    fn test_numeric_imputation_uses_mean_when_symmetric() {
        let ds = Dataset::new(vec![Column::numeric(
            "x",
            [Some(1.0), Some(2.0), None, Some(3.0)],
        )])
        .unwrap();

        let insights = insights_for(&ds);
        assert_eq!(insights[0].kind, InsightKind::Imputation);
        assert!(insights[0].message.contains("the mean"));
    }

    #[test]
    fn test_numeric_imputation_uses_median_when_skewed() {
        let ds = Dataset::new(vec![Column::numeric(
            "x",
            [Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(10.0), None],
        )])
        .unwrap();

        let insights = insights_for(&ds);
        assert!(insights[0].message.contains("median"));
        assert!(kinds(&insights).contains(&InsightKind::Skewness));
    }

    #[test]
    fn test_categorical_imputation_names_mode() {
        let ds = Dataset::new(vec![Column::categorical(
            "city",
            [Some("Rio"), Some("Rio"), Some("SP"), None],
        )])
        .unwrap();

        let insights = insights_for(&ds);
        assert!(insights[0].message.contains("'Rio'"));
    }

    #[test]
    fn test_heavily_missing_column_recommends_drop() {
        let ds = Dataset::new(vec![Column::numeric(
            "x",
            [Some(1.0), None, None, None, None],
        )])
        .unwrap();

        assert_eq!(insights_for(&ds)[0].kind, InsightKind::DropColumn);
    }

    #[test]
    fn test_strong_negative_correlation() {
        let ds = Dataset::new(vec![
            Column::numeric("a", [Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Column::numeric("b", [Some(8.0), Some(6.0), Some(4.1), Some(2.0)]),
        ])
        .unwrap();

        let insights = insights_for(&ds);
        let corr = insights
            .iter()
            .find(|i| i.kind == InsightKind::StrongCorrelation)
            .unwrap();
        assert!(corr.message.contains("negative"));
        assert_eq!(corr.columns, ["a", "b"]);
    }

    #[test]
    fn test_constant_and_identifier_columns() {
        let ids: Vec<Option<String>> = (0..12).map(|i| Some(format!("id-{}", i))).collect();
        let ds = Dataset::new(vec![
            Column::categorical("id", ids),
            Column::numeric("flat", vec![Some(3.0); 12]),
        ])
        .unwrap();

        let found = kinds(&insights_for(&ds));
        assert!(found.contains(&InsightKind::LikelyIdentifier));
        assert!(found.contains(&InsightKind::ConstantColumn));
    }

    #[test]
    fn test_dominant_category() {
        let mut values = vec![Some("yes"); 19];
        values.push(Some("no"));
        let ds = Dataset::new(vec![Column::categorical("flag", values)]).unwrap();

        let insights = insights_for(&ds);
        assert_eq!(
            kinds(&insights),
            [InsightKind::Deduplicate, InsightKind::DominantCategory]
        );
        assert!(insights[1].message.contains("95.0%"));
    }

    #[test]
    fn test_no_issues_insight() {
        let ds = Dataset::new(vec![Column::numeric("x", [Some(1.0), Some(2.0)])]).unwrap();
        let summaries = DataProfiler::summarize(&ds);
        let inputs = InsightInputs {
            dataset: &ds,
            summaries: &summaries,
            outliers: &[],
            duplicate_rows: 0,
            has_issues: false,
        };

        let insights = generate_insights(&inputs, &AnalyzerConfig::default());
        assert_eq!(kinds(&insights), [InsightKind::NoIssues]);
    }
}
