//! Penalty arithmetic and IQR outlier counting.

use crate::config::AnalyzerConfig;
use crate::types::{ColumnOutliers, ColumnSummary, PenaltyBreakdown};
use crate::utils::percentage;

/// Percentages feeding the penalty computation.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PenaltyInputs {
    pub missing_pct: f64,
    pub duplicate_pct: f64,
    pub outlier_pct: f64,
    pub all_missing_columns: usize,
}

/// Weighted penalties, one per source.
///
/// Missing and duplicate percentages are banded: nothing up to the grace
/// percentage, the moderate weight up to the steep percentage, the full weight
/// above it. The chosen weight applies to the whole percentage.
pub(crate) fn compute_penalties(inputs: &PenaltyInputs, config: &AnalyzerConfig) -> PenaltyBreakdown {
    PenaltyBreakdown {
        missing: banded_penalty(
            inputs.missing_pct,
            config.missing_grace_pct,
            config.missing_moderate_weight,
            config.missing_steep_pct,
            config.missing_weight,
        ),
        duplicate: banded_penalty(
            inputs.duplicate_pct,
            config.duplicate_grace_pct,
            config.duplicate_moderate_weight,
            config.duplicate_steep_pct,
            config.duplicate_weight,
        ),
        outlier: config.outlier_weight * inputs.outlier_pct,
        all_missing: config.all_missing_penalty * inputs.all_missing_columns as f64,
    }
}

fn banded_penalty(
    pct: f64,
    grace_pct: f64,
    moderate_weight: f64,
    steep_pct: f64,
    weight: f64,
) -> f64 {
    if pct > steep_pct {
        pct * weight
    } else if pct > grace_pct {
        pct * moderate_weight
    } else {
        0.0
    }
}

/// `100 - total penalty`, clamped to `[0, 100]`.
pub(crate) fn score(penalties: &PenaltyBreakdown) -> f64 {
    let raw = 100.0 - penalties.total();
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

/// Count values outside the summary's IQR fences.
///
/// Returns `None` when the column is too small, has zero variance, lacks
/// quartiles, or has no outliers.
pub(crate) fn detect_column_outliers(
    values: &[Option<f64>],
    summary: &ColumnSummary,
    config: &AnalyzerConfig,
) -> Option<ColumnOutliers> {
    let stats = summary.numeric()?;
    let present = values.iter().flatten().count();

    if present < config.min_outlier_sample {
        return None;
    }
    if stats.std.is_some_and(|std| std == 0.0) {
        return None;
    }

    let (lower_bound, upper_bound) = summary.outlier_bounds(config.iqr_multiplier)?;
    let outlier_count = values
        .iter()
        .flatten()
        .filter(|&&v| v < lower_bound || v > upper_bound)
        .count();

    if outlier_count == 0 {
        return None;
    }

    Some(ColumnOutliers {
        column: summary.name.clone(),
        outlier_count,
        percentage: percentage(outlier_count, present),
        lower_bound,
        upper_bound,
    })
}
