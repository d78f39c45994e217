//! Statistical functions for column summaries.

use crate::types::{CategoricalStats, NumericStats};
use std::collections::HashMap;

/// Summarize the present values of a numeric column.
pub(crate) fn numeric_stats(values: &[Option<f64>]) -> NumericStats {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return NumericStats::default();
    }

    let mut sorted = present.clone();
    sorted.sort_by(f64::total_cmp);

    NumericStats {
        count: present.len(),
        mean: Some(mean(&present)),
        std: Some(calculate_std(&present)),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
        median: Some(quantile(&sorted, 0.5)),
        q1: Some(quantile(&sorted, 0.25)),
        q3: Some(quantile(&sorted, 0.75)),
        skewness: Some(calculate_skewness(&present)),
    }
}

/// Summarize the present values of a categorical column.
pub(crate) fn categorical_stats(values: &[Option<String>]) -> CategoricalStats {
    // first-seen order makes the most-frequent tie-break deterministic
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for value in values.iter().flatten() {
        let entry = counts.entry(value.as_str()).or_insert_with(|| {
            order.push(value.as_str());
            0
        });
        *entry += 1;
    }

    let count: usize = counts.values().sum();
    if count == 0 {
        return CategoricalStats::default();
    }

    let mut most_frequent = order[0];
    for &value in &order[1..] {
        if counts[value] > counts[most_frequent] {
            most_frequent = value;
        }
    }

    let entropy = order
        .iter()
        .map(|v| {
            let p = counts[v] as f64 / count as f64;
            -p * p.log2()
        })
        .sum::<f64>();

    CategoricalStats {
        count,
        unique_count: order.len(),
        most_frequent: Some(most_frequent.to_string()),
        most_frequent_count: counts[most_frequent],
        entropy,
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero for fewer than two values.
pub(crate) fn calculate_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Adjusted Fisher-Pearson skewness. Zero for fewer than three values or no spread.
pub(crate) fn calculate_skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 3.0 {
        return 0.0;
    }

    let mean = mean(values);
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if m2 == 0.0 {
        return 0.0;
    }
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;

    let g1 = m3 / m2.powf(1.5);
    (n * (n - 1.0)).sqrt() / (n - 2.0) * g1
}

/// Quantile of sorted values with linear interpolation between closest ranks.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => return 0.0,
        1 => return sorted[0],
        _ => {}
    }

    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    if frac == 0.0 {
        return sorted[lower];
    }

    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
