//! Pairwise Pearson correlation between numeric columns.

use crate::dataset::Dataset;
use crate::types::StrongCorrelation;
use anofox_statistics::correlation;
use tracing::debug;

const MIN_COMPLETE_PAIRS: usize = 3;
const CONFIDENCE_LEVEL: f64 = 0.95;

/// Symmetric correlation matrix over the numeric columns of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of numeric columns over their pairwise-complete rows.
    pub fn compute(dataset: &Dataset) -> Self {
        let numeric: Vec<_> = dataset
            .numeric_columns()
            .filter_map(|c| c.as_numeric().map(|v| (c.name().to_string(), v)))
            .collect();

        let n = numeric.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(numeric[i].1, numeric[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            columns: numeric.into_iter().map(|(name, _)| name).collect(),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Coefficient between two columns by name.
    pub fn get(&self, first: &str, second: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == first)?;
        let j = self.columns.iter().position(|c| c == second)?;
        self.values[i][j]
    }

    /// Pairs with `|r| > threshold`, in column order.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<StrongCorrelation> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                if let Some(r) = self.values[i][j]
                    && r.abs() > threshold
                {
                    pairs.push(StrongCorrelation {
                        first: self.columns[i].clone(),
                        second: self.columns[j].clone(),
                        coefficient: r,
                    });
                }
            }
        }
        pairs
    }
}

/// Pearson correlation over rows where both values are present.
///
/// `None` with fewer than three complete pairs, when either side has no
/// spread, or when the estimate is not finite.
pub(crate) fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let (x, y): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();

    if x.len() < MIN_COMPLETE_PAIRS || is_constant(&x) || is_constant(&y) {
        return None;
    }

    match correlation::pearson(&x, &y, Some(CONFIDENCE_LEVEL)) {
        Ok(result) if result.estimate.is_finite() => Some(result.estimate.clamp(-1.0, 1.0)),
        Ok(_) => None,
        Err(e) => {
            debug!("Pearson correlation failed: {:?}", e);
            None
        }
    }
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
