//! In-memory tabular dataset.
//!
//! A [`Dataset`] is an ordered list of named [`Column`]s of equal length. Each
//! column is either numeric or categorical, and `None` marks a missing cell.

use crate::error::{ProfilerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Kind of values stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// Cell values of a column, `None` being the missing marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: ColumnValues,
    /// Rendered from dates or timestamps.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    temporal: bool,
}

impl Column {
    /// Create a numeric column. NaN and infinite values are stored as missing.
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
            temporal: false,
        }
    }

    /// Create a categorical column.
    pub fn categorical<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self {
            name: name.into(),
            values: ColumnValues::Categorical(values),
            temporal: false,
        }
    }

    /// Mark the column as holding dates or timestamps.
    pub fn with_temporal(mut self, temporal: bool) -> Self {
        self.temporal = temporal;
        self
    }

    pub fn is_temporal(&self) -> bool {
        self.temporal
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn kind(&self) -> ColumnKind {
        match self.values {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Numeric cells, or `None` for a categorical column.
    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Categorical(_) => None,
        }
    }

    /// Categorical cells, or `None` for a numeric column.
    pub fn as_categorical(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Categorical(v) => Some(v),
            ColumnValues::Numeric(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnValues::Categorical(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// True when the column has rows and every one of them is missing.
    pub fn is_all_missing(&self) -> bool {
        !self.is_empty() && self.missing_count() == self.len()
    }

    fn cell_key(&self, row: usize) -> CellKey<'_> {
        match &self.values {
            ColumnValues::Numeric(v) => match v[row] {
                // -0.0 and 0.0 compare equal, so they must hash equal
                Some(x) if x == 0.0 => CellKey::Number(0.0f64.to_bits()),
                Some(x) => CellKey::Number(x.to_bits()),
                None => CellKey::Missing,
            },
            ColumnValues::Categorical(v) => match &v[row] {
                Some(s) => CellKey::Text(s.as_str()),
                None => CellKey::Missing,
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
}

/// A rectangular table of named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset, checking that columns have equal length and unique names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);

        if let Some(ragged) = columns.iter().find(|c| c.len() != rows) {
            return Err(ProfilerError::InconsistentInput(format!(
                "column '{}' has {} rows but '{}' has {}",
                ragged.name(),
                ragged.len(),
                columns[0].name(),
                rows
            )));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ProfilerError::InconsistentInput(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    pub fn total_cells(&self) -> usize {
        self.rows * self.columns.len()
    }

    pub fn missing_cells(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Categorical)
    }

    /// Columns that came from dates or timestamps.
    pub fn temporal_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_temporal())
    }

    /// Number of rows that exactly repeat an earlier row.
    ///
    /// Missing cells compare equal to each other, so the first occurrence of
    /// each distinct row is kept and every later copy is counted.
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(self.rows);
        let mut duplicates = 0;

        for row in 0..self.rows {
            let key: Vec<CellKey<'_>> = self.columns.iter().map(|c| c.cell_key(row)).collect();
            if !seen.insert(key) {
                duplicates += 1;
            }
        }

        duplicates
    }
}
