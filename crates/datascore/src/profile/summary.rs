//! Per-column descriptive statistics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::schema::{Column, DType, Table, ValueKey};

/// Number of example values kept per column.
const EXAMPLE_VALUES: usize = 3;

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: DType,
    /// Missing entries (null markers and NaN).
    pub n_missing: usize,
    /// `n_missing / n_rows`, or 0 for a table without rows.
    pub missing_share: f64,
    /// Distinct non-null values.
    pub n_distinct: usize,
    /// Whether all non-null values are distinct.
    pub unique: bool,
    /// First few distinct non-null values, rendered as text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

/// Summary of a whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

/// One printable row of a flattened summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub dtype: String,
    pub n_missing: usize,
    pub missing_share: f64,
    pub n_distinct: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl DatasetSummary {
    /// Get a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Flatten into one row per column for tabular display.
    pub fn flatten(&self) -> Vec<SummaryRow> {
        self.columns
            .iter()
            .map(|c| SummaryRow {
                name: c.name.clone(),
                dtype: c.dtype.to_string(),
                n_missing: c.n_missing,
                missing_share: c.missing_share,
                n_distinct: c.n_distinct,
                min: c.min,
                max: c.max,
                mean: c.mean,
            })
            .collect()
    }
}

/// Single-pass min/max/mean accumulator.
#[derive(Debug, Clone)]
struct RunningStats {
    count: usize,
    mean: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// `(min, max, mean)`, or `None` if nothing was added.
    fn finish(&self) -> Option<(f64, f64, f64)> {
        (self.count > 0).then_some((self.min, self.max, self.mean))
    }
}

/// Share of `count` in `total`, 0 when `total` is 0.
pub(crate) fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Compute descriptive statistics for every column of `table`.
pub fn summarize(table: &Table) -> DatasetSummary {
    let n_rows = table.n_rows();
    let columns = table
        .columns()
        .iter()
        .map(|column| summarize_column(column, n_rows))
        .collect();

    DatasetSummary {
        n_rows,
        n_cols: table.n_cols(),
        columns,
    }
}

fn summarize_column(column: &Column, n_rows: usize) -> ColumnSummary {
    let mut seen: HashSet<ValueKey<'_>> = HashSet::new();
    let mut n_missing = 0;
    let mut n_present = 0;
    let mut example_values = Vec::new();

    for (row, key) in column.values.keys().enumerate() {
        match key {
            None => n_missing += 1,
            Some(key) => {
                n_present += 1;
                if seen.insert(key) && example_values.len() < EXAMPLE_VALUES {
                    if let Some(v) = column.values.display_value(row) {
                        example_values.push(v);
                    }
                }
            }
        }
    }

    let mut stats = RunningStats::new();
    for value in column.values.numbers() {
        stats.add(value);
    }
    let numeric = stats.finish();

    ColumnSummary {
        name: column.name.clone(),
        dtype: column.dtype(),
        n_missing,
        missing_share: share(n_missing, n_rows),
        n_distinct: seen.len(),
        unique: seen.len() == n_present,
        example_values,
        min: numeric.map(|(min, _, _)| min),
        max: numeric.map(|(_, max, _)| max),
        mean: numeric.map(|(_, _, mean)| mean),
    }
}
