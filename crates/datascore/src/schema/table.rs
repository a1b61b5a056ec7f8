//! Typed, rectangular tables.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ColumnValues, DType};
use crate::error::{DataScoreError, Result};
use crate::input::DataTable;

// Cheap shape check before handing a value to chrono.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d{4}-\d{2}-\d{2}",  // ISO date
        r"^\d{2}/\d{2}/\d{4}",  // US date
        r"^\d{2}\.\d{2}\.\d{4}", // European date
        r"^\d{4}/\d{2}/\d{2}",  // Alt ISO
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// A named column with its classified values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    /// Create a column from already-typed values.
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Numeric column; `None` marks a missing entry.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnValues::Numeric(values))
    }

    /// Text column; `None` marks a missing entry.
    pub fn categorical<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnValues::Categorical(values))
    }

    /// Classify raw string cells once: numeric, then date/time, then text.
    ///
    /// Null markers (see [`DataTable::is_null_value`]) become missing entries.
    /// A column with no non-null cells is stored as [`ColumnValues::Empty`].
    pub fn from_raw<'a>(name: impl Into<String>, raw: impl IntoIterator<Item = &'a str>) -> Self {
        let cells: Vec<Option<&str>> = raw
            .into_iter()
            .map(|v| (!DataTable::is_null_value(v)).then_some(v))
            .collect();

        let values = classify(&cells);
        Self::new(name, values)
    }

    pub fn dtype(&self) -> DType {
        self.values.dtype()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn classify(cells: &[Option<&str>]) -> ColumnValues {
    if cells.iter().all(Option::is_none) {
        return ColumnValues::Empty(cells.len());
    }

    let numbers: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            Some(v) => v.trim().parse::<f64>().ok().map(Some),
            None => Some(None),
        })
        .collect();
    if let Some(numbers) = numbers {
        return ColumnValues::Numeric(numbers);
    }

    let timestamps: Option<Vec<Option<NaiveDateTime>>> = cells
        .iter()
        .map(|cell| match cell {
            Some(v) => parse_datetime(v.trim()).map(Some),
            None => Some(None),
        })
        .collect();
    if let Some(timestamps) = timestamps {
        return ColumnValues::DateTime(timestamps);
    }

    ColumnValues::Categorical(cells.iter().map(|c| c.map(str::to_string)).collect())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if !DATE_PATTERNS.iter().any(|re| re.is_match(value)) {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// An in-memory table whose columns all have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns, rejecting ragged input and repeated names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != n_rows) {
            return Err(DataScoreError::MalformedInput(format!(
                "column '{}' has {} values, expected {}",
                bad.name,
                bad.len(),
                n_rows
            )));
        }

        let mut names = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !names.insert(c.name.as_str())) {
            return Err(DataScoreError::MalformedInput(format!(
                "duplicate column name '{}'",
                dup.name
            )));
        }

        Ok(Self { columns, n_rows })
    }

    /// Classify every column of a parsed table.
    pub fn from_data_table(data: &DataTable) -> Self {
        let columns = data
            .headers
            .iter()
            .enumerate()
            .map(|(idx, name)| Column::from_raw(name.clone(), data.column_values(idx)))
            .collect();

        Self {
            columns,
            n_rows: data.row_count(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns of a given summary type, in table order.
    pub fn columns_of(&self, dtype: DType) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |c| c.dtype() == dtype)
    }
}
