//! Core type definitions for column classification.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Coarse data type reported in column summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    /// Every non-null value is a number.
    Numeric,
    /// Free text, category labels or date/time values.
    Categorical,
    /// Columns with no non-null values.
    Other,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Numeric => "numeric",
            DType::Categorical => "categorical",
            DType::Other => "other",
        };
        f.pad(name)
    }
}

/// Typed storage for one column. `None` marks a missing entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
    DateTime(Vec<Option<NaiveDateTime>>),
    /// A column where every entry is missing.
    Empty(usize),
}

/// Hashable view of a single non-null value, used for distinct and duplicate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey<'a> {
    Number(u64),
    Text(&'a str),
    Timestamp(NaiveDateTime),
}

impl ColumnValues {
    /// Number of entries, missing ones included.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
            ColumnValues::DateTime(v) => v.len(),
            ColumnValues::Empty(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The summary type for this storage.
    pub fn dtype(&self) -> DType {
        match self {
            ColumnValues::Numeric(_) => DType::Numeric,
            ColumnValues::Categorical(_) | ColumnValues::DateTime(_) => DType::Categorical,
            ColumnValues::Empty(_) => DType::Other,
        }
    }

    /// Count of missing entries. NaN counts as missing.
    pub fn null_count(&self) -> usize {
        self.keys().filter(Option::is_none).count()
    }

    /// Per-entry keys in row order, `None` for missing entries.
    pub fn keys(&self) -> Box<dyn Iterator<Item = Option<ValueKey<'_>>> + '_> {
        match self {
            ColumnValues::Numeric(v) => Box::new(v.iter().map(|x| match x {
                Some(n) if !n.is_nan() => Some(ValueKey::Number(number_bits(*n))),
                _ => None,
            })),
            ColumnValues::Categorical(v) => {
                Box::new(v.iter().map(|x| x.as_deref().map(ValueKey::Text)))
            }
            ColumnValues::DateTime(v) => {
                Box::new(v.iter().map(|x| x.map(ValueKey::Timestamp)))
            }
            ColumnValues::Empty(n) => Box::new(std::iter::repeat_n(None, *n)),
        }
    }

    /// Non-null numeric values in row order; empty for non-numeric columns.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        let values: &[Option<f64>] = match self {
            ColumnValues::Numeric(v) => v,
            _ => &[],
        };
        values.iter().filter_map(|&x| x.filter(|n| !n.is_nan()))
    }

    /// Render the value at `row` for display, `None` if missing.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match self {
            ColumnValues::Numeric(v) => v
                .get(row)
                .copied()
                .flatten()
                .filter(|n| !n.is_nan())
                .map(format_number),
            ColumnValues::Categorical(v) => v.get(row).cloned().flatten(),
            ColumnValues::DateTime(v) => v.get(row).copied().flatten().map(format_timestamp),
            ColumnValues::Empty(_) => None,
        }
    }
}

/// Bit pattern used for equality of floats; `-0.0` folds into `0.0`.
fn number_bits(n: f64) -> u64 {
    if n == 0.0 { 0.0f64.to_bits() } else { n.to_bits() }
}

/// Dates without a time of day render as `YYYY-MM-DD`.
fn format_timestamp(t: NaiveDateTime) -> String {
    if t.time() == NaiveTime::MIN {
        t.date().to_string()
    } else {
        t.to_string()
    }
}

/// Format a number without a trailing `.0` for whole values.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
