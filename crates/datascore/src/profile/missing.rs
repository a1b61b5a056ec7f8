//! Missing-value profile, one entry per column.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::summary::share;
use crate::schema::Table;

/// Missing counts for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub missing_count: usize,
    pub missing_share: f64,
}

/// Column name to missing counts, in table column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissingTable {
    entries: IndexMap<String, MissingEntry>,
}

impl MissingTable {
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MissingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest per-column missing share, 0 when there are no columns.
    pub fn max_share(&self) -> f64 {
        self.entries
            .values()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Missing cells over all cells.
    pub fn overall_share(&self, n_rows: usize) -> f64 {
        let missing: usize = self.entries.values().map(|e| e.missing_count).sum();
        share(missing, n_rows * self.entries.len())
    }
}

impl FromIterator<(String, MissingEntry)> for MissingTable {
    fn from_iter<I: IntoIterator<Item = (String, MissingEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Count missing entries per column.
pub fn profile_missing(table: &Table) -> MissingTable {
    let n_rows = table.n_rows();
    table
        .columns()
        .iter()
        .map(|column| {
            let missing_count = column.values.null_count();
            (
                column.name.clone(),
                MissingEntry {
                    missing_count,
                    missing_share: share(missing_count, n_rows),
                },
            )
        })
        .collect()
}
