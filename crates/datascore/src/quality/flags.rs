//! Quality flag evaluation and score composition.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::config::{PenaltyTable, QualityConfig, QualityFlag};
use crate::profile::{DatasetSummary, MissingTable};
use crate::schema::{Column, DType, Table, ValueKey};

/// Flags, their evidence and the folded quality score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagsBundle {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub has_suspicious_id_duplicates: bool,
    pub has_many_zero_values: bool,
    /// Overall score in `[0, 1]`.
    pub quality_score: f64,
    /// Largest per-column missing share.
    pub max_missing_share: f64,
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<String>,
    pub suspicious_id_columns: Vec<String>,
    pub high_zero_columns: Vec<String>,
}

impl FlagsBundle {
    /// Whether a given flag fired.
    pub fn is_set(&self, flag: QualityFlag) -> bool {
        match flag {
            QualityFlag::TooFewRows => self.too_few_rows,
            QualityFlag::TooManyColumns => self.too_many_columns,
            QualityFlag::TooManyMissing => self.too_many_missing,
            QualityFlag::HasConstantColumns => self.has_constant_columns,
            QualityFlag::HasHighCardinalityCategoricals => {
                self.has_high_cardinality_categoricals
            }
            QualityFlag::HasSuspiciousIdDuplicates => self.has_suspicious_id_duplicates,
            QualityFlag::HasManyZeroValues => self.has_many_zero_values,
        }
    }

    /// Flags that fired, in evaluation order.
    pub fn triggered(&self) -> Vec<QualityFlag> {
        QualityFlag::ALL
            .into_iter()
            .filter(|f| self.is_set(*f))
            .collect()
    }
}

/// Start from `base`, subtract the penalty of every triggered flag, clamp to `[0, 1]`.
pub fn compose_score(base: f64, triggered: &[QualityFlag], penalties: &PenaltyTable) -> f64 {
    let penalty: f64 = triggered.iter().map(|f| penalties.get(*f)).sum();
    (base - penalty).clamp(0.0, 1.0)
}

/// Run every heuristic and fold the results into a [`FlagsBundle`].
///
/// Heuristics that need raw values (constant columns, duplicate ids, zero
/// density) only run when `table` is given; otherwise they report nothing.
pub fn evaluate_quality(
    summary: &DatasetSummary,
    missing: &MissingTable,
    table: Option<&Table>,
    config: &QualityConfig,
) -> FlagsBundle {
    let n_rows = summary.n_rows;
    let max_missing_share = missing.max_share();

    let too_few_rows = n_rows < config.row_threshold;
    let too_many_columns = summary.n_cols > config.col_threshold;
    let too_many_missing = n_rows > 0 && max_missing_share > config.missing_share_threshold;

    let high_cardinality_columns: Vec<String> = summary
        .columns
        .iter()
        .filter(|c| {
            c.dtype == DType::Categorical && c.n_distinct > config.high_cardinality_threshold
        })
        .map(|c| c.name.clone())
        .collect();

    let (constant_columns, suspicious_id_columns, high_zero_columns) = match table {
        Some(table) => (
            names_where(table, is_constant),
            names_where(table, |c| config.is_id_column(&c.name) && has_duplicates(c)),
            names_where(table, |c| {
                n_rows > 0 && zero_share(c, n_rows) > config.zero_share_threshold
            }),
        ),
        None => (Vec::new(), Vec::new(), Vec::new()),
    };

    let mut bundle = FlagsBundle {
        too_few_rows,
        too_many_columns,
        too_many_missing,
        has_constant_columns: !constant_columns.is_empty(),
        has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
        has_suspicious_id_duplicates: !suspicious_id_columns.is_empty(),
        has_many_zero_values: !high_zero_columns.is_empty(),
        quality_score: 0.0,
        max_missing_share,
        constant_columns,
        high_cardinality_columns,
        suspicious_id_columns,
        high_zero_columns,
    };

    let base = 1.0 - missing.overall_share(n_rows);
    bundle.quality_score = compose_score(base, &bundle.triggered(), &config.penalties);

    tracing::debug!(
        score = bundle.quality_score,
        triggered = ?bundle.triggered(),
        "evaluated quality flags"
    );

    bundle
}

fn names_where(table: &Table, predicate: impl Fn(&Column) -> bool) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|&c| predicate(c))
        .map(|c| c.name.clone())
        .collect()
}

/// Exactly one distinct non-null value.
fn is_constant(column: &Column) -> bool {
    let mut first: Option<ValueKey<'_>> = None;
    for key in column.values.keys().flatten() {
        match first {
            None => first = Some(key),
            Some(seen) if seen != key => return false,
            Some(_) => {}
        }
    }
    first.is_some()
}

/// Some non-null value appears more than once.
fn has_duplicates(column: &Column) -> bool {
    let mut seen = HashSet::new();
    column.values.keys().flatten().any(|key| !seen.insert(key))
}

/// Share of exact zeros among all rows; 0 for non-numeric columns.
fn zero_share(column: &Column, n_rows: usize) -> f64 {
    let zeros = column.values.numbers().filter(|v| *v == 0.0).count();
    crate::profile::share(zeros, n_rows)
}
