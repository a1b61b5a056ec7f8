//! Quality evaluation configuration.
//!
//! Thresholds and score penalties are plain values passed into every
//! evaluation, so callers can run with different settings side by side.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DataScoreError, Result};

/// The heuristics the engine evaluates, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    TooFewRows,
    TooManyColumns,
    TooManyMissing,
    HasConstantColumns,
    HasHighCardinalityCategoricals,
    HasSuspiciousIdDuplicates,
    HasManyZeroValues,
}

impl QualityFlag {
    pub const ALL: [QualityFlag; 7] = [
        QualityFlag::TooFewRows,
        QualityFlag::TooManyColumns,
        QualityFlag::TooManyMissing,
        QualityFlag::HasConstantColumns,
        QualityFlag::HasHighCardinalityCategoricals,
        QualityFlag::HasSuspiciousIdDuplicates,
        QualityFlag::HasManyZeroValues,
    ];

    /// Field name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            QualityFlag::TooFewRows => "too_few_rows",
            QualityFlag::TooManyColumns => "too_many_columns",
            QualityFlag::TooManyMissing => "too_many_missing",
            QualityFlag::HasConstantColumns => "has_constant_columns",
            QualityFlag::HasHighCardinalityCategoricals => "has_high_cardinality_categoricals",
            QualityFlag::HasSuspiciousIdDuplicates => "has_suspicious_id_duplicates",
            QualityFlag::HasManyZeroValues => "has_many_zero_values",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Score deduction applied for each triggered flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyTable {
    pub too_few_rows: f64,
    pub too_many_columns: f64,
    pub too_many_missing: f64,
    pub has_constant_columns: f64,
    pub has_high_cardinality_categoricals: f64,
    pub has_suspicious_id_duplicates: f64,
    pub has_many_zero_values: f64,
}

impl Default for PenaltyTable {
    fn default() -> Self {
        Self {
            too_few_rows: 0.2,
            too_many_columns: 0.1,
            too_many_missing: 0.15,
            has_constant_columns: 0.1,
            has_high_cardinality_categoricals: 0.05,
            has_suspicious_id_duplicates: 0.1,
            has_many_zero_values: 0.05,
        }
    }
}

impl PenaltyTable {
    /// Penalty for a single flag.
    pub fn get(&self, flag: QualityFlag) -> f64 {
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

    /// Builder method to override one penalty.
    pub fn with(mut self, flag: QualityFlag, penalty: f64) -> Self {
        let slot = match flag {
            QualityFlag::TooFewRows => &mut self.too_few_rows,
            QualityFlag::TooManyColumns => &mut self.too_many_columns,
            QualityFlag::TooManyMissing => &mut self.too_many_missing,
            QualityFlag::HasConstantColumns => &mut self.has_constant_columns,
            QualityFlag::HasHighCardinalityCategoricals => {
                &mut self.has_high_cardinality_categoricals
            }
            QualityFlag::HasSuspiciousIdDuplicates => &mut self.has_suspicious_id_duplicates,
            QualityFlag::HasManyZeroValues => &mut self.has_many_zero_values,
        };
        *slot = penalty;
        self
    }

    /// Penalties must be finite and non-negative; that keeps the score monotonic.
    pub fn validate(&self) -> Result<()> {
        for flag in QualityFlag::ALL {
            let value = self.get(flag);
            if !value.is_finite() || value < 0.0 {
                return Err(DataScoreError::InvalidConfig(format!(
                    "penalty for {} must be a non-negative number, got {}",
                    flag, value
                )));
            }
        }
        Ok(())
    }
}

/// Thresholds for the quality heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum rows before `too_few_rows` clears.
    pub row_threshold: usize,
    /// Maximum columns before `too_many_columns` fires.
    pub col_threshold: usize,
    /// Largest allowed per-column missing share (0.0-1.0).
    pub missing_share_threshold: f64,
    /// Distinct values above which a categorical column is high-cardinality.
    pub high_cardinality_threshold: usize,
    /// Share of zeros above which a numeric column is flagged (0.0-1.0).
    pub zero_share_threshold: f64,
    /// Case-insensitive substring marking identifier columns.
    pub id_marker: String,
    /// Minimum score for a dataset to be considered usable (0.0-1.0).
    pub ok_score_threshold: f64,
    pub penalties: PenaltyTable,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            row_threshold: 100,
            col_threshold: 100,
            missing_share_threshold: 0.5,
            high_cardinality_threshold: 50,
            zero_share_threshold: 0.5,
            id_marker: "id".to_string(),
            ok_score_threshold: 0.5,
            penalties: PenaltyTable::default(),
        }
    }
}

impl QualityConfig {
    /// Creates a new quality config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| DataScoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_row_threshold(mut self, rows: usize) -> Self {
        self.row_threshold = rows;
        self
    }

    pub fn with_col_threshold(mut self, cols: usize) -> Self {
        self.col_threshold = cols;
        self
    }

    pub fn with_missing_share_threshold(mut self, share: f64) -> Self {
        self.missing_share_threshold = share;
        self
    }

    pub fn with_high_cardinality_threshold(mut self, distinct: usize) -> Self {
        self.high_cardinality_threshold = distinct;
        self
    }

    pub fn with_zero_share_threshold(mut self, share: f64) -> Self {
        self.zero_share_threshold = share;
        self
    }

    pub fn with_id_marker(mut self, marker: impl Into<String>) -> Self {
        self.id_marker = marker.into();
        self
    }

    pub fn with_penalties(mut self, penalties: PenaltyTable) -> Self {
        self.penalties = penalties;
        self
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<()> {
        check_share("missing_share_threshold", self.missing_share_threshold)?;
        check_share("zero_share_threshold", self.zero_share_threshold)?;
        check_share("ok_score_threshold", self.ok_score_threshold)?;
        if self.id_marker.trim().is_empty() {
            return Err(DataScoreError::InvalidConfig(
                "id_marker must not be empty".to_string(),
            ));
        }
        self.penalties.validate()
    }

    /// Whether a column name matches the identifier naming convention.
    pub fn is_id_column(&self, name: &str) -> bool {
        name.to_lowercase()
            .contains(&self.id_marker.to_lowercase())
    }
}

pub(crate) fn check_share(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DataScoreError::InvalidConfig(format!(
            "{} must be between 0.0 and 1.0, got {}",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = QualityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.row_threshold, 100);
        assert_eq!(config.col_threshold, 100);
        assert_eq!(config.missing_share_threshold, 0.5);
    }

    #[test]
    fn test_share_out_of_range_rejected() {
        let config = QualityConfig::new().with_zero_share_threshold(1.5);
        assert!(matches!(
            config.validate(),
            Err(DataScoreError::InvalidConfig(_))
        ));

        let config = QualityConfig::new().with_missing_share_threshold(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let penalties = PenaltyTable::default().with(QualityFlag::TooManyColumns, -0.1);
        let config = QualityConfig::new().with_penalties(penalties);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_id_marker_rejected() {
        assert!(QualityConfig::new().with_id_marker(" ").validate().is_err());
    }

    #[test]
    fn test_id_column_match_is_case_insensitive() {
        let config = QualityConfig::default();
        assert!(config.is_id_column("user_id"));
        assert!(config.is_id_column("OrderID"));
        assert!(!config.is_id_column("name"));
    }

    #[test]
    fn test_penalty_lookup_covers_every_flag() {
        let table = PenaltyTable::default();
        let total: f64 = QualityFlag::ALL.iter().map(|f| table.get(*f)).sum();
        assert!((total - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"row_threshold": 10, "penalties": {"too_few_rows": 0.3}}"#)
            .unwrap();

        let config = QualityConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.row_threshold, 10);
        assert_eq!(config.col_threshold, 100);
        assert_eq!(config.penalties.too_few_rows, 0.3);
        assert_eq!(config.penalties.too_many_columns, 0.1);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"zero_share_threshold": 2.0}"#).unwrap();
        assert!(matches!(
            QualityConfig::from_json_file(file.path()),
            Err(DataScoreError::InvalidConfig(_))
        ));
    }
}
