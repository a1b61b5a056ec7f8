//! Parameter-only assessment, for callers that only know a dataset's shape.

use serde::{Deserialize, Serialize};

use super::config::{check_share, QualityConfig, QualityFlag};
use super::flags::compose_score;
use crate::error::Result;

/// Shape and missingness of a dataset, without its values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityParams {
    pub n_rows: usize,
    pub n_cols: usize,
    #[serde(default)]
    pub missing_share: f64,
}

impl QualityParams {
    pub fn validate(&self) -> Result<()> {
        check_share("missing_share", self.missing_share)
    }
}

/// The three flags that can be decided from shape alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
}

/// Result of [`assess_parameters`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterAssessment {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub flags: ParameterFlags,
}

/// Reduced heuristic: `1 - missing_share`, minus penalties for the shape flags.
///
/// `too_many_missing` is reported but not penalized; missingness is already
/// in the base.
pub fn assess_parameters(
    params: &QualityParams,
    config: &QualityConfig,
) -> Result<ParameterAssessment> {
    params.validate()?;

    let flags = ParameterFlags {
        too_few_rows: params.n_rows < config.row_threshold,
        too_many_columns: params.n_cols > config.col_threshold,
        too_many_missing: params.missing_share > config.missing_share_threshold,
    };

    let triggered: Vec<QualityFlag> = [
        (flags.too_few_rows, QualityFlag::TooFewRows),
        (flags.too_many_columns, QualityFlag::TooManyColumns),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();

    let quality_score = compose_score(1.0 - params.missing_share, &triggered, &config.penalties);

    Ok(ParameterAssessment {
        ok_for_model: is_ok_for_model(quality_score, params.n_rows, config),
        quality_score,
        flags,
    })
}

/// Usable for modelling: score at or above the cutoff and enough rows.
pub fn is_ok_for_model(quality_score: f64, n_rows: usize, config: &QualityConfig) -> bool {
    quality_score >= config.ok_score_threshold && n_rows >= config.row_threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataScoreError;
    use crate::quality::PenaltyTable;

    #[test]
    fn test_healthy_params() {
        let params = QualityParams {
            n_rows: 1000,
            n_cols: 10,
            missing_share: 0.1,
        };
        let result = assess_parameters(&params, &QualityConfig::default()).unwrap();
        assert!(result.ok_for_model);
        assert!((result.quality_score - 0.9).abs() < 1e-12);
        assert!(!result.flags.too_few_rows);
    }

    #[test]
    fn test_small_dataset_penalized() {
        let params = QualityParams {
            n_rows: 10,
            n_cols: 200,
            missing_share: 0.0,
        };
        let result = assess_parameters(&params, &QualityConfig::default()).unwrap();
        assert!(result.flags.too_few_rows);
        assert!(result.flags.too_many_columns);
        assert!((result.quality_score - 0.7).abs() < 1e-12);
        assert!(!result.ok_for_model);
    }

    #[test]
    fn test_missing_share_lowers_base_only() {
        let params = QualityParams {
            n_rows: 500,
            n_cols: 5,
            missing_share: 0.6,
        };
        let result = assess_parameters(&params, &QualityConfig::default()).unwrap();
        assert!(result.flags.too_many_missing);
        assert!((result.quality_score - 0.4).abs() < 1e-12);
        assert!(!result.ok_for_model);
    }

    #[test]
    fn test_missing_flag_penalty_is_not_applied() {
        let penalties = PenaltyTable::default().with(QualityFlag::TooManyMissing, 1.0);
        let config = QualityConfig::default().with_penalties(penalties);
        let params = QualityParams {
            n_rows: 500,
            n_cols: 5,
            missing_share: 0.3,
        };
        let result = assess_parameters(&params, &config.with_missing_share_threshold(0.2)).unwrap();
        assert!(result.flags.too_many_missing);
        assert!((result.quality_score - 0.7).abs() < 1e-12);
        assert!(result.ok_for_model);
    }

    #[test]
    fn test_invalid_share_rejected() {
        let params = QualityParams {
            n_rows: 5,
            n_cols: 5,
            missing_share: 1.2,
        };
        assert!(matches!(
            assess_parameters(&params, &QualityConfig::default()),
            Err(DataScoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_share_defaults_to_zero() {
        let params: QualityParams = serde_json::from_str(r#"{"n_rows": 3, "n_cols": 2}"#).unwrap();
        assert_eq!(params.missing_share, 0.0);
    }
}
