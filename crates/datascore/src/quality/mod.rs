//! Quality flag engine.
//!
//! A fixed battery of heuristics over a [`DatasetSummary`](crate::DatasetSummary),
//! its [`MissingTable`](crate::MissingTable) and optionally the raw
//! [`Table`](crate::Table), folded into a single score in `[0, 1]`.

mod config;
mod flags;
mod params;

pub use config::{PenaltyTable, QualityConfig, QualityFlag};
pub use flags::{compose_score, evaluate_quality, FlagsBundle};
pub use params::{
    assess_parameters, is_ok_for_model, ParameterAssessment, ParameterFlags, QualityParams,
};
