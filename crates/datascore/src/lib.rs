//! DataScore: heuristic data quality flags and scores for tabular datasets.
//!
//! A dataset is parsed into a typed [`Table`], summarized per column, profiled
//! for missing values, and run through a fixed battery of quality heuristics
//! that fold into a single score in `[0, 1]`.
//!
//! # Core Principles
//!
//! - **Deterministic**: the same table and config always give the same result
//! - **Explicit config**: thresholds travel with each call, never as globals
//! - **Read-only**: input data is never modified
//!
//! # Example
//!
//! ```no_run
//! use datascore::DataScore;
//!
//! let report = DataScore::new().analyze("measurements.csv").unwrap();
//!
//! println!("Score: {:.2}", report.flags.quality_score);
//! println!("Constant columns: {:?}", report.flags.constant_columns);
//! ```

pub mod error;
pub mod explore;
pub mod input;
pub mod profile;
pub mod quality;
pub mod schema;

mod datascore;

pub use crate::datascore::{DataScore, DataScoreConfig, QualityReport};
pub use error::{DataScoreError, Result};
pub use explore::{correlation_matrix, top_categories, CategoryCount, CorrelationMatrix};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use profile::{
    profile_missing, summarize, ColumnSummary, DatasetSummary, MissingEntry, MissingTable,
    SummaryRow,
};
pub use quality::{
    assess_parameters, evaluate_quality, FlagsBundle, ParameterAssessment, ParameterFlags,
    PenaltyTable, QualityConfig, QualityFlag, QualityParams,
};
pub use schema::{Column, ColumnValues, DType, Table};
