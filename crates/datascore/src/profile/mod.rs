//! Column summaries and missing-value profiles.

mod missing;
mod summary;

pub use missing::{profile_missing, MissingEntry, MissingTable};
pub use summary::{summarize, ColumnSummary, DatasetSummary, SummaryRow};

pub(crate) use summary::share;
