//! Descriptive helpers that do not affect the quality score.

mod categories;
mod correlation;

pub use categories::{top_categories, CategoryCount};
pub use correlation::{correlation_matrix, CorrelationMatrix};
