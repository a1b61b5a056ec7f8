//! Typed tables and column classification.

mod table;
mod types;

pub use table::{Column, Table};
pub use types::{ColumnValues, DType, ValueKey};

pub(crate) use types::format_number;
