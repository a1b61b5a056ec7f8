//! Error types for the datascore library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for datascore operations.
#[derive(Debug, Error)]
pub enum DataScoreError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input bytes could not be turned into a table.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Parsed table has no data rows.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A threshold or parameter is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataScoreError {
    /// Whether the error was caused by the caller's input rather than the host.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DataScoreError::Io { .. })
    }
}

/// Result type alias for datascore operations.
pub type Result<T> = std::result::Result<T, DataScoreError>;
