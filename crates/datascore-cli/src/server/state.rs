//! Application state for the web server.

use std::sync::Arc;

use datascore::{DataScore, QualityConfig};

/// Uploads above this size are rejected unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state.
///
/// Immutable once the server starts; every request reads the same scorer.
#[derive(Clone)]
pub struct AppState {
    /// Parser and thresholds used for every request.
    pub scorer: Arc<DataScore>,
    /// Largest accepted request body.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create new application state. `quality` should already be validated.
    pub fn new(quality: QualityConfig) -> Self {
        Self {
            scorer: Arc::new(DataScore::new().with_quality(quality)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    pub fn quality(&self) -> &QualityConfig {
        &self.scorer.config().quality
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}
