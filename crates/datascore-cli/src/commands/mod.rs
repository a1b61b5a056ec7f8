//! CLI command implementations.

pub mod check;
pub mod serve;
pub mod summary;

use std::path::Path;

use datascore::QualityConfig;

/// Load thresholds from `--config`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<QualityConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading quality config");
            Ok(QualityConfig::from_json_file(path)?)
        }
        None => Ok(QualityConfig::default()),
    }
}

/// Fail early with a readable message instead of a parser I/O error.
pub(crate) fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
