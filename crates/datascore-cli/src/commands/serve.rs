//! Serve command - run the HTTP quality service.

use colored::Colorize;
use datascore::QualityConfig;

use crate::server::{self, AppState};

pub fn run(
    host: String,
    port: u16,
    max_upload_mb: usize,
    config: QualityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    println!(
        "{} on {}:{} (row threshold {}, column threshold {})",
        "Starting datascore service".cyan().bold(),
        host,
        port,
        config.row_threshold,
        config.col_threshold
    );
    println!("Press {} to stop", "Ctrl+C".yellow());

    let state = AppState::new(config).with_max_upload_bytes(upload_limit_bytes(max_upload_mb));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::run_server(state, &host, port))
}

/// Megabytes to bytes, saturating at `usize::MAX`.
fn upload_limit_bytes(megabytes: usize) -> usize {
    megabytes.saturating_mul(1024 * 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limit_bytes() {
        assert_eq!(upload_limit_bytes(16), 16 * 1024 * 1024);
        assert_eq!(upload_limit_bytes(0), 0);
        assert_eq!(upload_limit_bytes(usize::MAX), usize::MAX);
    }
}
