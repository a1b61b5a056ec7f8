//! Main DataScore struct and public API.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{DataScoreError, Result};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::profile::{profile_missing, summarize, DatasetSummary, MissingTable};
use crate::quality::{evaluate_quality, is_ok_for_model, FlagsBundle, QualityConfig};
use crate::schema::Table;

/// Configuration for a DataScore run.
#[derive(Debug, Clone, Default)]
pub struct DataScoreConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Quality thresholds and penalties.
    pub quality: QualityConfig,
}

/// Result of scoring one dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// Where the data came from; absent for tables built in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub summary: DatasetSummary,
    pub missing: MissingTable,
    pub flags: FlagsBundle,
    /// Score at or above the cutoff and enough rows.
    pub ok_for_model: bool,
    /// Wall-clock time spent, parsing included.
    pub latency_ms: f64,
}

/// Parses tabular data and runs the quality engine over it.
#[derive(Debug, Clone, Default)]
pub struct DataScore {
    config: DataScoreConfig,
    parser: Parser,
}

impl DataScore {
    /// Create a new instance with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an instance with custom configuration.
    pub fn with_config(config: DataScoreConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Replace the quality thresholds.
    pub fn with_quality(mut self, quality: QualityConfig) -> Self {
        self.config.quality = quality;
        self
    }

    pub fn config(&self) -> &DataScoreConfig {
        &self.config
    }

    /// Parse a file into a typed table.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let (data, source) = self.parser.parse_file(path)?;
        Ok((Table::from_data_table(&data), source))
    }

    /// Parse an in-memory buffer into a typed table.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<(Table, SourceMetadata)> {
        let (data, source) = self.parser.parse_bytes(bytes)?;
        Ok((Table::from_data_table(&data), source))
    }

    /// Score a delimited file.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<QualityReport> {
        let started = Instant::now();
        let (table, source) = self.load(path)?;
        self.score(table, Some(source), started)
    }

    /// Score an uploaded buffer.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<QualityReport> {
        let started = Instant::now();
        let (table, source) = self.load_bytes(bytes)?;
        self.score(table, Some(source), started)
    }

    /// Score a table that is already in memory.
    pub fn analyze_table(&self, table: Table) -> Result<QualityReport> {
        self.score(table, None, Instant::now())
    }

    fn score(
        &self,
        table: Table,
        source: Option<SourceMetadata>,
        started: Instant,
    ) -> Result<QualityReport> {
        let quality = &self.config.quality;
        quality.validate()?;

        if table.n_rows() == 0 {
            return Err(DataScoreError::EmptyDataset(
                "table has no rows".to_string(),
            ));
        }

        let summary = summarize(&table);
        let missing = profile_missing(&table);
        let flags = evaluate_quality(&summary, &missing, Some(&table), quality);
        let ok_for_model = is_ok_for_model(flags.quality_score, summary.n_rows, quality);
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            rows = summary.n_rows,
            columns = summary.n_cols,
            score = flags.quality_score,
            ok_for_model,
            latency_ms,
            "scored dataset"
        );

        Ok(QualityReport {
            source,
            summary,
            missing,
            flags,
            ok_for_model,
            latency_ms,
        })
    }
}
