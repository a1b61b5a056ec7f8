//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use datascore::QualityConfig;

/// DataScore: heuristic data quality checks for tabular files
#[derive(Parser)]
#[command(name = "datascore")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// JSON file with quality thresholds and penalties
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute quality flags and score for a data file
    Check {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Print per-column statistics, top categories and correlations
    Summary {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Most frequent values to show per categorical column
        #[arg(long, default_value = "5")]
        top_k: usize,

        /// Categorical columns to include in the top-values listing
        #[arg(long, default_value = "5")]
        max_columns: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP quality service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Largest accepted upload, in megabytes
        #[arg(long, default_value = "16")]
        max_upload_mb: usize,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
}

/// Per-run overrides for the quality thresholds.
#[derive(Args, Debug, Default, Clone)]
pub struct ThresholdArgs {
    /// Minimum rows before `too_few_rows` clears
    #[arg(long)]
    pub min_rows: Option<usize>,

    /// Maximum columns before `too_many_columns` fires
    #[arg(long)]
    pub max_cols: Option<usize>,

    /// Largest allowed per-column missing share (0.0-1.0)
    #[arg(long)]
    pub max_missing_share: Option<f64>,

    /// Distinct values above which a categorical column is flagged
    #[arg(long)]
    pub high_cardinality: Option<usize>,

    /// Share of zeros above which a numeric column is flagged (0.0-1.0)
    #[arg(long)]
    pub max_zero_share: Option<f64>,

    /// Substring marking identifier columns
    #[arg(long)]
    pub id_marker: Option<String>,
}

impl ThresholdArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, mut config: QualityConfig) -> QualityConfig {
        if let Some(rows) = self.min_rows {
            config.row_threshold = rows;
        }
        if let Some(cols) = self.max_cols {
            config.col_threshold = cols;
        }
        if let Some(share) = self.max_missing_share {
            config.missing_share_threshold = share;
        }
        if let Some(distinct) = self.high_cardinality {
            config.high_cardinality_threshold = distinct;
        }
        if let Some(share) = self.max_zero_share {
            config.zero_share_threshold = share;
        }
        if let Some(ref marker) = self.id_marker {
            config.id_marker = marker.clone();
        }
        config
    }
}
