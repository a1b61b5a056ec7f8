//! DataScore CLI - heuristic data quality checks and HTTP service.

mod cli;
mod commands;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = commands::load_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Check {
                file,
                json,
                thresholds,
            } => commands::check::run(file, json, thresholds.apply(config)),

            Commands::Summary {
                file,
                top_k,
                max_columns,
                json,
            } => commands::summary::run(file, top_k, max_columns, json),

            Commands::Serve {
                host,
                port,
                max_upload_mb,
                thresholds,
            } => commands::serve::run(host, port, max_upload_mb, thresholds.apply(config)),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
