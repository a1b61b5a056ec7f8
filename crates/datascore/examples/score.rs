//! Example: score a delimited data file and print a quality breakdown.
//!
//! Usage:
//!   cargo run --example score -- <file_path>

use std::env;
use std::path::Path;

use datascore::{correlation_matrix, top_categories, DataScore};

fn main() -> datascore::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example score -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let scorer = DataScore::new();
    let report = scorer.analyze(path)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("DataScore: {}", path.display());
    println!("{}", separator);

    if let Some(ref source) = report.source {
        println!("  Format: {}", source.format);
        println!("  Hash:   {}", source.hash);
    }
    println!(
        "  {} rows x {} columns in {:.2} ms",
        report.summary.n_rows, report.summary.n_cols, report.latency_ms
    );
    println!();

    println!("## Columns");
    for column in &report.summary.columns {
        println!(
            "  {:20} {:12} missing={:<5.3} distinct={}",
            column.name, column.dtype, column.missing_share, column.n_distinct
        );
    }
    println!();

    println!("## Flags");
    for flag in report.flags.triggered() {
        println!("  - {}", flag);
    }
    println!("  score = {:.4}", report.flags.quality_score);
    println!("  ok_for_model = {}", report.ok_for_model);

    // Exploration helpers work on the typed table directly.
    let (table, _) = scorer.load(path)?;
    for (column, counts) in top_categories(&table, 3, 3) {
        let values: Vec<String> = counts
            .iter()
            .map(|c| format!("{} ({})", c.value, c.count))
            .collect();
        println!("  top {}: {}", column, values.join(", "));
    }
    if let Some(corr) = correlation_matrix(&table) {
        for (a, b, r) in corr.strong_pairs(0.7) {
            println!("  {} ~ {}: r = {:.3}", a, b, r);
        }
    }

    Ok(())
}
