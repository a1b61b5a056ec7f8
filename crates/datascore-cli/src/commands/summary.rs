//! Summary command - per-column statistics, top categories and correlations.

use std::path::PathBuf;

use colored::Colorize;
use datascore::{
    correlation_matrix, summarize, top_categories, CategoryCount, CorrelationMatrix, DataScore,
    DatasetSummary,
};
use indexmap::IndexMap;
use serde::Serialize;

/// Correlations at or above this magnitude are listed in text output.
const STRONG_CORRELATION: f64 = 0.7;

#[derive(Serialize)]
struct SummaryOutput {
    summary: DatasetSummary,
    top_categories: IndexMap<String, Vec<CategoryCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation: Option<CorrelationMatrix>,
}

pub fn run(
    file: PathBuf,
    top_k: usize,
    max_columns: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    super::ensure_exists(&file)?;

    let (table, _source) = DataScore::new().load(&file)?;
    let output = SummaryOutput {
        summary: summarize(&table),
        top_categories: top_categories(&table, max_columns, top_k),
        correlation: correlation_matrix(&table),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Summary of".cyan().bold(),
        file.display().to_string().white(),
        output.summary.n_rows,
        output.summary.n_cols
    );
    println!();
    print_columns(&output.summary);

    if !output.top_categories.is_empty() {
        println!();
        println!("{}", "Top values:".yellow().bold());
        for (column, counts) in &output.top_categories {
            println!("  {}", column.white().bold());
            for entry in counts {
                println!(
                    "    {:24} {:>6} {:>6.1}%",
                    entry.value,
                    entry.count,
                    entry.share * 100.0
                );
            }
        }
    }

    if let Some(ref corr) = output.correlation {
        let pairs = corr.strong_pairs(STRONG_CORRELATION);
        if !pairs.is_empty() {
            println!();
            println!("{}", "Strong correlations:".yellow().bold());
            for (a, b, r) in pairs {
                println!("  {} ~ {} {}", a, b, format!("r={:.3}", r).dimmed());
            }
        }
    }

    Ok(())
}

fn print_columns(summary: &DatasetSummary) {
    println!(
        "  {:20} {:12} {:>8} {:>8} {:>9} {:>10} {:>10} {:>10}",
        "column".bold(),
        "dtype".bold(),
        "missing".bold(),
        "share".bold(),
        "distinct".bold(),
        "min".bold(),
        "max".bold(),
        "mean".bold()
    );
    for row in summary.flatten() {
        let share = format!("{:.3}", row.missing_share);
        let share = if row.missing_share > 0.0 {
            share.yellow()
        } else {
            share.normal()
        };
        println!(
            "  {:20} {:12} {:>8} {:>8} {:>9} {:>10} {:>10} {:>10}",
            row.name,
            row.dtype,
            row.n_missing,
            share,
            row.n_distinct,
            stat(row.min),
            stat(row.max),
            stat(row.mean)
        );
    }
}

fn stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}
