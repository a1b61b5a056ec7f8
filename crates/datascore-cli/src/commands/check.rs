//! Check command - score a data file and list the triggered flags.

use std::path::PathBuf;

use colored::Colorize;
use datascore::{DataScore, FlagsBundle, QualityConfig, QualityFlag, QualityReport};

pub fn run(
    file: PathBuf,
    json: bool,
    config: QualityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    super::ensure_exists(&file)?;
    config.validate()?;

    let report = DataScore::new().with_quality(config).analyze(&file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&file, &report);
    Ok(())
}

fn print_report(file: &std::path::Path, report: &QualityReport) {
    println!(
        "{} {}",
        "Checked".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "  {} rows, {} columns ({:.2} ms)",
        report.summary.n_rows.to_string().white().bold(),
        report.summary.n_cols.to_string().white().bold(),
        report.latency_ms
    );
    println!();

    let score = format!("{:.4}", report.flags.quality_score);
    let score = if report.ok_for_model {
        score.green().bold()
    } else {
        score.red().bold()
    };
    println!("Quality score: {}", score);

    let triggered = report.flags.triggered();
    if triggered.is_empty() {
        println!("{}", "No quality flags raised".green());
    } else {
        println!();
        println!("{}", "Flags:".yellow().bold());
        for flag in triggered {
            match evidence(&report.flags, flag) {
                Some(columns) => println!("  {} {}", flag.to_string().yellow(), columns.dimmed()),
                None => println!("  {}", flag.to_string().yellow()),
            }
        }
    }

    println!();
    if report.ok_for_model {
        println!("{}", "OK for modelling".green().bold());
    } else {
        println!("{}", "Not OK for modelling".red().bold());
    }
}

/// Columns behind a column-level flag, as `(a, b)`.
fn evidence(flags: &FlagsBundle, flag: QualityFlag) -> Option<String> {
    let columns = match flag {
        QualityFlag::HasConstantColumns => &flags.constant_columns,
        QualityFlag::HasHighCardinalityCategoricals => &flags.high_cardinality_columns,
        QualityFlag::HasSuspiciousIdDuplicates => &flags.suspicious_id_columns,
        QualityFlag::HasManyZeroValues => &flags.high_zero_columns,
        QualityFlag::TooManyMissing => {
            return Some(format!("(max share {:.2})", flags.max_missing_share));
        }
        _ => return None,
    };
    Some(format!("({})", columns.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_lists_columns() {
        let flags = FlagsBundle {
            has_constant_columns: true,
            constant_columns: vec!["a".to_string(), "b".to_string()],
            ..FlagsBundle::default()
        };

        assert_eq!(
            evidence(&flags, QualityFlag::HasConstantColumns).as_deref(),
            Some("(a, b)")
        );
        assert_eq!(evidence(&flags, QualityFlag::TooFewRows), None);
    }

    #[test]
    fn test_run_rejects_missing_file() {
        let err = run(
            PathBuf::from("/no/such/file.csv"),
            false,
            QualityConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
