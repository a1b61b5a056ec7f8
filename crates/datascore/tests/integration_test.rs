//! Integration tests for DataScore.

use std::io::Write;
use tempfile::NamedTempFile;

use datascore::{
    correlation_matrix, evaluate_quality, profile_missing, summarize, top_categories, Column,
    DType, DataScore, DataScoreError, QualityConfig, Table,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn load(csv: &str) -> Table {
    let (table, _) = DataScore::new()
        .load_bytes(csv.as_bytes())
        .expect("Failed to parse CSV");
    table
}

fn sample_csv() -> &'static str {
    "age,height,city\n\
     10,140,A\n\
     20,150,B\n\
     30,160,A\n\
     ,170,\n"
}

// =============================================================================
// Summary and Missing Profile
// =============================================================================

#[test]
fn test_summarize_sample_dataset() {
    let table = load(sample_csv());
    let summary = summarize(&table);

    assert_eq!(summary.n_rows, 4);
    assert_eq!(summary.n_cols, 3);
    assert_eq!(summary.column("age").unwrap().dtype, DType::Numeric);
    assert_eq!(summary.column("city").unwrap().dtype, DType::Categorical);

    let rows = summary.flatten();
    assert!(rows.iter().any(|r| r.name == "age"));
    assert!(rows.iter().any(|r| r.name == "city"));
}

#[test]
fn test_missing_table_sample_dataset() {
    let table = load(sample_csv());
    let missing = profile_missing(&table);

    assert_eq!(missing.get("age").unwrap().missing_count, 1);
    assert_eq!(missing.get("height").unwrap().missing_count, 0);
    assert_eq!(missing.get("city").unwrap().missing_share, 0.25);

    let summary = summarize(&table);
    let flags = evaluate_quality(&summary, &missing, None, &QualityConfig::default());
    assert!((0.0..=1.0).contains(&flags.quality_score));
}

#[test]
fn test_correlation_and_top_categories() {
    let table = load(sample_csv());

    let corr = correlation_matrix(&table).expect("two numeric columns");
    assert!(corr.columns.contains(&"age".to_string()));

    let top = top_categories(&table, 5, 2);
    let city = top.get("city").expect("city is categorical");
    assert!(city.len() <= 2);
    assert_eq!(city[0].value, "A");
    assert_eq!(city[0].count, 2);
}

// =============================================================================
// Heuristic Scenarios
// =============================================================================

#[test]
fn test_constant_column_scenario() {
    let table = load("constant_col,normal_col\n42,1\n42,2\n42,3\n42,4\n");
    let report = DataScore::new().analyze_table(table).unwrap();

    assert!(report.flags.has_constant_columns);
    assert_eq!(report.flags.constant_columns, vec!["constant_col"]);
}

#[test]
fn test_high_cardinality_scenario() {
    let mut csv = String::from("user_name,status\n");
    for i in 0..100 {
        let status = if i < 50 { "active" } else { "inactive" };
        csv.push_str(&format!("user_{},{}\n", i, status));
    }

    let scorer = DataScore::new()
        .with_quality(QualityConfig::default().with_high_cardinality_threshold(50));
    let report = scorer.analyze_bytes(csv.as_bytes()).unwrap();

    assert!(report.flags.has_high_cardinality_categoricals);
    assert!(report.flags.high_cardinality_columns.contains(&"user_name".to_string()));
    assert!(!report.flags.high_cardinality_columns.contains(&"status".to_string()));
}

#[test]
fn test_date_strings_count_toward_cardinality() {
    let mut csv = String::from("visited,site\n");
    for i in 0..56 {
        csv.push_str(&format!("2024-{:02}-{:02},north\n", i / 28 + 1, i % 28 + 1));
    }

    let scorer = DataScore::new()
        .with_quality(QualityConfig::default().with_high_cardinality_threshold(50));
    let report = scorer.analyze_bytes(csv.as_bytes()).unwrap();

    let visited = report.summary.column("visited").unwrap();
    assert_eq!(visited.dtype, DType::Categorical);
    assert_eq!(visited.n_distinct, 56);
    assert_eq!(report.flags.high_cardinality_columns, vec!["visited"]);

    let table = load(&csv);
    let top = top_categories(&table, 5, 3);
    assert_eq!(top["visited"].len(), 3);
    assert_eq!(top["visited"][0].value, "2024-01-01");
}

#[test]
fn test_suspicious_id_scenario() {
    let table = load("user_id,order_id,name\n1,101,A\n2,102,B\n3,103,C\n3,104,D\n4,105,E\n");
    let report = DataScore::new().analyze_table(table).unwrap();

    assert!(report.flags.has_suspicious_id_duplicates);
    assert!(report.flags.suspicious_id_columns.contains(&"user_id".to_string()));
    assert!(!report.flags.suspicious_id_columns.contains(&"order_id".to_string()));
}

#[test]
fn test_zero_values_scenario() {
    let table = load("mostly_zeros,few_zeros\n0,1\n0,2\n0,0\n0,4\n1,5\n");
    let scorer =
        DataScore::new().with_quality(QualityConfig::default().with_zero_share_threshold(0.5));
    let report = scorer.analyze_table(table).unwrap();

    assert!(report.flags.has_many_zero_values);
    assert!(report.flags.high_zero_columns.contains(&"mostly_zeros".to_string()));
    assert!(!report.flags.high_zero_columns.contains(&"few_zeros".to_string()));
}

#[test]
fn test_bad_dataset_scores_lower() {
    let bad = Table::new(vec![
        Column::numeric("constant", vec![Some(1.0); 4]),
        Column::numeric("user_id", vec![Some(1.0), Some(1.0), Some(2.0), Some(3.0)]),
    ])
    .unwrap();
    let good = Table::new(vec![
        Column::numeric("values", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        Column::numeric("other_id", vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]),
    ])
    .unwrap();

    let scorer = DataScore::new();
    let bad = scorer.analyze_table(bad).unwrap();
    let good = scorer.analyze_table(good).unwrap();

    assert!(bad.flags.quality_score < good.flags.quality_score);
}

// =============================================================================
// File Input and Errors
// =============================================================================

#[test]
fn test_analyze_tsv_file() {
    let file = create_test_file("sample_id\tdiagnosis\tage\nS001\tCD\t25\nS002\tUC\t30\n");
    let report = DataScore::new().analyze(file.path()).expect("Analysis failed");

    let source = report.source.expect("file source");
    assert_eq!(source.format, "tsv");
    assert_eq!(source.column_count, 3);
    assert_eq!(report.summary.n_rows, 2);
}

#[test]
fn test_header_only_csv_is_empty_dataset() {
    let err = DataScore::new().analyze_bytes(b"a,b,c\n").unwrap_err();
    assert!(matches!(err, DataScoreError::EmptyDataset(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_blank_upload_is_malformed() {
    let err = DataScore::new().analyze_bytes(b"").unwrap_err();
    assert!(matches!(err, DataScoreError::MalformedInput(_)));
}

#[test]
fn test_row_longer_than_header_is_malformed() {
    let err = DataScore::new()
        .analyze_bytes(b"a,b\n1,2\n3,4,5,6\n")
        .unwrap_err();
    assert!(matches!(err, DataScoreError::MalformedInput(ref msg) if msg.contains("line 3")));
    assert!(err.is_client_error());
}

#[test]
fn test_duplicate_column_names_are_rejected() {
    let err = Table::new(vec![
        Column::numeric("x", vec![Some(1.0), None]),
        Column::numeric("x", vec![Some(1.0), Some(2.0)]),
    ])
    .unwrap_err();
    assert!(matches!(err, DataScoreError::MalformedInput(_)));

    // Parsed headers are renamed instead, so no column is lost.
    let report = DataScore::new().analyze_bytes(b"x,x\n1,1\n,2\n").unwrap();
    assert_eq!(report.missing.len(), 2);
    assert_eq!(report.missing.get("x").unwrap().missing_count, 1);
    assert_eq!(report.missing.get("x.1").unwrap().missing_count, 0);
    assert!((report.flags.max_missing_share - 0.5).abs() < 1e-12);
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let err = DataScore::new()
        .analyze_bytes(b"name\n\xff\xfe\n")
        .unwrap_err();
    assert!(err.is_client_error());
}

#[test]
fn test_report_serializes_flag_names() {
    let report = DataScore::new().analyze_bytes(sample_csv().as_bytes()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let flags = &json["flags"];
    for key in [
        "too_few_rows",
        "too_many_columns",
        "too_many_missing",
        "has_constant_columns",
        "has_high_cardinality_categoricals",
        "has_suspicious_id_duplicates",
        "has_many_zero_values",
        "quality_score",
        "max_missing_share",
        "constant_columns",
        "high_cardinality_columns",
        "suspicious_id_columns",
        "high_zero_columns",
    ] {
        assert!(flags.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(json["missing"]["age"]["missing_count"], 1);
}
