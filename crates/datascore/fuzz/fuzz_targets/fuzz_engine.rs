//! Fuzz target for the quality engine on structured tables.
//!
//! Builds tables from arbitrary cells and thresholds so the engine sees
//! shapes the parser rarely produces (NaN, infinities, all-null columns).

#![no_main]

use arbitrary::Arbitrary;
use datascore::{
    correlation_matrix, evaluate_quality, profile_missing, summarize, top_categories, Column,
    QualityConfig, Table,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzColumn {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    rows: u8,
    columns: Vec<FuzzColumn>,
    row_threshold: u16,
    high_cardinality_threshold: u8,
}

fuzz_target!(|input: FuzzInput| {
    let rows = input.rows as usize;
    let columns: Vec<Column> = input
        .columns
        .into_iter()
        .take(16)
        .enumerate()
        .map(|(idx, column)| match column {
            FuzzColumn::Numeric(mut values) => {
                values.resize(rows, None);
                Column::numeric(format!("num_id_{}", idx), values)
            }
            FuzzColumn::Text(mut values) => {
                values.resize(rows, None);
                Column::categorical(format!("text_{}", idx), values)
            }
        })
        .collect();

    let Ok(table) = Table::new(columns) else {
        return;
    };

    let config = QualityConfig::default()
        .with_row_threshold(input.row_threshold as usize)
        .with_high_cardinality_threshold(input.high_cardinality_threshold as usize);

    let summary = summarize(&table);
    let missing = profile_missing(&table);
    let flags = evaluate_quality(&summary, &missing, Some(&table), &config);
    assert!((0.0..=1.0).contains(&flags.quality_score));

    let _ = correlation_matrix(&table);
    let _ = top_categories(&table, 4, 4);
});
