//! Most frequent values of categorical columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::share;
use crate::schema::{ColumnValues, DType, Table, ValueKey};

/// A value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
    /// Share of the column's non-null values.
    pub share: f64,
}

/// For the first `max_columns` categorical columns, the `top_k` most frequent
/// non-null values. Ties keep the order in which values were first seen.
pub fn top_categories(
    table: &Table,
    max_columns: usize,
    top_k: usize,
) -> IndexMap<String, Vec<CategoryCount>> {
    table
        .columns_of(DType::Categorical)
        .take(max_columns)
        .map(|column| (column.name.clone(), rank_values(&column.values, top_k)))
        .collect()
}

fn rank_values(values: &ColumnValues, top_k: usize) -> Vec<CategoryCount> {
    // key -> (row of first occurrence, count)
    let mut counts: IndexMap<ValueKey<'_>, (usize, usize)> = IndexMap::new();
    for (row, key) in values.keys().enumerate() {
        if let Some(key) = key {
            counts.entry(key).or_insert((row, 0)).1 += 1;
        }
    }
    let total: usize = counts.values().map(|(_, count)| count).sum();

    let mut ranked: Vec<(usize, usize)> = counts.into_values().collect();
    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(top_k)
        .filter_map(|(row, count)| {
            Some(CategoryCount {
                value: values.display_value(row)?,
                count,
                share: share(count, total),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn test_top_k_with_ties_in_first_seen_order() {
        let table = Table::new(vec![Column::categorical(
            "city",
            vec![Some("B"), Some("A"), Some("C"), Some("A"), Some("C"), None],
        )])
        .unwrap();

        let top = top_categories(&table, 5, 2);
        let city = &top["city"];
        assert_eq!(city.len(), 2);
        assert_eq!(city[0].value, "A");
        assert_eq!(city[0].count, 2);
        assert_eq!(city[1].value, "C");
        assert_eq!(city[0].share, 0.4);
    }

    #[test]
    fn test_skips_non_categorical_and_limits_columns() {
        let table = Table::new(vec![
            Column::numeric("n", vec![Some(1.0), Some(2.0)]),
            Column::categorical("a", vec![Some("x"), Some("y")]),
            Column::categorical("b", vec![Some("x"), Some("x")]),
        ])
        .unwrap();

        let top = top_categories(&table, 1, 10);
        assert_eq!(top.len(), 1);
        assert!(top.contains_key("a"));
        assert!(!top.contains_key("n"));
    }

    #[test]
    fn test_date_columns_are_ranked() {
        let table = Table::new(vec![Column::from_raw(
            "visit",
            ["2024-01-02", "2024-01-05", "2024-01-05", ""],
        )])
        .unwrap();

        let top = top_categories(&table, 5, 5);
        let visit = &top["visit"];
        assert_eq!(visit[0].value, "2024-01-05");
        assert_eq!(visit[0].count, 2);
        assert_eq!(visit[1].value, "2024-01-02");
    }

    #[test]
    fn test_all_missing_column_yields_empty_list() {
        let table = Table::new(vec![Column::categorical::<&str>("c", vec![None, None])]).unwrap();
        let top = top_categories(&table, 5, 3);
        assert!(top["c"].is_empty());
    }
}
