//! Pairwise Pearson correlation between numeric columns.

use serde::Serialize;

use crate::schema::{ColumnValues, DType, Table};

/// Square correlation matrix over the numeric columns of a table.
///
/// Undefined entries (fewer than two complete rows, or zero variance) are NaN
/// and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Off-diagonal pairs with `|r| >= threshold`, strongest first.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<(String, String, f64)> {
        let mut pairs = Vec::new();
        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                let r = self.values[i][j];
                if r.abs() >= threshold {
                    pairs.push((self.columns[i].clone(), self.columns[j].clone(), r));
                }
            }
        }
        pairs.sort_by(|a, b| {
            b.2.abs()
                .partial_cmp(&a.2.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }
}

/// Pearson correlation among numeric columns, using pairwise-complete rows.
///
/// Returns `None` when the table has fewer than two numeric columns.
pub fn correlation_matrix(table: &Table) -> Option<CorrelationMatrix> {
    let numeric: Vec<(&str, &[Option<f64>])> = table
        .columns_of(DType::Numeric)
        .filter_map(|c| match &c.values {
            ColumnValues::Numeric(v) => Some((c.name.as_str(), v.as_slice())),
            _ => None,
        })
        .collect();

    if numeric.len() < 2 {
        return None;
    }

    let n = numeric.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                self_correlation(numeric[i].1)
            } else {
                pearson(numeric[i].1, numeric[j].1)
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    })
}

fn present(v: Option<f64>) -> Option<f64> {
    v.filter(|x| !x.is_nan())
}

/// 1.0 for a column with variance, NaN otherwise.
fn self_correlation(xs: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .filter_map(|x| present(*x).map(|x| (x, x)))
        .collect();
    if pearson_pairs(&pairs).is_nan() {
        f64::NAN
    } else {
        1.0
    }
}

fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some((present(*x)?, present(*y)?)))
        .collect();
    pearson_pairs(&pairs)
}

fn pearson_pairs(pairs: &[(f64, f64)]) -> f64 {
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn test_perfect_correlation() {
        let table = Table::new(vec![
            Column::numeric("x", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Column::numeric("y", vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)]),
            Column::numeric("z", vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)]),
        ])
        .unwrap();

        let corr = correlation_matrix(&table).unwrap();
        assert_eq!(corr.columns, vec!["x", "y", "z"]);
        assert!((corr.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
        assert!((corr.get("x", "z").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(corr.get("z", "z"), Some(1.0));
        assert_eq!(corr.strong_pairs(0.9).len(), 3);
    }

    #[test]
    fn test_pairwise_complete_rows() {
        let table = Table::new(vec![
            Column::numeric("age", vec![Some(10.0), Some(20.0), Some(30.0), None]),
            Column::numeric("height", vec![Some(140.0), Some(150.0), Some(160.0), Some(170.0)]),
        ])
        .unwrap();

        let corr = correlation_matrix(&table).unwrap();
        assert!((corr.get("age", "height").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_nan() {
        let table = Table::new(vec![
            Column::numeric("flat", vec![Some(1.0), Some(1.0), Some(1.0)]),
            Column::numeric("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ])
        .unwrap();

        let corr = correlation_matrix(&table).unwrap();
        assert!(corr.get("flat", "x").unwrap().is_nan());
        assert!(corr.get("flat", "flat").unwrap().is_nan());
        let json = serde_json::to_string(&corr).unwrap();
        assert!(json.contains("null"));
    }

    #[test]
    fn test_needs_two_numeric_columns() {
        let table = Table::new(vec![
            Column::numeric("x", vec![Some(1.0), Some(2.0)]),
            Column::categorical("c", vec![Some("a"), Some("b")]),
        ])
        .unwrap();
        assert!(correlation_matrix(&table).is_none());
    }
}
