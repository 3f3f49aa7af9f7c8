//! Row-major feature matrix with named columns.

use crate::ModelError;

/// Dense, row-major design matrix.
///
/// Every row has exactly `names.len()` entries; construction rejects ragged
/// input so downstream fitting code can index without bounds surprises.
///
/// # Examples
///
/// ```
/// use elasticity_models::FeatureMatrix;
///
/// let matrix = FeatureMatrix::new(
///     vec!["log_price".into(), "promo".into()],
///     vec![vec![4.5, 0.0], vec![4.75, 1.0]],
/// ).unwrap();
/// assert_eq!(matrix.n_rows(), 2);
/// assert_eq!(matrix.column_means(), vec![4.625, 0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Create a matrix, validating that every row matches the column count.
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        if names.is_empty() {
            return Err(ModelError::NoViableFeatures);
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != names.len()) {
            return Err(ModelError::dimension_mismatch(names.len(), bad.len()));
        }
        Ok(Self { names, rows })
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Row by index.
    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Column means; zeros for an empty matrix.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_features()];
        for row in &self.rows {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        if !self.rows.is_empty() {
            let n = self.rows.len() as f64;
            sums.iter_mut().for_each(|s| *s /= n);
        }
        sums
    }

    /// New matrix made of the given rows, in the given order (repeats allowed).
    pub fn select(&self, indices: &[usize]) -> FeatureMatrix {
        FeatureMatrix {
            names: self.names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = FeatureMatrix::new(names(), vec![vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert_eq!(err, ModelError::dimension_mismatch(2, 1));
    }

    #[test]
    fn test_rejects_no_columns() {
        let err = FeatureMatrix::new(Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err, ModelError::NoViableFeatures);
    }

    #[test]
    fn test_select_allows_repeats() {
        let matrix = FeatureMatrix::new(names(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let picked = matrix.select(&[1, 1, 0]);
        assert_eq!(picked.n_rows(), 3);
        assert_eq!(picked.row(0), &[3.0, 4.0]);
        assert_eq!(picked.row(2), &[1.0, 2.0]);
        assert_eq!(picked.column_index("b"), Some(1));
    }
}
