//! K-fold cross-validation.
//!
//! Folds are contiguous and unshuffled. The first `n % k` folds hold one
//! extra row.

use std::ops::Range;

use crate::boosting::{BoostingConfig, GradientBoostedRegressor};
use crate::{FeatureMatrix, ModelError};

/// Coefficient of determination of `predicted` against `actual`.
///
/// When `actual` has zero variance the score is 1 for a perfect prediction
/// and 0 otherwise.
///
/// # Examples
///
/// ```
/// use elasticity_models::resampling::r2_score;
///
/// assert_eq!(r2_score(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 1.0);
/// assert_eq!(r2_score(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]), 0.0);
/// assert_eq!(r2_score(&[5.0, 5.0], &[5.0, 4.0]), 0.0);
/// ```
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean) * (a - mean)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p) * (a - p))
        .sum();

    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Contiguous fold layout over `n` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct KFold {
    folds: Vec<Range<usize>>,
}

impl KFold {
    /// Split `n` rows into `k` folds.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when `k < 2`
    /// - `InsufficientData` when `n < k`
    pub fn new(n: usize, k: usize) -> Result<Self, ModelError> {
        if k < 2 {
            return Err(ModelError::invalid_parameter(format!(
                "cross-validation needs at least 2 folds, got {}",
                k
            )));
        }
        if n < k {
            return Err(ModelError::insufficient_data(k, n));
        }

        let base = n / k;
        let extra = n % k;
        let mut start = 0;
        let folds = (0..k)
            .map(|i| {
                let size = base + usize::from(i < extra);
                let fold = start..start + size;
                start += size;
                fold
            })
            .collect();
        Ok(Self { folds })
    }

    /// Held-out row ranges in order.
    pub fn folds(&self) -> &[Range<usize>] {
        &self.folds
    }

    /// `(train, test)` index pairs, one per fold.
    pub fn splits(&self) -> impl Iterator<Item = (Vec<usize>, Vec<usize>)> + '_ {
        let n = self.folds.last().map_or(0, |f| f.end);
        self.folds.iter().map(move |test| {
            let train = (0..n).filter(|i| !test.contains(i)).collect();
            (train, test.clone().collect())
        })
    }
}

/// Mean held-out R² of a boosted ensemble over `k` contiguous folds.
///
/// # Errors
///
/// Propagates fold construction and fitting errors.
pub fn cross_val_r2(
    features: &FeatureMatrix,
    targets: &[f64],
    config: &BoostingConfig,
    k: usize,
) -> Result<f64, ModelError> {
    if features.n_rows() != targets.len() {
        return Err(ModelError::dimension_mismatch(features.n_rows(), targets.len()));
    }
    let kfold = KFold::new(targets.len(), k)?;

    let mut scores = Vec::with_capacity(k);
    for (train, test) in kfold.splits() {
        let train_y: Vec<f64> = train.iter().map(|&i| targets[i]).collect();
        let model = GradientBoostedRegressor::fit(&features.select(&train), &train_y, config)?;

        let actual: Vec<f64> = test.iter().map(|&i| targets[i]).collect();
        let predicted: Vec<f64> = test.iter().map(|&i| model.predict(features.row(i))).collect();
        scores.push(r2_score(&actual, &predicted));
    }
    Ok(scores.iter().sum::<f64>() / scores.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fold_sizes_front_load_remainder() {
        let kfold = KFold::new(12, 5).unwrap();
        let sizes: Vec<usize> = kfold.folds().iter().map(|f| f.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2, 2]);
        assert_eq!(kfold.folds()[0], 0..3);
        assert_eq!(kfold.folds()[4], 10..12);
    }

    #[test]
    fn test_splits_partition_rows() {
        let kfold = KFold::new(7, 3).unwrap();
        for (train, test) in kfold.splits() {
            assert_eq!(train.len() + test.len(), 7);
            assert!(test.iter().all(|i| !train.contains(i)));
        }
    }

    #[test]
    fn test_fold_errors() {
        assert!(KFold::new(10, 1).is_err());
        assert!(KFold::new(3, 5).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_r2_partial_fit() {
        // ss_tot = 2, ss_res = 0.5
        assert_relative_eq!(r2_score(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.5]), 0.75);
    }

    #[test]
    fn test_cross_val_on_learnable_signal() {
        let rows: Vec<Vec<f64>> = (0..50).map(|i| vec![(i % 10) as f64]).collect();
        let y: Vec<f64> = (0..50).map(|i| (i % 10) as f64 * 2.0).collect();
        let x = FeatureMatrix::new(vec!["x".into()], rows).unwrap();

        let score = cross_val_r2(&x, &y, &BoostingConfig::default(), 5).unwrap();
        assert!(score > 0.9, "cv r2 was {}", score);
    }
}
