//! Squared-error gradient boosting.

use super::config::BoostingConfig;
use super::tree::{RegressionTree, TreeParams};
use crate::{FeatureMatrix, ModelError};

/// Fitted gradient-boosted regression ensemble.
///
/// Starts from the target mean and adds `learning_rate` times a regression
/// tree fitted to the current residuals at every stage.
///
/// # Examples
///
/// ```
/// use elasticity_models::boosting::{BoostingConfig, GradientBoostedRegressor};
/// use elasticity_models::FeatureMatrix;
///
/// let rows: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64]).collect();
/// let y: Vec<f64> = (0..40).map(|i| 2.0 * i as f64).collect();
/// let x = FeatureMatrix::new(vec!["x".into()], rows).unwrap();
///
/// let model = GradientBoostedRegressor::fit(&x, &y, &BoostingConfig::default()).unwrap();
/// assert!((model.predict(&[20.0]) - 40.0).abs() < 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct GradientBoostedRegressor {
    initial: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
    feature_names: Vec<String>,
}

impl GradientBoostedRegressor {
    /// Fit an ensemble.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for an invalid configuration
    /// - `DimensionMismatch` when `targets` and the matrix differ in rows
    /// - `InsufficientData` for an empty input
    pub fn fit(
        features: &FeatureMatrix,
        targets: &[f64],
        config: &BoostingConfig,
    ) -> Result<Self, ModelError> {
        config.validate()?;
        if features.n_rows() != targets.len() {
            return Err(ModelError::dimension_mismatch(features.n_rows(), targets.len()));
        }
        if targets.is_empty() {
            return Err(ModelError::insufficient_data(1, 0));
        }

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            min_samples_leaf: config.min_samples_leaf,
        };

        let initial = targets.iter().sum::<f64>() / targets.len() as f64;
        let mut fitted = vec![initial; targets.len()];
        let mut residuals = vec![0.0; targets.len()];
        let mut trees = Vec::with_capacity(config.n_estimators);

        for _ in 0..config.n_estimators {
            for ((r, y), f) in residuals.iter_mut().zip(targets).zip(&fitted) {
                *r = y - f;
            }
            let tree = RegressionTree::fit(features, &residuals, params)?;
            for (i, f) in fitted.iter_mut().enumerate() {
                *f += config.learning_rate * tree.predict(features.row(i));
            }
            trees.push(tree);
        }

        Ok(Self {
            initial,
            learning_rate: config.learning_rate,
            trees,
            feature_names: features.names().to_vec(),
        })
    }

    /// Predict a single row.
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.initial
            + self.learning_rate * self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    /// Predict every row of a matrix.
    pub fn predict_all(&self, features: &FeatureMatrix) -> Vec<f64> {
        features.rows().iter().map(|r| self.predict(r)).collect()
    }

    /// Mean of the per-tree normalised importances, renormalised to sum to one.
    ///
    /// All zeros when no tree ever split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.feature_names.len()];
        for tree in &self.trees {
            for (total, value) in totals.iter_mut().zip(tree.feature_importances()) {
                *total += value;
            }
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|t| *t /= sum);
        }
        totals
    }

    /// Feature names paired with their importance.
    pub fn named_importances(&self) -> Vec<(String, f64)> {
        self.feature_names
            .iter()
            .cloned()
            .zip(self.feature_importances())
            .collect()
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_problem(n: usize) -> (FeatureMatrix, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64, (i % 2) as f64]).collect();
        let y: Vec<f64> = (0..n).map(|i| 3.0 - 0.5 * i as f64).collect();
        (
            FeatureMatrix::new(vec!["x".into(), "flag".into()], rows).unwrap(),
            y,
        )
    }

    #[test]
    fn test_training_error_decreases_with_stages() {
        let (x, y) = linear_problem(60);
        let mse = |model: &GradientBoostedRegressor| {
            model
                .predict_all(&x)
                .iter()
                .zip(&y)
                .map(|(p, t)| (p - t) * (p - t))
                .sum::<f64>()
                / y.len() as f64
        };

        let few = GradientBoostedRegressor::fit(&x, &y, &BoostingConfig::new().with_n_estimators(5))
            .unwrap();
        let many = GradientBoostedRegressor::fit(&x, &y, &BoostingConfig::default()).unwrap();
        assert!(mse(&many) < mse(&few));
        assert_eq!(many.n_trees(), 100);
    }

    #[test]
    fn test_constant_target_predicts_constant() {
        let (x, _) = linear_problem(10);
        let y = vec![7.0; 10];
        let model = GradientBoostedRegressor::fit(&x, &y, &BoostingConfig::default()).unwrap();
        assert_relative_eq!(model.predict(&[3.0, 1.0]), 7.0);
        assert_eq!(model.feature_importances(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_importances_favour_driving_feature() {
        let (x, y) = linear_problem(60);
        let model = GradientBoostedRegressor::fit(&x, &y, &BoostingConfig::default()).unwrap();
        let named = model.named_importances();
        assert_eq!(named[0].0, "x");
        assert!(named[0].1 > 0.8);
        assert_relative_eq!(named[0].1 + named[1].1, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (x, y) = linear_problem(10);
        let config = BoostingConfig::new().with_learning_rate(-1.0);
        assert!(GradientBoostedRegressor::fit(&x, &y, &config).is_err());
    }
}
