//! Price elasticity estimation.
//!
//! Fits `ln(quantity)` against `ln(price)` over a window of one product's
//! history, either by OLS (the slope is the elasticity) or by a boosted
//! tree ensemble with covariates (the elasticity is a numerical derivative
//! of the fitted surface at the mean feature vector).
//!
//! # Boosted features
//!
//! | Column | Source |
//! |---|---|
//! | `log_price` | `ln(price)` |
//! | `discount_percent` | as recorded |
//! | `is_holiday` | 0 or 1 |
//! | `promotion_active` | 0 or 1 |
//! | `log_competitor_price` | `ln(competitor_price)`, own price when missing; only when any row has one |

use chrono::Utc;
use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::{
    ConfidenceInterval, DateWindow, ElasticityEstimate, FeatureImportance, ModelKind, Product,
};
use elasticity_models::boosting::GradientBoostedRegressor;
use elasticity_models::regression::SimpleOls;
use elasticity_models::resampling::{
    bootstrap_statistic, cross_val_r2, percentile_interval, ResampleRng,
};
use elasticity_models::FeatureMatrix;
use tracing::{debug, info, warn};

use crate::classifier::{classify, recommend};
use crate::config::{EstimatorConfig, RecommenderConfig};
use crate::error::{ElasticityError, ElasticityResult};

/// Name of the price column in the boosted design matrix.
pub const LOG_PRICE: &str = "log_price";

/// Intermediate result of one model fit.
#[derive(Debug, Clone, PartialEq)]
struct ModelFit {
    coefficient: f64,
    r_squared: f64,
    p_value: Option<f64>,
    standard_error: Option<f64>,
    interval: ConfidenceInterval,
    importances: Option<Vec<FeatureImportance>>,
}

/// Elasticity estimator.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use elasticity_core::dataset::SalesDataset;
/// use elasticity_core::types::{DateWindow, ModelKind, Product, SaleObservation};
/// use elasticity_engine::ElasticityEstimator;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let history: Vec<SaleObservation> = (0..30)
///     .map(|i| {
///         let price = 90.0 + (i % 7) as f64 * 3.0;
///         let quantity = 1.0e4 * price.powf(-1.2);
///         SaleObservation::new(start + Duration::days(i), price, quantity, 50.0)
///     })
///     .collect();
///
/// let product = Product::new(1, "Widget", 100.0, 50.0);
/// let estimator = ElasticityEstimator::default();
/// let estimate = estimator
///     .estimate(&product, &SalesDataset::new(history), ModelKind::Linear, &DateWindow::unbounded())
///     .unwrap();
/// assert!((estimate.coefficient + 1.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElasticityEstimator {
    config: EstimatorConfig,
    recommender: RecommenderConfig,
}

impl ElasticityEstimator {
    /// Create an estimator.
    pub fn new(config: EstimatorConfig, recommender: RecommenderConfig) -> Self {
        Self {
            config,
            recommender,
        }
    }

    /// Estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate the elasticity of `product` over `window`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an invalid product or configuration
    /// - `InsufficientData` when the window holds too few rows, before or
    ///   after dropping rows with non-positive price or quantity
    /// - `Model` when fitting fails (e.g. constant price)
    pub fn estimate(
        &self,
        product: &Product,
        observations: &SalesDataset,
        model_kind: ModelKind,
        window: &DateWindow,
    ) -> ElasticityResult<ElasticityEstimate> {
        product.validate()?;
        self.config.validate()?;

        let in_window = observations.within(window);
        let required = self.config.min_observations;
        if in_window.len() < required {
            return Err(ElasticityError::insufficient_data(required, in_window.len()));
        }

        let usable = in_window.usable();
        let dropped = in_window.len() - usable.len();
        if dropped > 0 {
            warn!(
                product_id = product.id,
                dropped, "Dropped observations with non-positive price or quantity"
            );
        }
        if usable.len() < required {
            return Err(ElasticityError::insufficient_data(required, usable.len()));
        }

        let fit = match model_kind {
            ModelKind::Linear => self.fit_linear(&usable)?,
            ModelKind::GradientBoosted => self.fit_boosted(&usable)?,
        };

        let classification = classify(fit.coefficient);
        let recommendation = recommend(product, fit.coefficient, &usable, &self.recommender)?;

        info!(
            product_id = product.id,
            model = %model_kind,
            coefficient = fit.coefficient,
            r_squared = fit.r_squared,
            classification = %classification,
            sample_size = in_window.len(),
            "Estimated price elasticity"
        );

        Ok(ElasticityEstimate {
            product_id: product.id,
            coefficient: fit.coefficient,
            r_squared: fit.r_squared,
            p_value: fit.p_value,
            standard_error: fit.standard_error,
            sample_size: in_window.len(),
            model_kind,
            confidence_interval: Some(fit.interval),
            classification,
            period: analysed_period(window, &usable),
            feature_importances: fit.importances,
            recommendation,
            created_at: Utc::now(),
        })
    }

    fn fit_linear(&self, usable: &SalesDataset) -> ElasticityResult<ModelFit> {
        let log_price: Vec<f64> = usable.iter().map(|o| o.price.ln()).collect();
        let log_quantity: Vec<f64> = usable.iter().map(|o| o.quantity.ln()).collect();

        let fit = SimpleOls::fit(&log_price, &log_quantity)?;
        let level = self.config.confidence_level;
        let (lower, upper) = fit.slope_interval(level)?;
        debug!(
            slope = fit.slope,
            standard_error = fit.standard_error,
            p_value = fit.p_value,
            "OLS fit"
        );

        Ok(ModelFit {
            coefficient: fit.slope,
            r_squared: fit.r_squared,
            p_value: Some(fit.p_value),
            standard_error: Some(fit.standard_error),
            interval: ConfidenceInterval::new(lower, upper, level),
            importances: None,
        })
    }

    fn fit_boosted(&self, usable: &SalesDataset) -> ElasticityResult<ModelFit> {
        let (features, targets) = boosted_design(usable)?;
        let step = self.config.derivative_step;

        let model = GradientBoostedRegressor::fit(&features, &targets, &self.config.boosting)?;
        let base = features.column_means();
        let coefficient = price_derivative(&model, &base, step);

        let r_squared = cross_val_r2(&features, &targets, &self.config.boosting, self.config.cv_folds)?;

        let mut rng = ResampleRng::from_optional_seed(self.config.seed);
        let boot_config = self.config.bootstrap_boosting();
        let replicates = bootstrap_statistic(
            targets.len(),
            self.config.bootstrap_iterations,
            &mut rng,
            self.config.parallel_bootstrap,
            |indices| {
                let sample_y: Vec<f64> = indices.iter().map(|&i| targets[i]).collect();
                let refit = GradientBoostedRegressor::fit(&features.select(indices), &sample_y, &boot_config)?;
                Ok(price_derivative(&refit, &base, step))
            },
        )?;
        let level = self.config.confidence_level;
        let (lower, upper) = percentile_interval(&replicates, level)?;

        debug!(
            coefficient,
            cv_r_squared = r_squared,
            lower,
            upper,
            replicates = replicates.len(),
            seed = ?rng.seed(),
            "Boosted fit"
        );

        let importances = model
            .named_importances()
            .into_iter()
            .map(|(feature, importance)| FeatureImportance {
                feature,
                importance,
            })
            .collect();

        Ok(ModelFit {
            coefficient,
            r_squared,
            p_value: None,
            standard_error: None,
            interval: ConfidenceInterval::new(lower, upper, level),
            importances: Some(importances),
        })
    }
}

/// Design matrix and `ln(quantity)` targets for the boosted model.
///
/// # Errors
///
/// `NoViableFeatures` when the dataset is empty.
pub fn boosted_design(usable: &SalesDataset) -> ElasticityResult<(FeatureMatrix, Vec<f64>)> {
    if usable.is_empty() {
        return Err(ElasticityError::NoViableFeatures);
    }

    let with_competitor = usable.has_competitor_prices();
    let mut names = vec![
        LOG_PRICE.to_string(),
        "discount_percent".to_string(),
        "is_holiday".to_string(),
        "promotion_active".to_string(),
    ];
    if with_competitor {
        names.push("log_competitor_price".to_string());
    }

    let rows: Vec<Vec<f64>> = usable
        .iter()
        .map(|o| {
            let mut row = vec![
                o.price.ln(),
                if o.discount_percent.is_finite() {
                    o.discount_percent
                } else {
                    0.0
                },
                f64::from(u8::from(o.is_holiday)),
                f64::from(u8::from(o.promotion_active)),
            ];
            if with_competitor {
                let competitor = o.competitor_price.filter(|p| *p > 0.0).unwrap_or(o.price);
                row.push(competitor.ln());
            }
            row
        })
        .collect();
    let targets = usable.iter().map(|o| o.quantity.ln()).collect();

    let features = FeatureMatrix::new(names, rows).map_err(|_| ElasticityError::NoViableFeatures)?;
    Ok((features, targets))
}

/// Forward difference of the prediction along `log_price` at `base`.
fn price_derivative(model: &GradientBoostedRegressor, base: &[f64], step: f64) -> f64 {
    let mut shifted = base.to_vec();
    shifted[0] += step;
    (model.predict(&shifted) - model.predict(base)) / step
}

fn analysed_period(window: &DateWindow, usable: &SalesDataset) -> DateWindow {
    let span = usable.date_span();
    DateWindow {
        start: window.start.or(span.map(|(first, _)| first)),
        end: window.end.or(span.map(|(_, last)| last)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};
    use elasticity_core::types::{ElasticityClass, SaleObservation};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Exact constant-elasticity demand over a cycling price grid.
    fn exact_history(n: i64, elasticity: f64) -> SalesDataset {
        SalesDataset::new(
            (0..n)
                .map(|i| {
                    let price = 80.0 + (i % 9) as f64 * 5.0;
                    let quantity = 1.0e5 * price.powf(elasticity);
                    SaleObservation::new(start() + Duration::days(i), price, quantity, 50.0)
                })
                .collect(),
        )
    }

    fn product() -> Product {
        Product::new(7, "Kettle", 100.0, 50.0)
    }

    fn fast_estimator() -> ElasticityEstimator {
        let config = EstimatorConfig::builder()
            .seed(42)
            .bootstrap_iterations(20)
            .bootstrap_estimators(20)
            .build();
        ElasticityEstimator::new(config, RecommenderConfig::default())
    }

    // ========================================
    // Linear Model Tests
    // ========================================

    #[test]
    fn test_linear_recovers_exact_elasticity() {
        let estimate = fast_estimator()
            .estimate(&product(), &exact_history(60, -1.8), ModelKind::Linear, &DateWindow::unbounded())
            .unwrap();

        assert_relative_eq!(estimate.coefficient, -1.8, epsilon = 1e-9);
        assert_relative_eq!(estimate.r_squared, 1.0, epsilon = 1e-9);
        assert_eq!(estimate.classification, ElasticityClass::Elastic);
        assert_eq!(estimate.model_kind, ModelKind::Linear);
        assert!(estimate.p_value.is_some());
        assert!(estimate.feature_importances.is_none());
        assert_eq!(estimate.sample_size, 60);
        assert_eq!(estimate.period.start, Some(start()));
    }

    #[test]
    fn test_window_restricts_sample() {
        let window = DateWindow::between(start(), start() + Duration::days(19)).unwrap();
        let estimate = fast_estimator()
            .estimate(&product(), &exact_history(60, -0.6), ModelKind::Linear, &window)
            .unwrap();
        assert_eq!(estimate.sample_size, 20);
        assert_eq!(estimate.period, window);
    }

    #[test]
    fn test_too_few_rows_rejected() {
        let err = fast_estimator()
            .estimate(&product(), &exact_history(9, -1.0), ModelKind::Linear, &DateWindow::unbounded())
            .unwrap_err();
        assert_eq!(err, ElasticityError::insufficient_data(10, 9));
    }

    #[test]
    fn test_rows_dropped_before_fitting() {
        let mut rows: Vec<SaleObservation> = exact_history(11, -1.0).observations().to_vec();
        rows[0].quantity = 0.0;
        rows[1].price = -1.0;
        let err = fast_estimator()
            .estimate(&product(), &SalesDataset::new(rows), ModelKind::Linear, &DateWindow::unbounded())
            .unwrap_err();
        assert_eq!(err, ElasticityError::insufficient_data(10, 9));
    }

    #[test]
    fn test_constant_price_is_model_error() {
        let rows: Vec<SaleObservation> = (0..20)
            .map(|i| SaleObservation::new(start() + Duration::days(i), 10.0, 5.0 + i as f64, 4.0))
            .collect();
        let err = fast_estimator()
            .estimate(&product(), &SalesDataset::new(rows), ModelKind::Linear, &DateWindow::unbounded())
            .unwrap_err();
        assert!(matches!(err, ElasticityError::Model(_)));
    }

    // ========================================
    // Boosted Model Tests
    // ========================================

    #[test]
    fn test_boosted_estimate_is_negative_with_importances() {
        let estimate = fast_estimator()
            .estimate(
                &product(),
                &exact_history(90, -1.5),
                ModelKind::GradientBoosted,
                &DateWindow::unbounded(),
            )
            .unwrap();

        assert!(estimate.coefficient <= 0.0);
        assert!(estimate.p_value.is_none());
        let importances = estimate.feature_importances.unwrap();
        assert_eq!(importances.len(), 4);
        assert_eq!(importances[0].feature, LOG_PRICE);
        assert!(importances[0].importance > 0.9);
        let interval = estimate.confidence_interval.unwrap();
        assert!(interval.lower <= interval.upper);
    }

    #[test]
    fn test_boosted_seeded_runs_repeat() {
        let history = exact_history(40, -1.1);
        let a = fast_estimator()
            .estimate(&product(), &history, ModelKind::GradientBoosted, &DateWindow::unbounded())
            .unwrap();
        let b = fast_estimator()
            .estimate(&product(), &history, ModelKind::GradientBoosted, &DateWindow::unbounded())
            .unwrap();
        assert_eq!(a.coefficient, b.coefficient);
        assert_eq!(a.confidence_interval, b.confidence_interval);
    }

    #[test]
    fn test_design_adds_competitor_column_when_present() {
        let mut rows: Vec<SaleObservation> = exact_history(12, -1.0).observations().to_vec();
        rows[3] = rows[3].clone().with_competitor_price(70.0).with_holiday(true);
        let (features, targets) = boosted_design(&SalesDataset::new(rows.clone())).unwrap();

        assert_eq!(features.n_features(), 5);
        assert_eq!(features.names()[4], "log_competitor_price");
        assert_relative_eq!(features.row(3)[4], 70.0f64.ln());
        assert_eq!(features.row(3)[2], 1.0);
        // missing competitor price falls back to the row's own price
        assert_relative_eq!(features.row(0)[4], rows[0].price.ln());
        assert_eq!(targets.len(), 12);
    }

    #[test]
    fn test_design_without_competitor_prices() {
        let (features, _) = boosted_design(&exact_history(12, -1.0)).unwrap();
        assert_eq!(features.n_features(), 4);
        assert!(boosted_design(&SalesDataset::default()).is_err());
    }
}
