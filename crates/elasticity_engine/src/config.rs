//! Engine configuration.
//!
//! Every tunable constant of the estimator, recommender, optimiser,
//! simulator and curve generator lives here. All structs deserialise with
//! `#[serde(default)]`, so a partial TOML document overrides only the
//! fields it names.

use elasticity_models::boosting::BoostingConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ElasticityError, ElasticityResult};

/// Estimator configuration.
///
/// # Examples
///
/// ```
/// use elasticity_engine::config::EstimatorConfig;
///
/// let config = EstimatorConfig::builder()
///     .seed(42)
///     .bootstrap_iterations(20)
///     .build();
/// assert_eq!(config.seed, Some(42));
/// assert_eq!(config.min_observations, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Minimum usable observations before fitting.
    ///
    /// Default: 10
    pub min_observations: usize,

    /// Step on `log_price` for the boosted numerical derivative.
    ///
    /// Default: 0.01
    pub derivative_step: f64,

    /// Folds for the boosted model's cross-validated R².
    ///
    /// Default: 5
    pub cv_folds: usize,

    /// Bootstrap replicates for the boosted interval.
    ///
    /// Default: 100
    pub bootstrap_iterations: usize,

    /// Trees per bootstrap refit.
    ///
    /// Default: 50
    pub bootstrap_estimators: usize,

    /// Nominal coverage of the coefficient interval.
    ///
    /// Default: 0.95
    pub confidence_level: f64,

    /// Full-size boosted ensemble hyper-parameters.
    pub boosting: BoostingConfig,

    /// Bootstrap seed; `None` draws from OS entropy.
    ///
    /// Default: None
    pub seed: Option<u64>,

    /// Fit bootstrap replicates on the rayon pool.
    ///
    /// Default: true
    pub parallel_bootstrap: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_observations: 10,
            derivative_step: 0.01,
            cv_folds: 5,
            bootstrap_iterations: 100,
            bootstrap_estimators: 50,
            confidence_level: 0.95,
            boosting: BoostingConfig::default(),
            seed: None,
            parallel_bootstrap: true,
        }
    }
}

impl EstimatorConfig {
    /// Create a configuration builder for fluent construction.
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }

    /// Set the bootstrap seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the bootstrap replicate count.
    pub fn with_bootstrap_iterations(mut self, iterations: usize) -> Self {
        self.bootstrap_iterations = iterations;
        self
    }

    /// Boosting configuration for bootstrap refits.
    pub fn bootstrap_boosting(&self) -> BoostingConfig {
        self.boosting
            .clone()
            .with_n_estimators(self.bootstrap_estimators)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ElasticityResult<()> {
        if self.min_observations < 3 {
            return Err(ElasticityError::invalid_input(
                "min_observations must be at least 3",
            ));
        }
        if !(self.derivative_step > 0.0 && self.derivative_step.is_finite()) {
            return Err(ElasticityError::invalid_input(
                "derivative_step must be positive",
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ElasticityError::invalid_input(
                "confidence_level must be in (0, 1)",
            ));
        }
        self.boosting.validate()?;
        Ok(())
    }
}

/// Builder for `EstimatorConfig`.
#[derive(Debug, Clone, Default)]
pub struct EstimatorConfigBuilder {
    config: EstimatorConfig,
}

impl EstimatorConfigBuilder {
    /// Set the minimum usable observations.
    pub fn min_observations(mut self, min_observations: usize) -> Self {
        self.config.min_observations = min_observations;
        self
    }

    /// Set the derivative step.
    pub fn derivative_step(mut self, step: f64) -> Self {
        self.config.derivative_step = step;
        self
    }

    /// Set the number of cross-validation folds.
    pub fn cv_folds(mut self, folds: usize) -> Self {
        self.config.cv_folds = folds;
        self
    }

    /// Set the bootstrap replicate count.
    pub fn bootstrap_iterations(mut self, iterations: usize) -> Self {
        self.config.bootstrap_iterations = iterations;
        self
    }

    /// Set the trees per bootstrap refit.
    pub fn bootstrap_estimators(mut self, estimators: usize) -> Self {
        self.config.bootstrap_estimators = estimators;
        self
    }

    /// Set the confidence level.
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    /// Set the boosting hyper-parameters.
    pub fn boosting(mut self, boosting: BoostingConfig) -> Self {
        self.config.boosting = boosting;
        self
    }

    /// Set the bootstrap seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set whether bootstrap replicates run in parallel.
    pub fn parallel_bootstrap(mut self, parallel: bool) -> Self {
        self.config.parallel_bootstrap = parallel;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> EstimatorConfig {
        self.config
    }
}

/// Recommender configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Fractional price step of a recommendation.
    ///
    /// Default: 0.05
    pub step_fraction: f64,

    /// Optimal price floor as a multiple of unit cost.
    ///
    /// Default: 1.1
    pub min_markup: f64,

    /// Optimal price ceiling as a multiple of current price.
    ///
    /// Default: 1.5
    pub max_price_multiple: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            step_fraction: 0.05,
            min_markup: 1.1,
            max_price_multiple: 1.5,
        }
    }
}

/// Revenue optimiser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Price multiple applied for inelastic demand.
    ///
    /// Default: 1.2
    pub inelastic_uplift: f64,

    /// Price floor as a multiple of unit cost.
    ///
    /// Default: 1.1
    pub min_markup: f64,

    /// Price ceiling as a multiple of current price.
    ///
    /// Default: 2.0
    pub max_price_multiple: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            inelastic_uplift: 1.2,
            min_markup: 1.1,
            max_price_multiple: 2.0,
        }
    }
}

/// Scenario simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Largest permitted price decrease in percent.
    ///
    /// Default: -30
    pub min_change_percent: f64,

    /// Largest permitted price increase in percent.
    ///
    /// Default: 20
    pub max_change_percent: f64,

    /// Trailing window for baselines, in days.
    ///
    /// Default: 90
    pub history_window_days: i64,

    /// Minimum observations in the trailing window.
    ///
    /// Default: 10
    pub min_history: usize,

    /// Coefficient multipliers used when an estimate has no interval.
    ///
    /// Default: (0.8, 1.2)
    pub fallback_band: (f64, f64),

    /// Days before a competitor reacts, when not given.
    ///
    /// Default: 7
    pub default_competitor_delay_days: u32,

    /// Horizon of the post-response phase, in days.
    ///
    /// Default: 30
    pub competitor_phase_days: u32,

    /// Share of our price move a competitor matches, when not given.
    ///
    /// Default: 100
    pub default_match_percent: f64,

    /// Horizon of bulk and sweep simulations, in days.
    ///
    /// Default: 30
    pub bulk_horizon_days: u32,

    /// Horizon of seasonal simulations, in days.
    ///
    /// Default: 30
    pub seasonal_horizon_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_change_percent: -30.0,
            max_change_percent: 20.0,
            history_window_days: 90,
            min_history: 10,
            fallback_band: (0.8, 1.2),
            default_competitor_delay_days: 7,
            competitor_phase_days: 30,
            default_match_percent: 100.0,
            bulk_horizon_days: 30,
            seasonal_horizon_days: 30,
        }
    }
}

/// Price curve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Number of sampled prices.
    ///
    /// Default: 50
    pub points: usize,

    /// Default lower end as a multiple of current price.
    ///
    /// Default: 0.7
    pub lower_multiple: f64,

    /// Default upper end as a multiple of current price.
    ///
    /// Default: 1.3
    pub upper_multiple: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            points: 50,
            lower_multiple: 0.7,
            upper_multiple: 1.3,
        }
    }
}

/// Complete engine configuration.
///
/// # Examples
///
/// ```
/// use elasticity_engine::config::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(r#"
///     [simulation]
///     history_window_days = 60
/// "#).unwrap();
/// assert_eq!(config.simulation.history_window_days, 60);
/// assert_eq!(config.simulation.min_history, 10);
/// assert_eq!(config.curve.points, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Estimator settings
    pub estimator: EstimatorConfig,
    /// Recommender settings
    pub recommender: RecommenderConfig,
    /// Optimiser settings
    pub optimizer: OptimizerConfig,
    /// Simulator settings
    pub simulation: SimulationConfig,
    /// Curve settings
    pub curve: CurveConfig,
}

impl EngineConfig {
    /// Parse a TOML document, filling unspecified fields with defaults.
    pub fn from_toml_str(source: &str) -> ElasticityResult<Self> {
        toml::from_str(source)
            .map_err(|e| ElasticityError::invalid_input(format!("invalid configuration: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> ElasticityResult<()> {
        self.estimator.validate()?;
        let sim = &self.simulation;
        if !(sim.min_change_percent < 0.0 && sim.max_change_percent > 0.0) {
            return Err(ElasticityError::invalid_input(
                "price change band must straddle zero",
            ));
        }
        if sim.history_window_days < 1 {
            return Err(ElasticityError::invalid_input(
                "history_window_days must be at least 1",
            ));
        }
        if self.curve.points == 0 || self.curve.lower_multiple >= self.curve.upper_multiple {
            return Err(ElasticityError::invalid_input(
                "curve needs at least one point and lower_multiple < upper_multiple",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.estimator.min_observations, 10);
        assert_eq!(config.estimator.derivative_step, 0.01);
        assert_eq!(config.estimator.cv_folds, 5);
        assert_eq!(config.estimator.bootstrap_iterations, 100);
        assert_eq!(config.estimator.bootstrap_estimators, 50);
        assert_eq!(config.recommender.max_price_multiple, 1.5);
        assert_eq!(config.optimizer.max_price_multiple, 2.0);
        assert_eq!(config.simulation.min_change_percent, -30.0);
        assert_eq!(config.simulation.max_change_percent, 20.0);
        assert_eq!(config.simulation.fallback_band, (0.8, 1.2));
        assert_eq!(config.curve.points, 50);
    }

    #[test]
    fn test_bootstrap_boosting_uses_smaller_ensemble() {
        let config = EstimatorConfig::default();
        let boosting = config.bootstrap_boosting();
        assert_eq!(boosting.n_estimators, 50);
        assert_eq!(boosting.max_depth, 3);
    }

    #[test]
    fn test_partial_toml_overrides_named_fields() {
        let config = EngineConfig::from_toml_str(
            r#"
            [estimator]
            seed = 7
            parallel_bootstrap = false

            [estimator.boosting]
            n_estimators = 40

            [optimizer]
            inelastic_uplift = 1.15
            "#,
        )
        .unwrap();
        assert_eq!(config.estimator.seed, Some(7));
        assert!(!config.estimator.parallel_bootstrap);
        assert_eq!(config.estimator.boosting.n_estimators, 40);
        assert_eq!(config.estimator.boosting.learning_rate, 0.1);
        assert_eq!(config.optimizer.inelastic_uplift, 1.15);
        assert_eq!(config.optimizer.min_markup, 1.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_invalid_input() {
        let err = EngineConfig::from_toml_str("[estimator\nseed = ").unwrap_err();
        assert!(matches!(err, ElasticityError::InvalidInput(_)));
    }

    #[test]
    fn test_engine_validation_rejects_bad_band() {
        let mut config = EngineConfig::default();
        config.simulation.min_change_percent = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation() {
        assert!(EstimatorConfig::default().validate().is_ok());
        assert!(EstimatorConfig::builder()
            .confidence_level(1.0)
            .build()
            .validate()
            .is_err());
        assert!(EstimatorConfig::builder()
            .derivative_step(0.0)
            .build()
            .validate()
            .is_err());
    }
}
