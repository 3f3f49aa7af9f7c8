//! Gradient boosting configuration.

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Hyper-parameters for a squared-error gradient-boosted tree ensemble.
///
/// # Examples
///
/// ```
/// use elasticity_models::boosting::BoostingConfig;
///
/// let config = BoostingConfig::default();
/// assert_eq!(config.n_estimators, 100);
/// assert_eq!(config.max_depth, 3);
///
/// let config = BoostingConfig::builder()
///     .n_estimators(50)
///     .learning_rate(0.05)
///     .build();
/// assert_eq!(config.n_estimators, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    /// Number of boosting stages.
    ///
    /// Default: 100
    pub n_estimators: usize,

    /// Maximum depth of each regression tree.
    ///
    /// Default: 3
    pub max_depth: usize,

    /// Shrinkage applied to every tree's contribution.
    ///
    /// Default: 0.1
    pub learning_rate: f64,

    /// Minimum rows a node needs before it may split.
    ///
    /// Default: 2
    pub min_samples_split: usize,

    /// Minimum rows each child of a split must keep.
    ///
    /// Default: 1
    pub min_samples_leaf: usize,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 3,
            learning_rate: 0.1,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl BoostingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> BoostingConfigBuilder {
        BoostingConfigBuilder::new()
    }

    /// Set the number of boosting stages.
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Set the maximum tree depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the learning rate.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Validate the hyper-parameters.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_estimators == 0 {
            return Err(ModelError::invalid_parameter("n_estimators must be at least 1"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ModelError::invalid_parameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.min_samples_split < 2 {
            return Err(ModelError::invalid_parameter("min_samples_split must be at least 2"));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::invalid_parameter("min_samples_leaf must be at least 1"));
        }
        Ok(())
    }
}

/// Builder for `BoostingConfig`.
#[derive(Debug, Clone, Default)]
pub struct BoostingConfigBuilder {
    config: BoostingConfig,
}

impl BoostingConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of boosting stages.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.config.n_estimators = n_estimators;
        self
    }

    /// Set the maximum tree depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the learning rate.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Set the minimum rows to split a node.
    pub fn min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.config.min_samples_split = min_samples_split;
        self
    }

    /// Set the minimum rows per leaf.
    pub fn min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.config.min_samples_leaf = min_samples_leaf;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> BoostingConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoostingConfig::default();
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.min_samples_split, 2);
        assert_eq!(config.min_samples_leaf, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_methods() {
        let config = BoostingConfig::new()
            .with_n_estimators(10)
            .with_max_depth(2)
            .with_learning_rate(0.3);
        assert_eq!(config.n_estimators, 10);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.learning_rate, 0.3);
    }

    #[test]
    fn test_builder() {
        let config = BoostingConfig::builder()
            .max_depth(4)
            .min_samples_split(5)
            .min_samples_leaf(2)
            .build();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.min_samples_split, 5);
        assert_eq!(config.min_samples_leaf, 2);
    }

    #[test]
    fn test_validation() {
        assert!(BoostingConfig::new().with_n_estimators(0).validate().is_err());
        assert!(BoostingConfig::new().with_learning_rate(0.0).validate().is_err());
        assert!(BoostingConfig::builder().min_samples_leaf(0).build().validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BoostingConfig = toml::from_str("n_estimators = 25").unwrap();
        assert_eq!(config.n_estimators, 25);
        assert_eq!(config.max_depth, 3);
    }
}
