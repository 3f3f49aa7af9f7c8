//! Elasticity estimates and the recommendations derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{DataError, DateWindow, ProductId};

/// Model family used to fit the log-log demand relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Ordinary least squares of `ln(quantity)` on `ln(price)`.
    #[default]
    Linear,
    /// Boosted regression trees with a numerical price derivative.
    GradientBoosted,
}

impl ModelKind {
    /// Stable identifier used in serialised output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::GradientBoosted => "gradient_boosted",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "linear" | "linear_regression" | "ols" => Ok(ModelKind::Linear),
            "gradient_boosted" | "gradient_boosting" | "gbm" => Ok(ModelKind::GradientBoosted),
            _ => Err(DataError::unknown_variant("model kind", s)),
        }
    }
}

/// Elasticity band of a coefficient's absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElasticityClass {
    /// `|e| > 2`
    HighlyElastic,
    /// `1 < |e| <= 2`
    Elastic,
    /// `0.9 <= |e| <= 1`
    UnitElastic,
    /// `|e| < 0.9`
    Inelastic,
}

impl ElasticityClass {
    /// Stable identifier used in serialised output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElasticityClass::HighlyElastic => "highly_elastic",
            ElasticityClass::Elastic => "elastic",
            ElasticityClass::UnitElastic => "unit_elastic",
            ElasticityClass::Inelastic => "inelastic",
        }
    }
}

impl fmt::Display for ElasticityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a recommended price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStrategy {
    /// Raise the price.
    Increase,
    /// Lower the price.
    Decrease,
}

impl fmt::Display for PriceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceStrategy::Increase => write!(f, "Price Increase"),
            PriceStrategy::Decrease => write!(f, "Price Decrease"),
        }
    }
}

/// Two-sided interval on the elasticity coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Nominal coverage, e.g. 0.95
    pub level: f64,
}

impl ConfidenceInterval {
    /// Create an interval.
    pub fn new(lower: f64, upper: f64, level: f64) -> Self {
        Self {
            lower,
            upper,
            level,
        }
    }

    /// Whether the value lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Upper minus lower.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Relative importance of one input feature in a tree ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    /// Feature name, e.g. `log_price`
    pub feature: String,
    /// Share of total impurity decrease, summing to one across features
    pub importance: f64,
}

/// Suggested price move derived from an elasticity estimate.
///
/// Built deterministically from the estimate and the product's current
/// price and unit cost; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecommendation {
    /// Price the recommendation starts from
    pub current_price: f64,
    /// Gross margin at the current price, in percent
    pub current_margin_percent: f64,
    /// Price after the recommended step
    pub suggested_price: f64,
    /// Direction of the step
    pub strategy: PriceStrategy,
    /// Average quantity expected at the suggested price
    pub predicted_quantity: f64,
    /// Elasticity-based optimal price, clamped to business bounds
    pub optimal_price: f64,
    /// Expected revenue change of the step, in percent
    pub predicted_revenue_change_percent: f64,
    /// Human readable explanation
    pub rationale: String,
}

/// Fitted price elasticity of demand for one product over one period.
///
/// Created by the estimator and consumed read-only downstream. Several
/// estimates may exist per product; the most recently created one is the
/// current estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticityEstimate {
    /// Product the estimate belongs to
    pub product_id: ProductId,
    /// Elasticity coefficient, negative for normal goods
    pub coefficient: f64,
    /// In-sample R² (linear) or cross-validated R² (boosted)
    pub r_squared: f64,
    /// Two-sided p-value of the slope (linear model only)
    pub p_value: Option<f64>,
    /// Standard error of the slope (linear model only)
    pub standard_error: Option<f64>,
    /// Number of observations in the analysed window
    pub sample_size: usize,
    /// Model used for the fit
    pub model_kind: ModelKind,
    /// Uncertainty interval on the coefficient
    pub confidence_interval: Option<ConfidenceInterval>,
    /// Elasticity band
    pub classification: ElasticityClass,
    /// Analysed period
    pub period: DateWindow,
    /// Feature importances (boosted model only)
    pub feature_importances: Option<Vec<FeatureImportance>>,
    /// Recommendation attached at estimation time
    pub recommendation: PriceRecommendation,
    /// Creation timestamp; the latest estimate per product is current
    pub created_at: DateTime<Utc>,
}

impl ElasticityEstimate {
    /// Coefficient bounds to project with.
    ///
    /// Uses the confidence interval when present, otherwise scales the
    /// coefficient by the given `(lower, upper)` multipliers.
    pub fn elasticity_bounds(&self, fallback: (f64, f64)) -> (f64, f64) {
        match self.confidence_interval {
            Some(ci) => (ci.lower, ci.upper),
            None => (self.coefficient * fallback.0, self.coefficient * fallback.1),
        }
    }

    /// Whether demand is elastic (`coefficient < -1`).
    pub fn is_elastic(&self) -> bool {
        self.coefficient < -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_estimate(interval: Option<ConfidenceInterval>) -> ElasticityEstimate {
        ElasticityEstimate {
            product_id: 1,
            coefficient: -1.5,
            r_squared: 0.8,
            p_value: None,
            standard_error: None,
            sample_size: 120,
            model_kind: ModelKind::Linear,
            confidence_interval: interval,
            classification: ElasticityClass::Elastic,
            period: DateWindow::unbounded(),
            feature_importances: None,
            recommendation: PriceRecommendation {
                current_price: 100.0,
                current_margin_percent: 40.0,
                suggested_price: 95.0,
                strategy: PriceStrategy::Decrease,
                predicted_quantity: 53.75,
                optimal_price: 66.0,
                predicted_revenue_change_percent: 2.125,
                rationale: String::new(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_bounds_prefer_interval() {
        let estimate = sample_estimate(Some(ConfidenceInterval::new(-1.9, -1.1, 0.95)));
        assert_eq!(estimate.elasticity_bounds((0.8, 1.2)), (-1.9, -1.1));
    }

    #[test]
    fn test_bounds_fallback_scales_coefficient() {
        let estimate = sample_estimate(None);
        let (lower, upper) = estimate.elasticity_bounds((0.8, 1.2));
        assert!((lower - (-1.2)).abs() < 1e-12);
        assert!((upper - (-1.8)).abs() < 1e-12);
    }

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("linear".parse::<ModelKind>().unwrap(), ModelKind::Linear);
        assert_eq!(
            "linear_regression".parse::<ModelKind>().unwrap(),
            ModelKind::Linear
        );
        assert_eq!(
            "gradient-boosted".parse::<ModelKind>().unwrap(),
            ModelKind::GradientBoosted
        );
        assert_eq!(
            "gradient_boosting".parse::<ModelKind>().unwrap(),
            ModelKind::GradientBoosted
        );
        assert!("svm".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_enum_serialisation_is_snake_case() {
        let json = serde_json::to_string(&ElasticityClass::HighlyElastic).unwrap();
        assert_eq!(json, "\"highly_elastic\"");
        let json = serde_json::to_string(&ModelKind::GradientBoosted).unwrap();
        assert_eq!(json, "\"gradient_boosted\"");
    }

    #[test]
    fn test_estimate_serde_round_trip_keeps_interval() {
        let estimate = sample_estimate(Some(ConfidenceInterval::new(-2.0, -1.0, 0.95)));
        let json = serde_json::to_string(&estimate).unwrap();
        let back: ElasticityEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, estimate);
    }
}
