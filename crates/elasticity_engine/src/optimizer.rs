//! Closed-form revenue-optimal pricing.
//!
//! For constant-elasticity demand `Q = Q0 (P / P0)^e` with `e < -1`, revenue
//! `P * Q` peaks at `P* = P0 * e / (e + 1)`. Inelastic demand has no interior
//! optimum, so a fixed uplift is applied instead. Either way the price is
//! clamped to business bounds before quantities are projected.

use elasticity_core::dataset::SalesDataset;
use elasticity_core::math::stats::percent_change;
use elasticity_core::types::{ElasticityEstimate, Product};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OptimizerConfig;
use crate::error::{ElasticityError, ElasticityResult};

/// Outcome of a revenue optimisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Current list price
    pub current_price: f64,
    /// Optimal price after constraints and clamping
    pub optimal_price: f64,
    /// Change from current to optimal price, in percent
    pub price_change_percent: f64,
    /// Mean historical quantity
    pub current_quantity: f64,
    /// Projected quantity at the optimal price
    pub predicted_quantity: f64,
    /// Change in quantity, in percent
    pub quantity_change_percent: f64,
    /// Current price times mean quantity
    pub current_revenue: f64,
    /// Optimal price times projected quantity
    pub predicted_revenue: f64,
    /// Change in revenue, in percent
    pub revenue_change_percent: f64,
    /// Current unit margin times mean quantity
    pub current_profit: f64,
    /// Optimal unit margin times projected quantity
    pub predicted_profit: f64,
    /// Change in profit, in percent
    pub profit_change_percent: f64,
    /// Coefficient the projection used
    pub elasticity_used: f64,
}

/// Revenue optimiser.
#[derive(Debug, Clone, Default)]
pub struct RevenueOptimizer {
    config: OptimizerConfig,
}

impl RevenueOptimizer {
    /// Create an optimiser.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimal price before projection.
    ///
    /// `min_margin` is a fractional gross margin; when given the price is
    /// raised to at least `unit_cost / (1 - min_margin)`. The result always
    /// lies in `[unit_cost * min_markup, current_price * max_price_multiple]`
    /// (the floor wins when the bounds cross).
    ///
    /// # Examples
    ///
    /// ```
    /// use elasticity_core::types::Product;
    /// use elasticity_engine::RevenueOptimizer;
    ///
    /// let product = Product::new(1, "Lamp", 100.0, 40.0);
    /// let optimizer = RevenueOptimizer::default();
    ///
    /// // -3 / (-3 + 1) = 1.5
    /// assert!((optimizer.optimal_price(&product, -3.0, None).unwrap() - 150.0).abs() < 1e-9);
    /// // inelastic demand gets the fixed uplift
    /// assert!((optimizer.optimal_price(&product, -0.4, None).unwrap() - 120.0).abs() < 1e-9);
    /// ```
    pub fn optimal_price(
        &self,
        product: &Product,
        coefficient: f64,
        min_margin: Option<f64>,
    ) -> ElasticityResult<f64> {
        let current_price = product.current_price;
        let mut price = if coefficient >= -1.0 {
            current_price * self.config.inelastic_uplift
        } else {
            current_price * coefficient / (coefficient + 1.0)
        };

        if let Some(margin) = min_margin {
            if !(0.0..1.0).contains(&margin) {
                return Err(ElasticityError::invalid_input(format!(
                    "minimum margin must be in [0, 1), got {}",
                    margin
                )));
            }
            price = price.max(product.unit_cost / (1.0 - margin));
        }

        let floor = product.unit_cost * self.config.min_markup;
        let ceiling = current_price * self.config.max_price_multiple;
        Ok(price.min(ceiling).max(floor))
    }

    /// Optimise the price of `product` given its current estimate.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an invalid product or margin
    /// - `InsufficientData` for an empty history
    /// - `ZeroBaseline` when current quantity, revenue or profit is zero
    pub fn optimize(
        &self,
        product: &Product,
        estimate: &ElasticityEstimate,
        observations: &SalesDataset,
        min_margin: Option<f64>,
    ) -> ElasticityResult<OptimizationResult> {
        product.validate()?;
        let coefficient = estimate.coefficient;
        let optimal_price = self.optimal_price(product, coefficient, min_margin)?;

        let current_quantity = observations
            .mean_quantity()
            .ok_or_else(|| ElasticityError::insufficient_data(1, 0))?;
        let current_price = product.current_price;
        let unit_cost = product.unit_cost;

        let predicted_quantity = current_quantity * (optimal_price / current_price).powf(coefficient);
        let current_revenue = current_price * current_quantity;
        let predicted_revenue = optimal_price * predicted_quantity;
        let current_profit = (current_price - unit_cost) * current_quantity;
        let predicted_profit = (optimal_price - unit_cost) * predicted_quantity;

        debug!(
            product_id = product.id,
            coefficient,
            optimal_price,
            predicted_quantity,
            "Optimised revenue"
        );

        Ok(OptimizationResult {
            current_price,
            optimal_price,
            price_change_percent: change(current_price, optimal_price, "price")?,
            current_quantity,
            predicted_quantity,
            quantity_change_percent: change(current_quantity, predicted_quantity, "quantity")?,
            current_revenue,
            predicted_revenue,
            revenue_change_percent: change(current_revenue, predicted_revenue, "revenue")?,
            current_profit,
            predicted_profit,
            profit_change_percent: change(current_profit, predicted_profit, "profit")?,
            elasticity_used: coefficient,
        })
    }
}

pub(crate) fn change(base: f64, value: f64, metric: &'static str) -> ElasticityResult<f64> {
    percent_change(base, value).ok_or(ElasticityError::ZeroBaseline { metric })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn product() -> Product {
        Product::new(1, "Lamp", 100.0, 60.0)
    }

    #[test]
    fn test_elastic_formula() {
        let optimizer = RevenueOptimizer::default();
        // -2 / (-2 + 1) = 2, at the ceiling
        assert_relative_eq!(optimizer.optimal_price(&product(), -2.0, None).unwrap(), 200.0);
        // -5 / -4 = 1.25
        assert_relative_eq!(optimizer.optimal_price(&product(), -5.0, None).unwrap(), 125.0);
    }

    #[test]
    fn test_extreme_coefficients_are_clamped() {
        let optimizer = RevenueOptimizer::default();
        let p = product();
        for coefficient in [-50.0, -1.0001, -1.0, -0.01, 0.0, 3.0] {
            let price = optimizer.optimal_price(&p, coefficient, None).unwrap();
            assert!(price >= 66.0 - 1e-9, "{} -> {}", coefficient, price);
            assert!(price <= 200.0 + 1e-9, "{} -> {}", coefficient, price);
        }
    }

    #[test]
    fn test_near_unit_elastic_hits_ceiling() {
        // -1.0001 / -0.0001 is about 10001x
        let price = RevenueOptimizer::default()
            .optimal_price(&product(), -1.0001, None)
            .unwrap();
        assert_relative_eq!(price, 200.0);
    }

    #[test]
    fn test_margin_constraint_raises_price() {
        let optimizer = RevenueOptimizer::default();
        // -50 / -49 is about 102.04; 60 / (1 - 0.5) = 120
        let price = optimizer.optimal_price(&product(), -50.0, Some(0.5)).unwrap();
        assert_relative_eq!(price, 120.0);
        assert!(optimizer.optimal_price(&product(), -2.0, Some(1.0)).is_err());
    }
}
