//! Demand, revenue and profit curves over a price range.
//!
//! Uses the power-law form `Q = Q_avg * (P / P_current)^e`, which differs
//! from the simulator's linear percentage approximation for large moves.

use elasticity_core::dataset::SalesDataset;
use elasticity_core::math::stats::linspace;
use elasticity_core::types::{ElasticityEstimate, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::config::CurveConfig;
use crate::error::{ElasticityError, ElasticityResult};

/// One sampled point of a price curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Sampled price
    pub price: f64,
    /// Projected quantity
    pub quantity: f64,
    /// `price * quantity`
    pub revenue: f64,
    /// `(price - unit_cost) * quantity`
    pub profit: f64,
}

/// Price curve of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCurve {
    /// Product the curve belongs to
    pub product_id: ProductId,
    /// Reference price
    pub current_price: f64,
    /// Mean historical quantity at the reference price
    pub current_quantity: f64,
    /// Coefficient used
    pub elasticity: f64,
    /// Points in increasing price order
    pub points: Vec<CurvePoint>,
}

impl PriceCurve {
    /// Point with the highest revenue; the first wins ties.
    pub fn revenue_maximising(&self) -> Option<&CurvePoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.revenue > best.revenue { p } else { best })
    }

    /// Point with the highest profit; the first wins ties.
    pub fn profit_maximising(&self) -> Option<&CurvePoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.profit > best.profit { p } else { best })
    }
}

/// Price curve generator.
#[derive(Debug, Clone, Default)]
pub struct CurveGenerator {
    config: CurveConfig,
}

impl CurveGenerator {
    /// Create a generator.
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }

    /// Sample the curve over `price_range`, by default a band around the current price.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an invalid product or an empty/non-positive range
    /// - `InsufficientData` for an empty history
    pub fn curve(
        &self,
        product: &Product,
        estimate: &ElasticityEstimate,
        observations: &SalesDataset,
        price_range: Option<(f64, f64)>,
    ) -> ElasticityResult<PriceCurve> {
        product.validate()?;
        let current_price = product.current_price;
        let (low, high) = price_range.unwrap_or((
            current_price * self.config.lower_multiple,
            current_price * self.config.upper_multiple,
        ));
        if !(low > 0.0 && low <= high && high.is_finite()) {
            return Err(ElasticityError::invalid_input(format!(
                "price range must satisfy 0 < low <= high, got [{}, {}]",
                low, high
            )));
        }

        let current_quantity = observations
            .mean_quantity()
            .ok_or_else(|| ElasticityError::insufficient_data(1, 0))?;
        let coefficient = estimate.coefficient;

        let points = linspace(low, high, self.config.points)
            .into_iter()
            .map(|price| {
                let quantity = current_quantity * (price / current_price).powf(coefficient);
                CurvePoint {
                    price,
                    quantity,
                    revenue: price * quantity,
                    profit: (price - product.unit_cost) * quantity,
                }
            })
            .collect();

        Ok(PriceCurve {
            product_id: product.id,
            current_price,
            current_quantity,
            elasticity: coefficient,
            points,
        })
    }
}
