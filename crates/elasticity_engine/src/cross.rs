//! Pairwise cross-price elasticity.
//!
//! Measures how the quantity of product A responds to the price of product
//! B by regressing `ln(quantity_a)` on `ln(price_b)` over the days both
//! products sold.

use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::ProductId;
use elasticity_models::regression::SimpleOls;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{ElasticityError, ElasticityResult};

/// Fewest common trading days accepted.
pub const MIN_COMMON_DATES: usize = 10;

/// Coefficient magnitude separating related from independent products.
const RELATIONSHIP_THRESHOLD: f64 = 0.3;

/// Demand relationship between two products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossRelationship {
    /// B getting dearer raises demand for A (coefficient > 0.3)
    Substitutes,
    /// B getting dearer lowers demand for A (coefficient < -0.3)
    Complements,
    /// Anything in between
    Independent,
}

impl CrossRelationship {
    /// Relationship implied by a cross-price coefficient.
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient > RELATIONSHIP_THRESHOLD {
            Self::Substitutes
        } else if coefficient < -RELATIONSHIP_THRESHOLD {
            Self::Complements
        } else {
            Self::Independent
        }
    }
}

impl fmt::Display for CrossRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Substitutes => "substitutes",
            Self::Complements => "complements",
            Self::Independent => "independent",
        };
        f.write_str(name)
    }
}

/// Fitted cross-price elasticity of A's demand on B's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossElasticity {
    /// Product whose demand responds
    pub product_a: ProductId,
    /// Product whose price moves
    pub product_b: ProductId,
    /// Slope of `ln(quantity_a)` on `ln(price_b)`
    pub coefficient: f64,
    /// In-sample R²
    pub r_squared: f64,
    /// Two-sided p-value of the slope
    pub p_value: f64,
    /// Common days used
    pub sample_size: usize,
    /// Implied relationship
    pub relationship: CrossRelationship,
}

/// Estimate the cross-price elasticity of `a`'s demand on `b`'s price.
///
/// Each history is first aggregated per day (summed quantity, mean price);
/// days where either value is non-positive are skipped.
///
/// # Errors
///
/// - `InsufficientData` with fewer than [`MIN_COMMON_DATES`] common days
/// - `Model` when B's price never varies
pub fn cross_elasticity(
    product_a: ProductId,
    history_a: &SalesDataset,
    product_b: ProductId,
    history_b: &SalesDataset,
) -> ElasticityResult<CrossElasticity> {
    let daily_a = history_a.daily_totals();
    let daily_b = history_b.daily_totals();

    let (log_price_b, log_quantity_a): (Vec<f64>, Vec<f64>) = daily_a
        .iter()
        .filter_map(|(date, &(quantity_a, _))| {
            let &(_, price_b) = daily_b.get(date)?;
            (quantity_a > 0.0 && price_b > 0.0).then(|| (price_b.ln(), quantity_a.ln()))
        })
        .unzip();

    if log_price_b.len() < MIN_COMMON_DATES {
        return Err(ElasticityError::insufficient_data(
            MIN_COMMON_DATES,
            log_price_b.len(),
        ));
    }

    let fit = SimpleOls::fit(&log_price_b, &log_quantity_a)?;
    let relationship = CrossRelationship::from_coefficient(fit.slope);
    debug!(product_a, product_b, coefficient = fit.slope, %relationship, "Cross elasticity");

    Ok(CrossElasticity {
        product_a,
        product_b,
        coefficient: fit.slope,
        r_squared: fit.r_squared,
        p_value: fit.p_value,
        sample_size: log_price_b.len(),
        relationship,
    })
}
