//! Elasticity classification and price recommendations.

use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::{ElasticityClass, PriceRecommendation, PriceStrategy, Product};

use crate::config::RecommenderConfig;
use crate::error::{ElasticityError, ElasticityResult};

const ELASTIC_RATIONALE: &str =
    "Demand is elastic. Price reduction will increase quantity more than proportionally.";
const INELASTIC_RATIONALE: &str =
    "Demand is inelastic. Price increase will boost revenue without significant volume loss.";

/// Band of a coefficient's absolute value.
///
/// Bands are tested in a fixed order: highly elastic (`> 2`), elastic
/// (`> 1`), unit elastic (`[0.9, 1.1]`), then inelastic. The elastic band
/// is tested first, so `(1.0, 1.1]` is elastic.
///
/// # Examples
///
/// ```
/// use elasticity_core::types::ElasticityClass;
/// use elasticity_engine::classify;
///
/// assert_eq!(classify(-2.5), ElasticityClass::HighlyElastic);
/// assert_eq!(classify(-2.0), ElasticityClass::Elastic);
/// assert_eq!(classify(-1.05), ElasticityClass::Elastic);
/// assert_eq!(classify(-1.0), ElasticityClass::UnitElastic);
/// assert_eq!(classify(-0.9), ElasticityClass::UnitElastic);
/// assert_eq!(classify(-0.5), ElasticityClass::Inelastic);
/// ```
pub fn classify(coefficient: f64) -> ElasticityClass {
    let magnitude = coefficient.abs();
    if magnitude > 2.0 {
        ElasticityClass::HighlyElastic
    } else if magnitude > 1.0 {
        ElasticityClass::Elastic
    } else if (0.9..=1.1).contains(&magnitude) {
        ElasticityClass::UnitElastic
    } else {
        ElasticityClass::Inelastic
    }
}

/// Elasticity-based optimal price, clamped to `[unit_cost * min_markup, current_price * max_price_multiple]`.
///
/// The floor wins when the bounds cross.
pub fn recommended_optimal_price(product: &Product, coefficient: f64, config: &RecommenderConfig) -> f64 {
    let floor = product.unit_cost * config.min_markup;
    let ceiling = product.current_price * config.max_price_multiple;
    let magnitude = coefficient.abs();

    let raw = if magnitude == 0.0 {
        ceiling
    } else if coefficient < -1.0 {
        product.unit_cost / (1.0 + 1.0 / magnitude)
    } else {
        product.unit_cost * (1.0 + 1.0 / magnitude)
    };
    raw.min(ceiling).max(floor)
}

/// Derive a price recommendation from a coefficient and the analysed history.
///
/// Elastic demand (`|e| > 1`) gets a step down, anything else a step up; the
/// predicted quantity moves by `|e| * step` relative to the mean quantity.
///
/// # Errors
///
/// - `InsufficientData` for an empty history
/// - `ZeroBaseline` when the mean quantity or current price is zero
pub fn recommend(
    product: &Product,
    coefficient: f64,
    observations: &SalesDataset,
    config: &RecommenderConfig,
) -> ElasticityResult<PriceRecommendation> {
    let avg_quantity = observations
        .mean_quantity()
        .ok_or_else(|| ElasticityError::insufficient_data(1, 0))?;

    let current_price = product.current_price;
    let current_revenue = current_price * avg_quantity;
    if current_revenue == 0.0 {
        return Err(ElasticityError::ZeroBaseline {
            metric: "revenue",
        });
    }

    let step = config.step_fraction;
    let magnitude = coefficient.abs();
    let (strategy, suggested_price, predicted_quantity, rationale) = if magnitude > 1.0 {
        (
            PriceStrategy::Decrease,
            current_price * (1.0 - step),
            avg_quantity * (1.0 + magnitude * step),
            ELASTIC_RATIONALE,
        )
    } else {
        (
            PriceStrategy::Increase,
            current_price * (1.0 + step),
            avg_quantity * (1.0 - magnitude * step),
            INELASTIC_RATIONALE,
        )
    };

    let predicted_revenue = suggested_price * predicted_quantity;

    Ok(PriceRecommendation {
        current_price,
        current_margin_percent: product.margin_percent(),
        suggested_price,
        strategy,
        predicted_quantity,
        optimal_price: recommended_optimal_price(product, coefficient, config),
        predicted_revenue_change_percent: (predicted_revenue - current_revenue) / current_revenue * 100.0,
        rationale: rationale.to_string(),
    })
}
