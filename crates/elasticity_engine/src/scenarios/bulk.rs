//! Bulk simulation across products and price changes.

use chrono::NaiveDate;
use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::{ElasticityEstimate, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::result::ScenarioResult;
use super::simulator::{PricingContext, ScenarioSimulator};
use crate::error::{ElasticityError, ErrorKind};

/// One product entering a bulk simulation.
#[derive(Debug, Clone, Copy)]
pub struct BulkInput<'a> {
    /// Product reference data
    pub product: &'a Product,
    /// Current estimate, if one exists
    pub estimate: Option<&'a ElasticityEstimate>,
    /// Sales history of the product
    pub history: &'a SalesDataset,
}

/// A failed item of a bulk run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemError {
    /// Product that failed
    pub product_id: ProductId,
    /// Price change that failed; `None` when the whole product was skipped
    pub price_change_percent: Option<f64>,
    /// Failure variant
    pub kind: ErrorKind,
    /// Error message
    pub error: String,
}

impl BulkItemError {
    /// Record a failure.
    pub fn new(product_id: ProductId, price_change_percent: Option<f64>, error: &ElasticityError) -> Self {
        Self {
            product_id,
            price_change_percent,
            kind: error.kind(),
            error: error.to_string(),
        }
    }
}

/// Aggregates over the successful scenarios of a bulk run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkSummary {
    /// Successful scenarios
    pub total_scenarios: usize,
    /// Sum of the period revenue deltas
    pub total_revenue_impact: f64,
    /// Sum of the period profit deltas
    pub total_profit_impact: f64,
    /// Mean revenue change in percent, 0 with no scenarios
    pub average_revenue_change_percent: f64,
    /// Mean profit change in percent, 0 with no scenarios
    pub average_profit_change_percent: f64,
}

impl BulkSummary {
    /// Summarise a set of scenarios.
    pub fn from_scenarios(scenarios: &[ScenarioResult]) -> Self {
        if scenarios.is_empty() {
            return Self::default();
        }
        let n = scenarios.len() as f64;
        Self {
            total_scenarios: scenarios.len(),
            total_revenue_impact: scenarios.iter().map(|s| s.total_revenue_change).sum(),
            total_profit_impact: scenarios.iter().map(|s| s.total_profit_change).sum(),
            average_revenue_change_percent: scenarios
                .iter()
                .map(|s| s.revenue_change_percent)
                .sum::<f64>()
                / n,
            average_profit_change_percent: scenarios
                .iter()
                .map(|s| s.profit_change_percent)
                .sum::<f64>()
                / n,
        }
    }
}

/// Outcome of a bulk run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkSimulation {
    /// Successful scenarios, product by product in input order
    pub scenarios: Vec<ScenarioResult>,
    /// Failed items
    pub errors: Vec<BulkItemError>,
    /// Aggregates over `scenarios`
    pub summary: BulkSummary,
}

impl ScenarioSimulator {
    /// Simulate every product at every percentage price change.
    ///
    /// A product without an estimate contributes one error entry and is
    /// skipped; individual failures never abort the run.
    pub fn simulate_bulk(
        &self,
        inputs: &[BulkInput<'_>],
        price_change_percentages: &[f64],
        as_of: NaiveDate,
    ) -> BulkSimulation {
        let mut scenarios = Vec::new();
        let mut errors = Vec::new();

        for input in inputs {
            let Some(estimate) = input.estimate else {
                let error = ElasticityError::MissingElasticity {
                    product_id: input.product.id,
                };
                warn!(product_id = input.product.id, "Skipped product without estimate");
                errors.push(BulkItemError::new(input.product.id, None, &error));
                continue;
            };

            let ctx = PricingContext {
                product: input.product,
                estimate,
                history: input.history,
                as_of,
            };
            let (ok, failed) = self.sweep(&ctx, price_change_percentages);
            scenarios.extend(ok);
            errors.extend(failed);
        }

        let summary = BulkSummary::from_scenarios(&scenarios);
        info!(
            products = inputs.len(),
            scenarios = summary.total_scenarios,
            errors = errors.len(),
            total_revenue_impact = summary.total_revenue_impact,
            "Bulk simulation complete"
        );

        BulkSimulation {
            scenarios,
            errors,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = BulkSummary::from_scenarios(&[]);
        assert_eq!(summary.total_scenarios, 0);
        assert_eq!(summary.average_revenue_change_percent, 0.0);
    }

    #[test]
    fn test_item_error_keeps_message() {
        let error = ElasticityError::MissingElasticity { product_id: 4 };
        let item = BulkItemError::new(4, None, &error);
        assert_eq!(item.error, error.to_string());
        assert_eq!(item.kind, ErrorKind::MissingElasticity);
        assert!(item.price_change_percent.is_none());
    }
}
