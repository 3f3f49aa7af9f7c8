//! Side-by-side comparison of simulated scenarios.

use serde::{Deserialize, Serialize};

use super::result::ScenarioResult;
use crate::error::{ElasticityError, ElasticityResult};

/// Best scenario under each of three independent criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Scenarios compared
    pub total_scenarios: usize,
    /// Highest revenue change
    pub best_for_revenue: ScenarioResult,
    /// Highest profit change
    pub best_for_profit: ScenarioResult,
    /// Highest quantity change
    pub best_for_volume: ScenarioResult,
}

/// Pick the arg-max of revenue, profit and quantity change.
///
/// Ties keep the earliest scenario.
///
/// # Errors
///
/// `InvalidInput` for an empty slice.
pub fn compare(scenarios: &[ScenarioResult]) -> ElasticityResult<ScenarioComparison> {
    let best_by = |key: fn(&ScenarioResult) -> f64| {
        scenarios
            .iter()
            .reduce(|best, s| if key(s) > key(best) { s } else { best })
            .cloned()
            .ok_or_else(|| ElasticityError::invalid_input("no scenarios to compare"))
    };

    Ok(ScenarioComparison {
        total_scenarios: scenarios.len(),
        best_for_revenue: best_by(|s| s.revenue_change_percent)?,
        best_for_profit: best_by(|s| s.profit_change_percent)?,
        best_for_volume: best_by(|s| s.quantity_change_percent)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{Bounds, RecommendationLabel};
    use elasticity_core::types::ElasticityClass;

    fn scenario(name: &str, quantity: f64, revenue: f64, profit: f64) -> ScenarioResult {
        ScenarioResult {
            name: name.to_string(),
            product_id: 1,
            horizon_days: 30,
            current_price: 100.0,
            candidate_price: 100.0,
            price_change: 0.0,
            price_change_percent: 0.0,
            current_daily_quantity: 10.0,
            projected_daily_quantity: 10.0,
            quantity_change_percent: quantity,
            current_daily_revenue: 1000.0,
            projected_daily_revenue: 1000.0,
            revenue_change_percent: revenue,
            current_daily_profit: 400.0,
            projected_daily_profit: 400.0,
            profit_change_percent: profit,
            total_current_volume: 300.0,
            total_projected_volume: 300.0,
            total_current_revenue: 30000.0,
            total_projected_revenue: 30000.0,
            total_revenue_change: 0.0,
            total_current_profit: 12000.0,
            total_projected_profit: 12000.0,
            total_profit_change: 0.0,
            current_margin_percent: 40.0,
            projected_margin_percent: 40.0,
            elasticity: -1.2,
            classification: ElasticityClass::Elastic,
            quantity_bounds: Bounds::spanning(9.0, 11.0),
            revenue_bounds: Bounds::spanning(900.0, 1100.0),
            recommendation: RecommendationLabel::from_changes(revenue, profit),
            seasonal_adjustment: None,
        }
    }

    #[test]
    fn test_picks_are_independent() {
        let scenarios = vec![
            scenario("cut", 20.0, 4.0, -8.0),
            scenario("hold", 0.0, 0.0, 0.0),
            scenario("raise", -10.0, 2.0, 12.0),
        ];
        let comparison = compare(&scenarios).unwrap();

        assert_eq!(comparison.total_scenarios, 3);
        assert_eq!(comparison.best_for_revenue.name, "cut");
        assert_eq!(comparison.best_for_profit.name, "raise");
        assert_eq!(comparison.best_for_volume.name, "cut");
    }

    #[test]
    fn test_ties_keep_first() {
        let scenarios = vec![scenario("a", 1.0, 1.0, 1.0), scenario("b", 1.0, 1.0, 1.0)];
        let comparison = compare(&scenarios).unwrap();
        assert_eq!(comparison.best_for_revenue.name, "a");
        assert_eq!(comparison.best_for_volume.name, "a");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(compare(&[]), Err(ElasticityError::InvalidInput(_))));
    }
}
