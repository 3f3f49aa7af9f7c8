//! Scenario result types.

use elasticity_core::types::{ElasticityClass, ProductId, Season};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict attached to a simulated scenario.
///
/// Derived from the revenue and profit changes, tested in order:
///
/// | Label | Condition |
/// |---|---|
/// | `HighlyRecommended` | revenue > 5% and profit > 5% |
/// | `Recommended` | revenue > 0% and profit > 0% |
/// | `Consider` | profit > 0% and revenue < 0% |
/// | `Caution` | profit > -5% and revenue < 0% |
/// | `NotRecommended` | otherwise |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLabel {
    /// Both revenue and profit rise by more than 5%
    HighlyRecommended,
    /// Both revenue and profit rise
    Recommended,
    /// Profit rises while revenue falls
    Consider,
    /// Small profit loss with falling revenue
    Caution,
    /// Anything else
    NotRecommended,
}

/// Risk attached to a recommendation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

impl RecommendationLabel {
    /// Label for the given percent changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use elasticity_engine::scenarios::RecommendationLabel;
    ///
    /// assert_eq!(RecommendationLabel::from_changes(6.0, 8.0), RecommendationLabel::HighlyRecommended);
    /// assert_eq!(RecommendationLabel::from_changes(-2.0, 3.0), RecommendationLabel::Consider);
    /// assert_eq!(RecommendationLabel::from_changes(3.5, -13.75), RecommendationLabel::NotRecommended);
    /// ```
    pub fn from_changes(revenue_change_percent: f64, profit_change_percent: f64) -> Self {
        let revenue = revenue_change_percent;
        let profit = profit_change_percent;
        if revenue > 5.0 && profit > 5.0 {
            Self::HighlyRecommended
        } else if revenue > 0.0 && profit > 0.0 {
            Self::Recommended
        } else if profit > 0.0 && revenue < 0.0 {
            Self::Consider
        } else if profit > -5.0 && revenue < 0.0 {
            Self::Caution
        } else {
            Self::NotRecommended
        }
    }

    /// Human readable explanation.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Both revenue and profit increase significantly",
            Self::Recommended => "Positive impact on revenue and profit",
            Self::Consider => "Profit increases but revenue decreases (volume play)",
            Self::Caution => "Slight profit decrease, monitor closely",
            Self::NotRecommended => "Negative impact on profitability",
        }
    }

    /// Risk level of acting on the scenario.
    pub fn risk_level(&self) -> RiskLevel {
        match self {
            Self::HighlyRecommended | Self::Recommended => RiskLevel::Low,
            Self::Consider | Self::Caution => RiskLevel::Medium,
            Self::NotRecommended => RiskLevel::High,
        }
    }

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::Recommended => "Recommended",
            Self::Consider => "Consider",
            Self::Caution => "Caution",
            Self::NotRecommended => "Not Recommended",
        }
    }
}

impl fmt::Display for RecommendationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed range of a projected quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Smaller value
    pub lower: f64,
    /// Larger value
    pub upper: f64,
}

impl Bounds {
    /// Bounds spanning two values in either order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// Whether the value lies inside the closed range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Seasonal scaling applied to a scenario's projected quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjustment {
    /// Season the projection targets
    pub season: Season,
    /// Season mean quantity over overall mean quantity
    pub factor: f64,
}

/// Projected outcome of moving one product to a candidate price.
///
/// Daily figures compare the trailing-window averages with the projection;
/// totals scale both by the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Product simulated
    pub product_id: ProductId,
    /// Projection horizon in days
    pub horizon_days: u32,

    /// Current list price
    pub current_price: f64,
    /// Candidate price
    pub candidate_price: f64,
    /// `candidate_price - current_price`
    pub price_change: f64,
    /// Price change in percent
    pub price_change_percent: f64,

    /// Mean daily quantity in the trailing window
    pub current_daily_quantity: f64,
    /// Projected daily quantity at the candidate price
    pub projected_daily_quantity: f64,
    /// Quantity change in percent
    pub quantity_change_percent: f64,

    /// Mean daily revenue in the trailing window
    pub current_daily_revenue: f64,
    /// Projected daily revenue
    pub projected_daily_revenue: f64,
    /// Revenue change in percent
    pub revenue_change_percent: f64,

    /// Mean daily profit in the trailing window
    pub current_daily_profit: f64,
    /// Projected daily profit
    pub projected_daily_profit: f64,
    /// Profit change in percent
    pub profit_change_percent: f64,

    /// Baseline volume over the horizon
    pub total_current_volume: f64,
    /// Projected volume over the horizon
    pub total_projected_volume: f64,
    /// Baseline revenue over the horizon
    pub total_current_revenue: f64,
    /// Projected revenue over the horizon
    pub total_projected_revenue: f64,
    /// Projected minus baseline revenue over the horizon
    pub total_revenue_change: f64,
    /// Baseline profit over the horizon
    pub total_current_profit: f64,
    /// Projected profit over the horizon
    pub total_projected_profit: f64,
    /// Projected minus baseline profit over the horizon
    pub total_profit_change: f64,

    /// Gross margin at the current price, in percent
    pub current_margin_percent: f64,
    /// Gross margin at the candidate price, in percent
    pub projected_margin_percent: f64,

    /// Coefficient used for the projection
    pub elasticity: f64,
    /// Band of that coefficient
    pub classification: ElasticityClass,
    /// Daily quantity at the coefficient's interval bounds
    pub quantity_bounds: Bounds,
    /// Daily revenue at the coefficient's interval bounds
    pub revenue_bounds: Bounds,

    /// Verdict
    pub recommendation: RecommendationLabel,
    /// Seasonal scaling, when applied
    pub seasonal_adjustment: Option<SeasonalAdjustment>,
}

impl ScenarioResult {
    /// Default scenario name, e.g. `Price Increase 10.0% - 30 days`.
    pub fn default_name(price_change_percent: f64, horizon_days: u32) -> String {
        let direction = if price_change_percent > 0.0 {
            "Increase"
        } else {
            "Decrease"
        };
        format!(
            "Price {} {:.1}% - {} days",
            direction,
            price_change_percent.abs(),
            horizon_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        use RecommendationLabel::*;
        assert_eq!(RecommendationLabel::from_changes(5.1, 5.1), HighlyRecommended);
        assert_eq!(RecommendationLabel::from_changes(5.0, 6.0), Recommended);
        assert_eq!(RecommendationLabel::from_changes(0.1, 0.1), Recommended);
        assert_eq!(RecommendationLabel::from_changes(-0.1, 0.1), Consider);
        assert_eq!(RecommendationLabel::from_changes(-1.0, -4.9), Caution);
        assert_eq!(RecommendationLabel::from_changes(-1.0, 0.0), Caution);
        assert_eq!(RecommendationLabel::from_changes(-1.0, -5.0), NotRecommended);
        assert_eq!(RecommendationLabel::from_changes(0.0, 3.0), NotRecommended);
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RecommendationLabel::Recommended.risk_level(), RiskLevel::Low);
        assert_eq!(RecommendationLabel::Caution.risk_level(), RiskLevel::Medium);
        assert_eq!(RecommendationLabel::NotRecommended.risk_level(), RiskLevel::High);
        assert!(RecommendationLabel::Consider.reason().contains("volume play"));
    }

    #[test]
    fn test_default_name() {
        assert_eq!(ScenarioResult::default_name(10.0, 30), "Price Increase 10.0% - 30 days");
        assert_eq!(ScenarioResult::default_name(-7.5, 14), "Price Decrease 7.5% - 14 days");
    }

    #[test]
    fn test_bounds_are_ordered() {
        let bounds = Bounds::spanning(60.0, 55.0);
        assert_eq!(bounds.lower, 55.0);
        assert!(bounds.contains(57.5));
    }

    #[test]
    fn test_label_serialises_snake_case() {
        let json = serde_json::to_string(&RecommendationLabel::HighlyRecommended).unwrap();
        assert_eq!(json, "\"highly_recommended\"");
    }
}
