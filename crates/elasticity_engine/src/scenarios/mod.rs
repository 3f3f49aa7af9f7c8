//! What-if price scenarios.
//!
//! This module provides:
//! - [`ScenarioSimulator`]: Single, competitive-response, seasonal and sweep simulations
//! - [`ScenarioResult`]: Projected outcome with bounds and a [`RecommendationLabel`]
//! - [`BulkSimulation`]: Products × price changes with per-item errors
//! - [`compare`]: Best scenario by revenue, profit and volume

mod bulk;
mod compare;
mod result;
mod simulator;

pub use bulk::{BulkInput, BulkItemError, BulkSimulation, BulkSummary};
pub use compare::{compare, ScenarioComparison};
pub use result::{Bounds, RecommendationLabel, RiskLevel, ScenarioResult, SeasonalAdjustment};
pub use simulator::{Baseline, CompetitiveScenario, CompetitorResponse, PricingContext, ScenarioSimulator};
