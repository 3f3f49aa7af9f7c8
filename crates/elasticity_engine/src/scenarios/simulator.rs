//! What-if price simulation.
//!
//! Every variant is built on one primitive: move a product to a candidate
//! price, project demand with `Δ%Q = e * Δ%P` against the trailing-window
//! baseline, and compare.

use chrono::NaiveDate;
use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::{ElasticityEstimate, Product, ProductId, Season};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::bulk::BulkItemError;
use super::result::{Bounds, RecommendationLabel, ScenarioResult, SeasonalAdjustment};
use crate::config::SimulationConfig;
use crate::error::{ElasticityError, ElasticityResult};
use crate::optimizer::change;

/// Slack on the permitted change band so exact boundary prices pass.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Everything a simulation reads about one product.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    /// Product reference data
    pub product: &'a Product,
    /// Estimate to project with
    pub estimate: &'a ElasticityEstimate,
    /// Full sales history of the product
    pub history: &'a SalesDataset,
    /// Date the trailing window ends on
    pub as_of: NaiveDate,
}

/// Trailing-window daily averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Mean quantity
    pub quantity: f64,
    /// Mean revenue
    pub revenue: f64,
    /// Mean profit
    pub profit: f64,
    /// Observations averaged
    pub observations: usize,
}

/// How a competitor reacts to our price move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompetitorResponse {
    /// Days before the competitor reacts
    pub delay_days: u32,
    /// Share of our price move the competitor matches, in percent
    pub match_percent: f64,
}

/// Two-phase competitive-response projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveScenario {
    /// Product simulated
    pub product_id: ProductId,
    /// Our price change in percent
    pub our_price_change_percent: f64,
    /// Competitor behaviour assumed
    pub response: CompetitorResponse,
    /// Price change still effective after the competitor reacts, in percent
    pub effective_price_change_percent: f64,
    /// Before the competitor reacts
    pub before_response: ScenarioResult,
    /// After the competitor reacts
    pub after_response: ScenarioResult,
    /// Revenue delta summed over both phases
    pub total_revenue_impact: f64,
    /// Profit delta summed over both phases
    pub total_profit_impact: f64,
}

/// Scenario simulator.
#[derive(Debug, Clone, Default)]
pub struct ScenarioSimulator {
    config: SimulationConfig,
}

impl ScenarioSimulator {
    /// Create a simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Simulator configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Trailing-window averages used as the comparison baseline.
    ///
    /// # Errors
    ///
    /// `InsufficientHistory` when the window holds fewer than `min_history` rows.
    pub fn baseline(&self, history: &SalesDataset, as_of: NaiveDate) -> ElasticityResult<Baseline> {
        let window_days = self.config.history_window_days;
        let recent = history.trailing(as_of, window_days);
        let insufficient = || ElasticityError::InsufficientHistory {
            required: self.config.min_history,
            provided: recent.len(),
            window_days,
        };
        if recent.len() < self.config.min_history {
            return Err(insufficient());
        }

        match (recent.mean_quantity(), recent.mean_revenue(), recent.mean_profit()) {
            (Some(quantity), Some(revenue), Some(profit)) => Ok(Baseline {
                quantity,
                revenue,
                profit,
                observations: recent.len(),
            }),
            _ => Err(insufficient()),
        }
    }

    /// Simulate a move to `candidate_price` over `horizon_days`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an invalid product or a zero horizon
    /// - `PriceChangeOutOfBounds` outside the permitted change band
    /// - `InsufficientHistory` for a thin trailing window
    /// - `ZeroBaseline` when baseline revenue or profit is zero
    pub fn simulate(
        &self,
        ctx: &PricingContext<'_>,
        candidate_price: f64,
        horizon_days: u32,
    ) -> ElasticityResult<ScenarioResult> {
        self.simulate_named(ctx, candidate_price, horizon_days, None)
    }

    /// As [`simulate`](Self::simulate), with an explicit scenario name.
    pub fn simulate_named(
        &self,
        ctx: &PricingContext<'_>,
        candidate_price: f64,
        horizon_days: u32,
        name: Option<String>,
    ) -> ElasticityResult<ScenarioResult> {
        self.project(ctx, candidate_price, horizon_days, name, None)
    }

    /// Simulate our move followed by a competitor reaction.
    ///
    /// The first phase runs at our new price for `delay_days`. In the second
    /// phase the competitor has matched `match_percent` of our move, so only
    /// `our_change * (1 - match_percent / 100)` remains effective.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` unless `match_percent` is in `[0, 100]` and `delay_days >= 1`
    /// - Any error of the underlying simulations
    pub fn simulate_competitive_response(
        &self,
        ctx: &PricingContext<'_>,
        our_price_change_percent: f64,
        response: Option<CompetitorResponse>,
    ) -> ElasticityResult<CompetitiveScenario> {
        let response = response.unwrap_or(CompetitorResponse {
            delay_days: self.config.default_competitor_delay_days,
            match_percent: self.config.default_match_percent,
        });
        if !(0.0..=100.0).contains(&response.match_percent) {
            return Err(ElasticityError::invalid_input(format!(
                "match_percent must be in [0, 100], got {}",
                response.match_percent
            )));
        }
        if response.delay_days == 0 {
            return Err(ElasticityError::invalid_input("delay_days must be at least 1"));
        }

        let current_price = ctx.product.current_price;
        let before_response = self.simulate_named(
            ctx,
            current_price * (1.0 + our_price_change_percent / 100.0),
            response.delay_days,
            Some("Phase 1: Before Competitor Response".to_string()),
        )?;

        let effective = our_price_change_percent * (1.0 - response.match_percent / 100.0);
        let after_response = self.simulate_named(
            ctx,
            current_price * (1.0 + effective / 100.0),
            self.config.competitor_phase_days,
            Some("Phase 2: After Competitor Response".to_string()),
        )?;

        Ok(CompetitiveScenario {
            product_id: ctx.product.id,
            our_price_change_percent,
            response,
            effective_price_change_percent: effective,
            total_revenue_impact: before_response.total_revenue_change
                + after_response.total_revenue_change,
            total_profit_impact: before_response.total_profit_change
                + after_response.total_profit_change,
            before_response,
            after_response,
        })
    }

    /// Simulate a move during `season`.
    ///
    /// The projected daily quantity is scaled by the season's historical mean
    /// quantity relative to the overall mean (1.0 when the season never
    /// occurs), and every derived figure is recomputed from it.
    pub fn simulate_seasonal(
        &self,
        ctx: &PricingContext<'_>,
        candidate_price: f64,
        season: Season,
    ) -> ElasticityResult<ScenarioResult> {
        let factor = ctx
            .history
            .seasonal_factors()
            .get(&season)
            .copied()
            .unwrap_or(1.0);
        debug!(product_id = ctx.product.id, %season, factor, "Seasonal factor");

        self.project(
            ctx,
            candidate_price,
            self.config.seasonal_horizon_days,
            None,
            Some(SeasonalAdjustment { season, factor }),
        )
    }

    /// Simulate one product across several percentage price changes.
    ///
    /// Failures are collected per change and never abort the sweep.
    pub fn sweep(
        &self,
        ctx: &PricingContext<'_>,
        price_change_percentages: &[f64],
    ) -> (Vec<ScenarioResult>, Vec<BulkItemError>) {
        let mut scenarios = Vec::with_capacity(price_change_percentages.len());
        let mut errors = Vec::new();
        let current_price = ctx.product.current_price;

        for &change_percent in price_change_percentages {
            let name = format!("{} - {:+.1}%", ctx.product.name, change_percent);
            match self.simulate_named(
                ctx,
                current_price * (1.0 + change_percent / 100.0),
                self.config.bulk_horizon_days,
                Some(name),
            ) {
                Ok(scenario) => scenarios.push(scenario),
                Err(error) => {
                    warn!(
                        product_id = ctx.product.id,
                        change_percent,
                        %error,
                        "Skipped scenario"
                    );
                    errors.push(BulkItemError::new(ctx.product.id, Some(change_percent), &error));
                }
            }
        }
        (scenarios, errors)
    }

    fn project(
        &self,
        ctx: &PricingContext<'_>,
        candidate_price: f64,
        horizon_days: u32,
        name: Option<String>,
        seasonal: Option<SeasonalAdjustment>,
    ) -> ElasticityResult<ScenarioResult> {
        let product = ctx.product;
        product.validate()?;
        if horizon_days == 0 {
            return Err(ElasticityError::invalid_input("horizon must be at least one day"));
        }

        let current_price = product.current_price;
        let price_change_percent = (candidate_price - current_price) / current_price * 100.0;
        let (min, max) = (self.config.min_change_percent, self.config.max_change_percent);
        let within_band = price_change_percent >= min - BOUNDARY_TOLERANCE
            && price_change_percent <= max + BOUNDARY_TOLERANCE;
        if !within_band {
            return Err(ElasticityError::price_change_out_of_bounds(
                price_change_percent,
                min,
                max,
            ));
        }

        let baseline = self.baseline(ctx.history, ctx.as_of)?;
        let coefficient = ctx.estimate.coefficient;
        let factor = seasonal.map_or(1.0, |s| s.factor);

        let project_quantity = |elasticity: f64| {
            (baseline.quantity * (1.0 + elasticity * price_change_percent / 100.0) * factor).max(0.0)
        };

        // Floored at -100% in step with the quantity clamp
        let quantity_change_percent = match seasonal {
            None => coefficient * price_change_percent,
            Some(_) => ((1.0 + coefficient * price_change_percent / 100.0) * factor - 1.0) * 100.0,
        }
        .max(-100.0);
        let projected_quantity = project_quantity(coefficient);
        let projected_revenue = candidate_price * projected_quantity;
        let projected_profit = (candidate_price - product.unit_cost) * projected_quantity;

        let revenue_change_percent = change(baseline.revenue, projected_revenue, "revenue")?;
        let profit_change_percent = change(baseline.profit, projected_profit, "profit")?;

        let (lower_e, upper_e) = ctx.estimate.elasticity_bounds(self.config.fallback_band);
        let (q_lower, q_upper) = (project_quantity(lower_e), project_quantity(upper_e));

        let days = f64::from(horizon_days);
        let recommendation = RecommendationLabel::from_changes(revenue_change_percent, profit_change_percent);

        debug!(
            product_id = product.id,
            candidate_price,
            price_change_percent,
            quantity_change_percent,
            revenue_change_percent,
            profit_change_percent,
            %recommendation,
            "Simulated scenario"
        );

        Ok(ScenarioResult {
            name: name.unwrap_or_else(|| ScenarioResult::default_name(price_change_percent, horizon_days)),
            product_id: product.id,
            horizon_days,
            current_price,
            candidate_price,
            price_change: candidate_price - current_price,
            price_change_percent,
            current_daily_quantity: baseline.quantity,
            projected_daily_quantity: projected_quantity,
            quantity_change_percent,
            current_daily_revenue: baseline.revenue,
            projected_daily_revenue: projected_revenue,
            revenue_change_percent,
            current_daily_profit: baseline.profit,
            projected_daily_profit: projected_profit,
            profit_change_percent,
            total_current_volume: baseline.quantity * days,
            total_projected_volume: projected_quantity * days,
            total_current_revenue: baseline.revenue * days,
            total_projected_revenue: projected_revenue * days,
            total_revenue_change: (projected_revenue - baseline.revenue) * days,
            total_current_profit: baseline.profit * days,
            total_projected_profit: projected_profit * days,
            total_profit_change: (projected_profit - baseline.profit) * days,
            current_margin_percent: product.margin_percent(),
            projected_margin_percent: (candidate_price - product.unit_cost) / candidate_price * 100.0,
            elasticity: coefficient,
            classification: ctx.estimate.classification,
            quantity_bounds: Bounds::spanning(q_lower, q_upper),
            revenue_bounds: Bounds::spanning(candidate_price * q_lower, candidate_price * q_upper),
            recommendation,
            seasonal_adjustment: seasonal,
        })
    }
}
