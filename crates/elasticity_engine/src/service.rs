//! Product-id facade over the engine.
//!
//! `ElasticityService` resolves products, history and estimates through an
//! [`ElasticityProvider`] and hands plain values to the estimator,
//! optimiser, simulator and curve generator. Estimates are saved through
//! the provider after fitting; nothing else is written.

use chrono::{NaiveDate, Utc};
use elasticity_core::dataset::SalesDataset;
use elasticity_core::types::{
    DateWindow, ElasticityClass, ElasticityEstimate, ModelKind, PriceStrategy, Product, ProductId,
    Season,
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::config::EngineConfig;
use crate::cross::{cross_elasticity, CrossElasticity};
use crate::curve::{CurveGenerator, PriceCurve};
use crate::error::{ElasticityError, ElasticityResult, ErrorKind};
use crate::estimator::ElasticityEstimator;
use crate::optimizer::{OptimizationResult, RevenueOptimizer};
use crate::ports::ElasticityProvider;
use crate::scenarios::{
    compare, BulkInput, BulkItemError, BulkSimulation, CompetitiveScenario, CompetitorResponse,
    PricingContext, ScenarioComparison, ScenarioResult, ScenarioSimulator,
};

/// A product that failed during bulk estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateFailure {
    /// Product that failed
    pub product_id: ProductId,
    /// Failure variant
    pub kind: ErrorKind,
    /// Error message
    pub error: String,
}

/// Outcome of [`ElasticityService::estimate_bulk`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkEstimation {
    /// Stored estimates in input order
    pub successes: Vec<ElasticityEstimate>,
    /// Products that failed
    pub errors: Vec<EstimateFailure>,
    /// `successes.len()`
    pub total_calculated: usize,
    /// `errors.len()`
    pub total_errors: usize,
}

/// One row of the recommendation overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecommendation {
    /// Product
    pub product_id: ProductId,
    /// Product name
    pub name: String,
    /// Catalogue category
    pub category: String,
    /// Current list price
    pub current_price: f64,
    /// Clamped elasticity-based optimal price
    pub optimal_price: f64,
    /// Recommended direction
    pub strategy: PriceStrategy,
    /// Expected revenue change of the recommended step, in percent
    pub expected_revenue_change_percent: f64,
    /// Elasticity band
    pub classification: ElasticityClass,
    /// Elasticity coefficient
    pub coefficient: f64,
}

/// Engine facade addressing products by id.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, NaiveDate};
/// use elasticity_core::types::{DateWindow, ModelKind, Product, SaleObservation};
/// use elasticity_engine::config::EngineConfig;
/// use elasticity_engine::provider::InMemoryProvider;
/// use elasticity_engine::service::ElasticityService;
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
/// let provider = InMemoryProvider::new();
/// provider.insert_product(Product::new(1, "Lamp", 100.0, 60.0));
/// provider.record_sales(
///     1,
///     (0..60).map(|i| {
///         let price = 90.0 + (i % 5) as f64 * 5.0;
///         let quantity = 1.0e5 * price.powf(-1.5);
///         SaleObservation::new(as_of - Duration::days(i), price, quantity, 60.0)
///     }),
/// );
///
/// let service = ElasticityService::new(provider, EngineConfig::default()).with_as_of(as_of);
/// let estimate = service
///     .estimate_elasticity(1, &DateWindow::unbounded(), ModelKind::Linear)
///     .unwrap();
/// assert!((estimate.coefficient + 1.5).abs() < 1e-9);
///
/// let scenario = service.simulate_scenario(1, 95.0, 30).unwrap();
/// assert!((scenario.quantity_change_percent - 7.5).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct ElasticityService<P> {
    provider: P,
    estimator: ElasticityEstimator,
    optimizer: RevenueOptimizer,
    simulator: ScenarioSimulator,
    curves: CurveGenerator,
    as_of: NaiveDate,
}

impl<P: ElasticityProvider> ElasticityService<P> {
    /// Create a service evaluating trailing windows as of today (UTC).
    pub fn new(provider: P, config: EngineConfig) -> Self {
        Self {
            provider,
            estimator: ElasticityEstimator::new(config.estimator, config.recommender),
            optimizer: RevenueOptimizer::new(config.optimizer),
            simulator: ScenarioSimulator::new(config.simulation),
            curves: CurveGenerator::new(config.curve),
            as_of: Utc::now().date_naive(),
        }
    }

    /// Evaluate trailing windows as of `as_of` instead of today.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Date trailing windows end on.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// Underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Estimate and store the elasticity of one product.
    #[instrument(skip(self))]
    pub fn estimate_elasticity(
        &self,
        product_id: ProductId,
        window: &DateWindow,
        model_kind: ModelKind,
    ) -> ElasticityResult<ElasticityEstimate> {
        let product = self.product(product_id)?;
        let history = self.history(product_id);
        let estimate = self.estimator.estimate(&product, &history, model_kind, window)?;
        self.provider.save(estimate.clone());
        Ok(estimate)
    }

    /// Estimate every product over its full history, collecting failures.
    #[instrument(skip(self))]
    pub fn estimate_bulk(&self, product_ids: &[ProductId], model_kind: ModelKind) -> BulkEstimation {
        let window = DateWindow::unbounded();
        let mut successes = Vec::new();
        let mut errors = Vec::new();

        for &product_id in product_ids {
            match self.estimate_elasticity(product_id, &window, model_kind) {
                Ok(estimate) => successes.push(estimate),
                Err(error) => {
                    warn!(product_id, %error, "Estimation failed");
                    errors.push(EstimateFailure {
                        product_id,
                        kind: error.kind(),
                        error: error.to_string(),
                    });
                }
            }
        }

        BulkEstimation {
            total_calculated: successes.len(),
            total_errors: errors.len(),
            successes,
            errors,
        }
    }

    /// Revenue-optimal price of one product from its current estimate.
    #[instrument(skip(self))]
    pub fn optimize_revenue(
        &self,
        product_id: ProductId,
        min_margin: Option<f64>,
    ) -> ElasticityResult<OptimizationResult> {
        let product = self.product(product_id)?;
        let estimate = self.current_estimate(product_id)?;
        let history = self.history(product_id);
        self.optimizer.optimize(&product, &estimate, &history, min_margin)
    }

    /// Simulate one product at a candidate price.
    #[instrument(skip(self))]
    pub fn simulate_scenario(
        &self,
        product_id: ProductId,
        candidate_price: f64,
        horizon_days: u32,
    ) -> ElasticityResult<ScenarioResult> {
        let (product, estimate, history) = self.pricing_inputs(product_id)?;
        let ctx = self.context(&product, &estimate, &history);
        self.simulator.simulate(&ctx, candidate_price, horizon_days)
    }

    /// Simulate a price change followed by a competitor reaction.
    #[instrument(skip(self))]
    pub fn simulate_competitive_response(
        &self,
        product_id: ProductId,
        our_price_change_percent: f64,
        response: Option<CompetitorResponse>,
    ) -> ElasticityResult<CompetitiveScenario> {
        let (product, estimate, history) = self.pricing_inputs(product_id)?;
        let ctx = self.context(&product, &estimate, &history);
        self.simulator
            .simulate_competitive_response(&ctx, our_price_change_percent, response)
    }

    /// Simulate one product at a candidate price during a season.
    #[instrument(skip(self))]
    pub fn simulate_seasonal(
        &self,
        product_id: ProductId,
        candidate_price: f64,
        season: Season,
    ) -> ElasticityResult<ScenarioResult> {
        let (product, estimate, history) = self.pricing_inputs(product_id)?;
        let ctx = self.context(&product, &estimate, &history);
        self.simulator.simulate_seasonal(&ctx, candidate_price, season)
    }

    /// Simulate every product at every percentage change.
    ///
    /// Unknown products and products without an estimate each contribute one
    /// error entry.
    #[instrument(skip(self))]
    pub fn simulate_bulk(
        &self,
        product_ids: &[ProductId],
        price_change_percentages: &[f64],
    ) -> BulkSimulation {
        let mut missing = Vec::new();
        let mut loaded = Vec::new();
        for &product_id in product_ids {
            match self.product(product_id) {
                Ok(product) => {
                    let estimate = self.provider.latest(product_id);
                    loaded.push((product, estimate, self.history(product_id)));
                }
                Err(error) => missing.push(BulkItemError::new(product_id, None, &error)),
            }
        }

        let inputs: Vec<BulkInput<'_>> = loaded
            .iter()
            .map(|(product, estimate, history)| BulkInput {
                product,
                estimate: estimate.as_ref(),
                history,
            })
            .collect();

        let mut bulk = self
            .simulator
            .simulate_bulk(&inputs, price_change_percentages, self.as_of);
        missing.append(&mut bulk.errors);
        bulk.errors = missing;
        bulk
    }

    /// Best of several scenarios by revenue, profit and volume.
    #[instrument(skip_all, fields(scenarios = scenarios.len()))]
    pub fn compare_scenarios(&self, scenarios: &[ScenarioResult]) -> ElasticityResult<ScenarioComparison> {
        compare(scenarios)
    }

    /// Demand, revenue and profit curve of one product.
    ///
    /// # Errors
    ///
    /// `MissingElasticity` when the product has no estimate yet.
    #[instrument(skip(self))]
    pub fn price_curve(
        &self,
        product_id: ProductId,
        price_range: Option<(f64, f64)>,
    ) -> ElasticityResult<PriceCurve> {
        let (product, estimate, history) = self.pricing_inputs(product_id)?;
        self.curves.curve(&product, &estimate, &history, price_range)
    }

    /// Cross-price elasticity of `product_a`'s demand on `product_b`'s price.
    #[instrument(skip(self))]
    pub fn cross_elasticity(
        &self,
        product_a: ProductId,
        product_b: ProductId,
    ) -> ElasticityResult<CrossElasticity> {
        self.product(product_a)?;
        self.product(product_b)?;
        cross_elasticity(
            product_a,
            &self.history(product_a),
            product_b,
            &self.history(product_b),
        )
    }

    /// Recommendation overview for every product with an estimate.
    ///
    /// Filtered by category when one is given, sorted by expected revenue
    /// change, largest first.
    #[instrument(skip(self))]
    pub fn recommendations(&self, category: Option<&str>) -> Vec<ProductRecommendation> {
        let mut rows: Vec<ProductRecommendation> = self
            .provider
            .products()
            .into_iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .filter_map(|product| {
                let estimate = self.provider.latest(product.id)?;
                let recommendation = estimate.recommendation;
                Some(ProductRecommendation {
                    product_id: product.id,
                    name: product.name,
                    category: product.category,
                    current_price: product.current_price,
                    optimal_price: recommendation.optimal_price,
                    strategy: recommendation.strategy,
                    expected_revenue_change_percent: recommendation.predicted_revenue_change_percent,
                    classification: estimate.classification,
                    coefficient: estimate.coefficient,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.expected_revenue_change_percent
                .total_cmp(&a.expected_revenue_change_percent)
        });
        rows
    }

    fn product(&self, product_id: ProductId) -> ElasticityResult<Product> {
        self.provider
            .product(product_id)
            .ok_or(ElasticityError::ProductNotFound { product_id })
    }

    fn current_estimate(&self, product_id: ProductId) -> ElasticityResult<ElasticityEstimate> {
        self.provider
            .latest(product_id)
            .ok_or(ElasticityError::MissingElasticity { product_id })
    }

    fn history(&self, product_id: ProductId) -> SalesDataset {
        SalesDataset::new(self.provider.observations(product_id, None))
    }

    fn pricing_inputs(
        &self,
        product_id: ProductId,
    ) -> ElasticityResult<(Product, ElasticityEstimate, SalesDataset)> {
        let product = self.product(product_id)?;
        let estimate = self.current_estimate(product_id)?;
        Ok((product, estimate, self.history(product_id)))
    }

    fn context<'a>(
        &self,
        product: &'a Product,
        estimate: &'a ElasticityEstimate,
        history: &'a SalesDataset,
    ) -> PricingContext<'a> {
        PricingContext {
            product,
            estimate,
            history,
            as_of: self.as_of,
        }
    }
}
