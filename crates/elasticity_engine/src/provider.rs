//! In-memory provider backing the collaborator traits.
//!
//! `InMemoryProvider` holds products, sales history and estimates behind
//! `RwLock`ed maps so that one instance can be shared across threads. It is
//! used by the CLI after loading CSV files, and by tests.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use elasticity_core::types::{Product, SaleObservation};
//! use elasticity_engine::ports::{ProductCatalog, SalesHistory};
//! use elasticity_engine::provider::InMemoryProvider;
//!
//! let provider = InMemoryProvider::new();
//! provider.insert_product(Product::new(1, "Mug", 8.0, 3.0));
//!
//! let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! provider.record_sales(1, vec![SaleObservation::new(day, 8.0, 12.0, 3.0)]);
//!
//! assert_eq!(provider.product(1).map(|p| p.name), Some("Mug".to_string()));
//! assert_eq!(provider.observations(1, None).len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use elasticity_core::types::{DateWindow, ElasticityEstimate, Product, ProductId, SaleObservation};
use tracing::debug;

use crate::ports::{EstimateStore, ProductCatalog, SalesHistory};

/// Thread-safe in-memory store of products, sales and estimates.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    /// Products keyed by id.
    products: RwLock<HashMap<ProductId, Product>>,
    /// Sales history keyed by product id, in insertion order.
    sales: RwLock<HashMap<ProductId, Vec<SaleObservation>>>,
    /// Every saved estimate keyed by product id, in insertion order.
    estimates: RwLock<HashMap<ProductId, Vec<ElasticityEstimate>>>,
}

impl InMemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product.
    pub fn insert_product(&self, product: Product) {
        write(&self.products).insert(product.id, product);
    }

    /// Append observations to a product's history.
    pub fn record_sales(&self, id: ProductId, observations: impl IntoIterator<Item = SaleObservation>) {
        write(&self.sales).entry(id).or_default().extend(observations);
    }

    /// Every estimate stored for a product, oldest insertion first.
    pub fn estimates(&self, id: ProductId) -> Vec<ElasticityEstimate> {
        read(&self.estimates).get(&id).cloned().unwrap_or_default()
    }
}

impl ProductCatalog for InMemoryProvider {
    fn product(&self, id: ProductId) -> Option<Product> {
        read(&self.products).get(&id).cloned()
    }

    fn products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = read(&self.products).values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

impl SalesHistory for InMemoryProvider {
    fn observations(&self, id: ProductId, window: Option<&DateWindow>) -> Vec<SaleObservation> {
        let sales = read(&self.sales);
        let Some(history) = sales.get(&id) else {
            return Vec::new();
        };
        history
            .iter()
            .filter(|o| window.map_or(true, |w| w.contains(o.date)))
            .cloned()
            .collect()
    }
}

impl EstimateStore for InMemoryProvider {
    fn latest(&self, id: ProductId) -> Option<ElasticityEstimate> {
        read(&self.estimates)
            .get(&id)?
            .iter()
            .reduce(|best, e| if e.created_at >= best.created_at { e } else { best })
            .cloned()
    }

    fn save(&self, estimate: ElasticityEstimate) {
        debug!(product_id = estimate.product_id, coefficient = estimate.coefficient, "Saved estimate");
        write(&self.estimates)
            .entry(estimate.product_id)
            .or_default()
            .push(estimate);
    }
}

// A panic while holding a lock leaves the maps themselves intact.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use elasticity_core::types::{ElasticityClass, ModelKind, PriceRecommendation, PriceStrategy};

    fn day(i: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i)
    }

    fn estimate(coefficient: f64, created_second: u32) -> ElasticityEstimate {
        ElasticityEstimate {
            product_id: 1,
            coefficient,
            r_squared: 0.5,
            p_value: None,
            standard_error: None,
            sample_size: 30,
            model_kind: ModelKind::Linear,
            confidence_interval: None,
            classification: ElasticityClass::Inelastic,
            period: DateWindow::unbounded(),
            feature_importances: None,
            recommendation: PriceRecommendation {
                current_price: 10.0,
                current_margin_percent: 50.0,
                suggested_price: 10.5,
                strategy: PriceStrategy::Increase,
                predicted_quantity: 9.0,
                optimal_price: 12.0,
                predicted_revenue_change_percent: 2.0,
                rationale: String::new(),
            },
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, created_second).unwrap(),
        }
    }

    // ========================================
    // Catalogue and History Tests
    // ========================================

    #[test]
    fn test_empty_provider() {
        let provider = InMemoryProvider::new();
        assert!(provider.product(1).is_none());
        assert!(provider.products().is_empty());
        assert!(provider.observations(1, None).is_empty());
        assert!(provider.latest(1).is_none());
    }

    #[test]
    fn test_products_sorted_by_id() {
        let provider = InMemoryProvider::new();
        provider.insert_product(Product::new(9, "B", 2.0, 1.0));
        provider.insert_product(Product::new(3, "A", 2.0, 1.0));
        let ids: Vec<ProductId> = provider.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn test_observations_filtered_by_window() {
        let provider = InMemoryProvider::new();
        provider.record_sales(1, (0..10).map(|i| SaleObservation::new(day(i), 5.0, 2.0, 1.0)));
        let window = DateWindow::between(day(2), day(4)).unwrap();
        assert_eq!(provider.observations(1, Some(&window)).len(), 3);
        assert_eq!(provider.observations(1, None).len(), 10);
    }

    // ========================================
    // Estimate Store Tests
    // ========================================

    #[test]
    fn test_latest_by_creation_time() {
        let provider = InMemoryProvider::new();
        provider.save(estimate(-1.0, 30));
        provider.save(estimate(-2.0, 10));
        assert_eq!(provider.latest(1).map(|e| e.coefficient), Some(-1.0));
        assert_eq!(provider.estimates(1).len(), 2);
    }

    #[test]
    fn test_latest_tie_prefers_last_saved() {
        let provider = InMemoryProvider::new();
        provider.save(estimate(-1.0, 0));
        provider.save(estimate(-3.0, 0));
        assert_eq!(provider.latest(1).map(|e| e.coefficient), Some(-3.0));
    }
}
