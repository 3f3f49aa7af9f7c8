//! Collaborator traits the service reads from and writes to.
//!
//! The analytical core never reaches into storage itself; the service pulls
//! what an operation needs through these traits and pushes plain values
//! into the estimator, optimiser and simulator.

use elasticity_core::types::{DateWindow, ElasticityEstimate, Product, ProductId, SaleObservation};

/// Product reference data.
pub trait ProductCatalog {
    /// Product by id.
    fn product(&self, id: ProductId) -> Option<Product>;

    /// Every product in the catalogue.
    fn products(&self) -> Vec<Product>;
}

/// Read-only sales history.
pub trait SalesHistory {
    /// Observations of one product, optionally restricted to a window.
    fn observations(&self, id: ProductId, window: Option<&DateWindow>) -> Vec<SaleObservation>;
}

/// Storage of elasticity estimates.
pub trait EstimateStore {
    /// Most recently created estimate of a product.
    fn latest(&self, id: ProductId) -> Option<ElasticityEstimate>;

    /// Store an estimate.
    fn save(&self, estimate: ElasticityEstimate);
}

/// Everything [`ElasticityService`](crate::service::ElasticityService) needs.
pub trait ElasticityProvider: ProductCatalog + SalesHistory + EstimateStore {}

impl<T> ElasticityProvider for T where T: ProductCatalog + SalesHistory + EstimateStore {}
