//! Core value objects for elasticity analysis.
//!
//! This module provides:
//! - [`SaleObservation`]: One historical transaction record
//! - [`Season`]: Calendar season used for seasonal demand factors
//! - [`Product`]: Reference data supplying unit cost and current price
//! - [`ElasticityEstimate`]: Fitted elasticity with fit quality and uncertainty
//! - [`PriceRecommendation`]: Price direction derived from an estimate
//! - [`DataError`]: Validation errors for the types above

mod error;
mod estimate;
mod observation;
mod product;
mod season;

pub use error::DataError;
pub use estimate::{
    ConfidenceInterval, ElasticityClass, ElasticityEstimate, FeatureImportance, ModelKind,
    PriceRecommendation, PriceStrategy,
};
pub use observation::{DateWindow, SaleObservation};
pub use product::{Product, ProductId};
pub use season::Season;
