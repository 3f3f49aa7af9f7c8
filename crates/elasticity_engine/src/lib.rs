//! # elasticity_engine (Layer 3: Application)
//!
//! ## Layer 3 Role
//!
//! elasticity_engine turns sales history into pricing decisions:
//! - Elasticity estimation with a log-log linear model or a gradient-boosted
//!   ensemble with bootstrap intervals (`estimator`)
//! - Classification into elasticity bands and a price recommendation (`classifier`)
//! - Closed-form revenue-optimal pricing under business bounds (`optimizer`)
//! - What-if scenarios: single price, competitive response, seasonal,
//!   sweep, bulk and comparison (`scenarios`)
//! - Demand, revenue and profit curves (`curve`)
//! - Pairwise cross-price elasticity (`cross`)
//! - Collaborator traits, an in-memory provider, and the product-id
//!   facade `ElasticityService` (`ports`, `provider`, `service`)
//!
//! ## Layer Integration
//!
//! - Layer 1 (elasticity_core): observations, products, estimates, `SalesDataset`
//! - Layer 2 (elasticity_models): OLS, boosted trees, K-fold and bootstrap
//!
//! Every computation takes the estimate it projects with as an argument;
//! only `ElasticityService` looks up the latest estimate through its provider.
//!
//! ## Feature Flags
//!
//! - `parallel` (default): bootstrap refits run on the rayon pool
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use elasticity_core::dataset::SalesDataset;
//! use elasticity_core::types::{DateWindow, ModelKind, Product, SaleObservation};
//! use elasticity_engine::scenarios::{PricingContext, ScenarioSimulator};
//! use elasticity_engine::ElasticityEstimator;
//!
//! let as_of = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
//! let history = SalesDataset::new(
//!     (0..60)
//!         .map(|i| {
//!             let price = 18.0 + (i % 5) as f64;
//!             SaleObservation::new(as_of - Duration::days(i), price, 4.0e3 * price.powf(-0.7), 9.0)
//!         })
//!         .collect(),
//! );
//! let product = Product::new(11, "Tea Tin", 20.0, 9.0);
//!
//! let estimate = ElasticityEstimator::default()
//!     .estimate(&product, &history, ModelKind::Linear, &DateWindow::unbounded())
//!     .unwrap();
//!
//! let ctx = PricingContext { product: &product, estimate: &estimate, history: &history, as_of };
//! let scenario = ScenarioSimulator::default().simulate(&ctx, 22.0, 30).unwrap();
//! assert!(scenario.revenue_change_percent > 0.0);
//! ```

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod cross;
pub mod curve;
pub mod estimator;
pub mod optimizer;
pub mod ports;
pub mod provider;
pub mod scenarios;
pub mod service;

mod error;

pub use classifier::{classify, recommend};
pub use error::{ElasticityError, ElasticityResult, ErrorKind};
pub use estimator::ElasticityEstimator;
pub use optimizer::{OptimizationResult, RevenueOptimizer};
pub use service::ElasticityService;
