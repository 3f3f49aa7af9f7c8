//! # elasticity_models
//!
//! Numerical model fitting for price elasticity estimation.
//!
//! This crate sits between the foundation types (L1) and the application
//! engine (L3), turning prepared feature matrices into fitted models and
//! uncertainty estimates.
//!
//! ## Modules
//!
//! - `regression`: Simple OLS with slope inference (standard error, p-value, t interval)
//! - `boosting`: Regression trees and gradient-boosted ensembles (squared error loss)
//! - `resampling`: Seeded resampling RNG, K-fold cross-validation, bootstrap replicates
//!
//! ## Example
//!
//! ```rust
//! use elasticity_models::regression::SimpleOls;
//!
//! let x = [0.0, 1.0, 2.0, 3.0, 4.0];
//! let y = [1.0, 2.9, 5.1, 7.0, 9.0];
//! let fit = SimpleOls::fit(&x, &y).unwrap();
//! assert!((fit.slope - 2.0).abs() < 0.1);
//! ```

pub mod boosting;
pub mod features;
pub mod regression;
pub mod resampling;

mod error;

pub use error::ModelError;
pub use features::FeatureMatrix;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::boosting::*;
    pub use crate::features::FeatureMatrix;
    pub use crate::regression::*;
    pub use crate::resampling::*;
    pub use crate::ModelError;
}
