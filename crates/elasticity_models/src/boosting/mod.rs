//! Tree ensembles.
//!
//! - [`RegressionTree`]: depth-limited variance-reduction tree
//! - [`GradientBoostedRegressor`]: squared-error boosting over such trees
//! - [`BoostingConfig`]: hyper-parameters with builder

mod config;
mod ensemble;
mod tree;

pub use config::{BoostingConfig, BoostingConfigBuilder};
pub use ensemble::GradientBoostedRegressor;
pub use tree::{RegressionTree, TreeParams};
