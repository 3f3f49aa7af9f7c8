//! Resampling for model validation and uncertainty.
//!
//! - [`ResampleRng`]: seeded generator for reproducible resamples
//! - [`KFold`] and [`cross_val_r2`]: contiguous K-fold cross-validation
//! - [`bootstrap_statistic`] and [`percentile_interval`]: bootstrap intervals

mod bootstrap;
mod kfold;
mod rng;

pub use bootstrap::{bootstrap_statistic, percentile_interval};
pub use kfold::{cross_val_r2, r2_score, KFold};
pub use rng::ResampleRng;
