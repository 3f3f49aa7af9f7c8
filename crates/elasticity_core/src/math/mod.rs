//! Numerical helpers shared by the model and engine layers.
//!
//! - `stats`: Mean, variance, percentile and grid construction

pub mod stats;
