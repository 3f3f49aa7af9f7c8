//! Linear regression.
//!
//! - [`SimpleOls`]: single-regressor ordinary least squares with slope inference

mod ols;

pub use ols::{OlsFit, SimpleOls};
