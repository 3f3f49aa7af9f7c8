//! Engine error types.
//!
//! Every failure of an estimation, optimisation or simulation is returned as
//! a typed variant; nothing in the engine panics on bad input.

use elasticity_core::types::{DataError, ProductId};
use elasticity_models::ModelError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the elasticity engine.
///
/// # Variants
///
/// - `InsufficientData`: Too few usable rows to fit
/// - `NoViableFeatures`: Boosted path has no feature columns
/// - `PriceChangeOutOfBounds`: Candidate price outside the allowed change band
/// - `InsufficientHistory`: Too few rows in the trailing window
/// - `MissingElasticity`: No estimate exists for a product that needs one
/// - `ProductNotFound`: Unknown product id
/// - `ZeroBaseline`: Percent change against a zero historical baseline
/// - `InvalidInput`: Rejected argument
/// - `Model`: Wrapped model fitting error
///
/// # Examples
///
/// ```
/// use elasticity_engine::ElasticityError;
///
/// let err = ElasticityError::price_change_out_of_bounds(-35.0, -30.0, 20.0);
/// assert!(err.is_out_of_bounds());
/// assert!(format!("{}", err).contains("-35"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElasticityError {
    /// Too few usable observations.
    #[error("Insufficient data: need at least {required} usable observations, got {provided}")]
    InsufficientData {
        /// Minimum number of observations required
        required: usize,
        /// Number of usable observations
        provided: usize,
    },

    /// No feature columns could be built.
    #[error("No viable features for the boosted model")]
    NoViableFeatures,

    /// Requested price change is outside the permitted band.
    #[error(
        "Price change of {change_percent:.2}% is outside the permitted range [{min_percent}%, {max_percent}%]"
    )]
    PriceChangeOutOfBounds {
        /// Requested change in percent
        change_percent: f64,
        /// Largest permitted decrease in percent (negative)
        min_percent: f64,
        /// Largest permitted increase in percent
        max_percent: f64,
    },

    /// Too little recent history.
    #[error(
        "Insufficient history: need at least {required} observations in the last {window_days} days, got {provided}"
    )]
    InsufficientHistory {
        /// Minimum number of observations required
        required: usize,
        /// Number of observations found
        provided: usize,
        /// Trailing window length in days
        window_days: i64,
    },

    /// No elasticity estimate exists for the product.
    #[error("No elasticity estimate for product {product_id}; estimate elasticity first")]
    MissingElasticity {
        /// Product without an estimate
        product_id: ProductId,
    },

    /// Unknown product.
    #[error("Product not found: {product_id}")]
    ProductNotFound {
        /// Requested product id
        product_id: ProductId,
    },

    /// Historical baseline is zero, percent change undefined.
    #[error("Historical baseline {metric} is zero; percent change is undefined")]
    ZeroBaseline {
        /// Name of the baseline metric
        metric: &'static str,
    },

    /// Rejected argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model fitting failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

impl ElasticityError {
    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, provided: usize) -> Self {
        Self::InsufficientData { required, provided }
    }

    /// Create a price change out of bounds error.
    pub fn price_change_out_of_bounds(change_percent: f64, min_percent: f64, max_percent: f64) -> Self {
        Self::PriceChangeOutOfBounds {
            change_percent,
            min_percent,
            max_percent,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this is an insufficient data error.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Check if this is a price change out of bounds error.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::PriceChangeOutOfBounds { .. })
    }

    /// Check if this is a missing elasticity error.
    pub fn is_missing_elasticity(&self) -> bool {
        matches!(self, Self::MissingElasticity { .. })
    }

    /// Variant tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::NoViableFeatures => ErrorKind::NoViableFeatures,
            Self::PriceChangeOutOfBounds { .. } => ErrorKind::PriceChangeOutOfBounds,
            Self::InsufficientHistory { .. } => ErrorKind::InsufficientHistory,
            Self::MissingElasticity { .. } => ErrorKind::MissingElasticity,
            Self::ProductNotFound { .. } => ErrorKind::ProductNotFound,
            Self::ZeroBaseline { .. } => ErrorKind::ZeroBaseline,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Model(_) => ErrorKind::Model,
        }
    }
}

/// Serialisable tag of an [`ElasticityError`] variant.
///
/// Carried next to the message wherever errors are collected into results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`ElasticityError::InsufficientData`]
    InsufficientData,
    /// See [`ElasticityError::NoViableFeatures`]
    NoViableFeatures,
    /// See [`ElasticityError::PriceChangeOutOfBounds`]
    PriceChangeOutOfBounds,
    /// See [`ElasticityError::InsufficientHistory`]
    InsufficientHistory,
    /// See [`ElasticityError::MissingElasticity`]
    MissingElasticity,
    /// See [`ElasticityError::ProductNotFound`]
    ProductNotFound,
    /// See [`ElasticityError::ZeroBaseline`]
    ZeroBaseline,
    /// See [`ElasticityError::InvalidInput`]
    InvalidInput,
    /// See [`ElasticityError::Model`]
    Model,
}

impl From<DataError> for ElasticityError {
    fn from(err: DataError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Result alias for engine operations.
pub type ElasticityResult<T> = Result<T, ElasticityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_history_display() {
        let err = ElasticityError::InsufficientHistory {
            required: 10,
            provided: 4,
            window_days: 90,
        };
        let display = format!("{}", err);
        assert!(display.contains("10"));
        assert!(display.contains("90 days"));
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = ElasticityError::price_change_out_of_bounds(25.0, -30.0, 20.0);
        assert_eq!(
            format!("{}", err),
            "Price change of 25.00% is outside the permitted range [-30%, 20%]"
        );
    }

    #[test]
    fn test_model_error_conversion() {
        let err: ElasticityError = ModelError::ConstantRegressor.into();
        assert!(matches!(err, ElasticityError::Model(ModelError::ConstantRegressor)));
    }

    #[test]
    fn test_data_error_conversion() {
        let err: ElasticityError = DataError::invalid_product("price must be positive").into();
        assert!(matches!(err, ElasticityError::InvalidInput(_)));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(
            ElasticityError::ProductNotFound { product_id: 1 }.kind(),
            ErrorKind::ProductNotFound
        );
        assert_eq!(
            ElasticityError::ZeroBaseline { metric: "profit" }.kind(),
            ErrorKind::ZeroBaseline
        );
        assert_eq!(
            ElasticityError::from(ModelError::ConstantRegressor).kind(),
            ErrorKind::Model
        );
    }

    #[test]
    fn test_is_checks() {
        assert!(ElasticityError::MissingElasticity { product_id: 3 }.is_missing_elasticity());
        assert!(ElasticityError::insufficient_data(10, 2).is_insufficient_data());
        assert!(!ElasticityError::NoViableFeatures.is_out_of_bounds());
    }
}
