//! Model fitting error types.

use thiserror::Error;

/// Errors that can occur while fitting or evaluating a model.
///
/// # Variants
///
/// - `InsufficientData`: Fewer rows than the procedure needs
/// - `DimensionMismatch`: Feature and target lengths disagree
/// - `ConstantRegressor`: Regressor has zero variance, slope undefined
/// - `NoViableFeatures`: Feature matrix has no columns
/// - `InvalidParameter`: Hyper-parameter outside its valid range
/// - `Distribution`: Reference distribution could not be constructed
///
/// # Examples
///
/// ```
/// use elasticity_models::ModelError;
///
/// let err = ModelError::insufficient_data(10, 4);
/// assert!(err.is_insufficient_data());
/// assert!(format!("{}", err).contains("10"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Not enough rows to fit.
    #[error("Insufficient data: need at least {required} rows, got {provided}")]
    InsufficientData {
        /// Minimum number of rows required
        required: usize,
        /// Number of rows provided
        provided: usize,
    },

    /// Lengths of inputs disagree.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// Regressor is constant.
    #[error("Regressor has zero variance; slope is not identified")]
    ConstantRegressor,

    /// No feature columns available.
    #[error("No viable features to fit on")]
    NoViableFeatures,

    /// Invalid hyper-parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reference distribution construction failed.
    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl ModelError {
    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, provided: usize) -> Self {
        Self::InsufficientData { required, provided }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, found: usize) -> Self {
        Self::DimensionMismatch { expected, found }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Check if this is an insufficient data error.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Check if this is a constant regressor error.
    pub fn is_constant_regressor(&self) -> bool {
        matches!(self, Self::ConstantRegressor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = ModelError::insufficient_data(5, 3);
        let display = format!("{}", err);
        assert!(display.contains("Insufficient"));
        assert!(display.contains("5"));
        assert!(display.contains("3"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ModelError::dimension_mismatch(4, 2);
        assert_eq!(format!("{}", err), "Dimension mismatch: expected 4, found 2");
    }

    #[test]
    fn test_is_checks() {
        assert!(ModelError::ConstantRegressor.is_constant_regressor());
        assert!(!ModelError::NoViableFeatures.is_insufficient_data());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = ModelError::invalid_parameter("learning rate must be positive");
        let _: &dyn std::error::Error = &err;
    }
}
