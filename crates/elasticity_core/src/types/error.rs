//! Validation errors for core value objects.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating core value objects.
///
/// # Variants
/// - `InvalidProduct`: Product reference data cannot support pricing maths
/// - `InvalidWindow`: Date window whose start lies after its end
/// - `UnknownVariant`: Text that does not name a known enum variant
///
/// # Examples
/// ```
/// use elasticity_core::types::DataError;
///
/// let err = DataError::InvalidProduct("current price must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid product: current price must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// Product reference data is unusable.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Window start lies after window end.
    #[error("Invalid date window: {start} is after {end}")]
    InvalidWindow {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },

    /// Unrecognised textual enum value.
    #[error("Unknown {kind}: {value}")]
    UnknownVariant {
        /// Name of the enum being parsed
        kind: &'static str,
        /// The rejected text
        value: String,
    },
}

impl DataError {
    /// Create an invalid product error.
    pub fn invalid_product(message: impl Into<String>) -> Self {
        Self::InvalidProduct(message.into())
    }

    /// Create an unknown variant error.
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
