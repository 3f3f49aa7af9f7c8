//! Product reference data.

use serde::{Deserialize, Serialize};

use super::DataError;

/// Product identifier.
pub type ProductId = u64;

/// Catalogue entry supplying the prices every pricing calculation is anchored on.
///
/// # Examples
/// ```
/// use elasticity_core::types::Product;
///
/// let product = Product::new(7, "Espresso Beans", 24.0, 14.0);
/// assert!(product.validate().is_ok());
/// assert!((product.margin_percent() - 41.666).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,
    /// Stock keeping unit
    #[serde(default)]
    pub sku: String,
    /// Human readable name
    pub name: String,
    /// Catalogue category
    #[serde(default)]
    pub category: String,
    /// Cost of one unit
    pub unit_cost: f64,
    /// Current list price
    pub current_price: f64,
}

impl Product {
    /// Create a product without SKU or category.
    pub fn new(id: ProductId, name: impl Into<String>, current_price: f64, unit_cost: f64) -> Self {
        Self {
            id,
            sku: String::new(),
            name: name.into(),
            category: String::new(),
            unit_cost,
            current_price,
        }
    }

    /// Set the SKU.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Gross margin at the current price, in percent.
    pub fn margin_percent(&self) -> f64 {
        if self.current_price == 0.0 {
            return 0.0;
        }
        (self.current_price - self.unit_cost) / self.current_price * 100.0
    }

    /// Check that prices are finite, the current price is positive and the unit cost non-negative.
    pub fn validate(&self) -> Result<(), DataError> {
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(DataError::invalid_product(format!(
                "product {} has non-positive current price {}",
                self.id, self.current_price
            )));
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(DataError::invalid_product(format!(
                "product {} has negative unit cost {}",
                self.id, self.unit_cost
            )));
        }
        Ok(())
    }
}
