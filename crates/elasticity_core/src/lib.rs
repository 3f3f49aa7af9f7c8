//! # elasticity_core: Foundation Types for Price Elasticity Analysis
//!
//! ## Layer 1 (Foundation) Role
//!
//! elasticity_core is the bottom layer of the workspace, providing:
//! - Transaction records: `SaleObservation`, `Season` (`types::observation`, `types::season`)
//! - Product reference data: `Product` (`types::product`)
//! - Estimation results: `ElasticityEstimate`, `PriceRecommendation` (`types::estimate`)
//! - The `SalesDataset` shim used to filter and summarise history (`dataset`)
//! - Statistics helpers: mean, percentile, linspace (`math::stats`)
//! - Error types: `DataError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other elasticity_* crates, with minimal external dependencies:
//! - chrono: Calendar dates and timestamps
//! - serde: Serialisation of value objects for external collaborators
//! - statrs: Descriptive statistics
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use elasticity_core::dataset::SalesDataset;
//! use elasticity_core::types::SaleObservation;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let observations = vec![
//!     SaleObservation::new(day, 10.0, 40.0, 6.0),
//!     SaleObservation::new(day.succ_opt().unwrap(), 11.0, 35.0, 6.0),
//! ];
//!
//! let dataset = SalesDataset::new(observations);
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.mean_quantity(), Some(37.5));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dataset;
pub mod math;
pub mod types;
