//! CSV loading into an in-memory provider.
//!
//! Products file columns: `id,sku,name,category,unit_cost,current_price`
//! (`sku` and `category` may be empty).
//!
//! Sales file columns: `product_id,date,price,quantity` plus optional
//! `unit_cost,discount_percent,competitor_price,season,is_holiday,promotion_active`.
//! A missing unit cost falls back to the product's.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use elasticity_core::types::{Product, ProductId, SaleObservation, Season};
use elasticity_engine::ports::ProductCatalog;
use elasticity_engine::provider::InMemoryProvider;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct SaleRecord {
    product_id: ProductId,
    date: NaiveDate,
    price: f64,
    quantity: f64,
    #[serde(default)]
    unit_cost: Option<f64>,
    #[serde(default)]
    discount_percent: Option<f64>,
    #[serde(default)]
    competitor_price: Option<f64>,
    #[serde(default)]
    season: Option<String>,
    #[serde(default)]
    is_holiday: Option<bool>,
    #[serde(default)]
    promotion_active: Option<bool>,
}

/// Load both files into a fresh provider.
pub fn load_provider(products_path: &Path, sales_path: &Path) -> Result<InMemoryProvider> {
    let provider = InMemoryProvider::new();
    let products = read_products(open(products_path)?, &products_path.display().to_string())?;
    for product in products {
        provider.insert_product(product);
    }
    let sales = read_sales(open(sales_path)?, &sales_path.display().to_string(), &provider)?;
    info!(
        products = provider.products().len(),
        sales, "Loaded products and sales"
    );
    Ok(provider)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|_| CliError::FileNotFound(path.display().to_string()))
}

/// Parse products CSV.
pub fn read_products<R: Read>(reader: R, source: &str) -> Result<Vec<Product>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut products = Vec::new();
    for record in csv_reader.deserialize::<Product>() {
        let product = record.map_err(|source_err| CliError::Csv {
            path: source.to_string(),
            source: source_err,
        })?;
        product.validate().map_err(|e| {
            CliError::InvalidArgument(format!("product {} in {}: {}", product.id, source, e))
        })?;
        products.push(product);
    }
    Ok(products)
}

/// Parse sales CSV into `provider`, returning the number of rows recorded.
///
/// Rows for unknown products are skipped with a warning.
pub fn read_sales<R: Read>(reader: R, source: &str, provider: &InMemoryProvider) -> Result<usize> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut recorded = 0;
    for record in csv_reader.deserialize::<SaleRecord>() {
        let record = record.map_err(|source_err| CliError::Csv {
            path: source.to_string(),
            source: source_err,
        })?;
        let Some(product) = provider.product(record.product_id) else {
            warn!(product_id = record.product_id, "Skipped sale for unknown product");
            continue;
        };
        let observation = to_observation(record, product.unit_cost)?;
        provider.record_sales(product.id, [observation]);
        recorded += 1;
    }
    Ok(recorded)
}

fn to_observation(record: SaleRecord, default_unit_cost: f64) -> Result<SaleObservation> {
    let unit_cost = record.unit_cost.unwrap_or(default_unit_cost);
    let mut observation = SaleObservation::new(record.date, record.price, record.quantity, unit_cost)
        .with_discount(record.discount_percent.unwrap_or(0.0))
        .with_holiday(record.is_holiday.unwrap_or(false))
        .with_promotion(record.promotion_active.unwrap_or(false));
    if let Some(competitor) = record.competitor_price {
        observation = observation.with_competitor_price(competitor);
    }
    if let Some(season) = record.season.as_deref().filter(|s| !s.is_empty()) {
        let season: Season = season
            .parse()
            .map_err(|e| CliError::InvalidArgument(format!("{}", e)))?;
        observation = observation.with_season(season);
    }
    Ok(observation)
}
