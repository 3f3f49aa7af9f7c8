//! Optimize command implementation

use elasticity_core::types::ProductId;

use super::{ensure_estimate, print_json, CliService};
use crate::Result;

/// Run the optimize command
pub fn run(service: &CliService, product_id: ProductId, min_margin: Option<f64>) -> Result<()> {
    ensure_estimate(service, product_id)?;
    let result = service.optimize_revenue(product_id, min_margin)?;
    print_json(&result)
}
