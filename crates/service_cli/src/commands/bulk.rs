//! Bulk command implementation
//!
//! Simulates several products across several percentage price changes.

use elasticity_core::types::{ModelKind, ProductId};
use elasticity_engine::ports::EstimateStore;
use tracing::warn;

use super::{print_json, CliService};
use crate::{CliError, Result};

/// Run the bulk command
pub fn run(service: &CliService, product_ids: &[ProductId], changes: &[f64]) -> Result<()> {
    if product_ids.is_empty() || changes.is_empty() {
        return Err(CliError::InvalidArgument(
            "bulk needs at least one product and one price change".to_string(),
        ));
    }

    let missing: Vec<ProductId> = product_ids
        .iter()
        .copied()
        .filter(|&id| service.provider().latest(id).is_none())
        .collect();
    let estimation = service.estimate_bulk(&missing, ModelKind::Linear);
    for failure in &estimation.errors {
        warn!(product_id = failure.product_id, error = %failure.error, "Could not estimate");
    }

    print_json(&service.simulate_bulk(product_ids, changes))
}
