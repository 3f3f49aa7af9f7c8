//! Curve command implementation

use elasticity_core::types::ProductId;

use super::{ensure_estimate, print_json, CliService};
use crate::{CliError, Result};

/// Run the curve command
pub fn run(service: &CliService, product_id: ProductId, min: Option<f64>, max: Option<f64>) -> Result<()> {
    let range = match (min, max) {
        (Some(low), Some(high)) => Some((low, high)),
        (None, None) => None,
        _ => {
            return Err(CliError::InvalidArgument(
                "--min and --max must be given together".to_string(),
            ))
        }
    };

    ensure_estimate(service, product_id)?;
    print_json(&service.price_curve(product_id, range)?)
}
