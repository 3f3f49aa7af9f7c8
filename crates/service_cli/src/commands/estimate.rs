//! Estimate command implementation
//!
//! Fits the requested model over an optional date window.

use chrono::NaiveDate;
use elasticity_core::types::{DateWindow, ModelKind, ProductId};
use tracing::info;

use super::{print_json, CliService};
use crate::{CliError, Result};

/// Run the estimate command
pub fn run(
    service: &CliService,
    product_id: ProductId,
    model: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    let model_kind: ModelKind = model
        .parse()
        .map_err(|e| CliError::InvalidArgument(format!("{}", e)))?;
    let window =
        DateWindow::new(start, end).map_err(|e| CliError::InvalidArgument(format!("{}", e)))?;

    info!(product_id, model = %model_kind, "Estimating elasticity");
    let estimate = service.estimate_elasticity(product_id, &window, model_kind)?;
    print_json(&estimate)
}
