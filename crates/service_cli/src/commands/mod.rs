//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands that need an
//! estimate fit one first, since the provider starts empty.

pub mod bulk;
pub mod curve;
pub mod estimate;
pub mod optimize;
pub mod simulate;

use elasticity_core::types::{DateWindow, ModelKind, ProductId};
use elasticity_engine::ports::EstimateStore;
use elasticity_engine::provider::InMemoryProvider;
use elasticity_engine::ElasticityService;
use serde::Serialize;
use tracing::info;

use crate::Result;

/// Service every command runs against.
pub type CliService = ElasticityService<InMemoryProvider>;

/// Fit a linear estimate over the full history unless one is stored.
pub(crate) fn ensure_estimate(service: &CliService, product_id: ProductId) -> Result<()> {
    if service.provider().latest(product_id).is_none() {
        info!(product_id, "No stored estimate, fitting linear model");
        service.estimate_elasticity(product_id, &DateWindow::unbounded(), ModelKind::Linear)?;
    }
    Ok(())
}

/// Print a result as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
