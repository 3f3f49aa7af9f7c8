//! Simulate command implementation
//!
//! Projects one candidate price, optionally with a competitor reaction or
//! for a given season.

use elasticity_core::types::{ProductId, Season};
use elasticity_engine::ports::ProductCatalog;
use elasticity_engine::scenarios::CompetitorResponse;
use elasticity_engine::ElasticityError;

use super::{ensure_estimate, print_json, CliService};
use crate::{CliError, Result};

/// Scenario variant selected on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// Plain projection over `days`
    Single {
        /// Horizon in days
        days: u32,
    },
    /// Competitor matches part of the move after a delay
    Competitive {
        /// Delay before the competitor reacts
        delay_days: u32,
        /// Share of the move matched, in percent
        match_percent: f64,
    },
    /// Projection scaled by a season's demand factor
    Seasonal {
        /// Season name
        season: String,
    },
}

/// Run the simulate command
pub fn run(service: &CliService, product_id: ProductId, price: f64, variant: Variant) -> Result<()> {
    ensure_estimate(service, product_id)?;

    match variant {
        Variant::Single { days } => print_json(&service.simulate_scenario(product_id, price, days)?),
        Variant::Competitive {
            delay_days,
            match_percent,
        } => {
            let product = service
                .provider()
                .product(product_id)
                .ok_or(ElasticityError::ProductNotFound { product_id })?;
            let change_percent = (price - product.current_price) / product.current_price * 100.0;
            let response = CompetitorResponse {
                delay_days,
                match_percent,
            };
            print_json(&service.simulate_competitive_response(product_id, change_percent, Some(response))?)
        }
        Variant::Seasonal { season } => {
            let season: Season = season
                .parse()
                .map_err(|e| CliError::InvalidArgument(format!("{}", e)))?;
            print_json(&service.simulate_seasonal(product_id, price, season)?)
        }
    }
}
