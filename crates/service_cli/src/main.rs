//! Elasticity CLI - Command Line Operations for Price Elasticity Analysis
//!
//! This is the operational entry point for the elasticity engine.
//!
//! # Commands
//!
//! - `elasticity estimate --product <id>` - Estimate price elasticity
//! - `elasticity optimize --product <id>` - Revenue-optimal price
//! - `elasticity simulate --product <id> --price <p>` - What-if scenario
//! - `elasticity bulk --products <ids> --changes <pcts>` - Scenario sweep
//! - `elasticity curve --product <id>` - Demand, revenue and profit curve
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate loads products and sales
//! from CSV into an in-memory provider, drives `ElasticityService`, and
//! prints every result as JSON.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use elasticity_core::types::ProductId;
use elasticity_engine::ElasticityService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod loader;

pub use error::{CliError, Result};

use commands::simulate::Variant;

/// Price elasticity estimation and pricing scenario CLI
#[derive(Parser)]
#[command(name = "elasticity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "ELASTICITY_CONFIG")]
    config: Option<PathBuf>,

    /// Products CSV file
    #[arg(long, global = true, default_value = "products.csv", env = "ELASTICITY_PRODUCTS_FILE")]
    products_file: PathBuf,

    /// Sales CSV file
    #[arg(long, global = true, default_value = "sales.csv", env = "ELASTICITY_SALES_FILE")]
    sales_file: PathBuf,

    /// End of the trailing history window (YYYY-MM-DD), default today
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// Bootstrap seed for reproducible boosted intervals
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate price elasticity for a product
    Estimate {
        /// Product id
        #[arg(short, long)]
        product: ProductId,

        /// Model type (linear, gradient-boosted)
        #[arg(short, long, default_value = "linear")]
        model: String,

        /// First date of the analysed window
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date of the analysed window
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Find the revenue-optimal price
    Optimize {
        /// Product id
        #[arg(short, long)]
        product: ProductId,

        /// Minimum gross margin as a fraction, e.g. 0.3
        #[arg(long)]
        min_margin: Option<f64>,
    },

    /// Simulate a candidate price
    Simulate {
        /// Product id
        #[arg(short, long)]
        product: ProductId,

        /// Candidate price
        #[arg(long)]
        price: f64,

        /// Horizon in days
        #[arg(short, long, default_value = "30")]
        days: u32,

        /// Days before a competitor reacts (enables the competitive variant)
        #[arg(long)]
        competitor_delay: Option<u32>,

        /// Share of the move the competitor matches, in percent
        #[arg(long, default_value = "100")]
        match_percent: f64,

        /// Season to simulate (enables the seasonal variant)
        #[arg(long, conflicts_with = "competitor_delay")]
        season: Option<String>,
    },

    /// Simulate products across percentage price changes
    Bulk {
        /// Comma-separated product ids
        #[arg(long, value_delimiter = ',', required = true)]
        products: Vec<ProductId>,

        /// Comma-separated percentage changes, e.g. -10,-5,5
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        changes: Vec<f64>,
    },

    /// Sample the demand, revenue and profit curve
    Curve {
        /// Product id
        #[arg(short, long)]
        product: ProductId,

        /// Lowest sampled price
        #[arg(long)]
        min: Option<f64>,

        /// Highest sampled price
        #[arg(long)]
        max: Option<f64>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let engine_config =
        config::load(cli.config.as_deref(), cli.seed).context("failed to load configuration")?;
    let provider = loader::load_provider(&cli.products_file, &cli.sales_file)
        .context("failed to load input data")?;
    let as_of = cli.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let service = ElasticityService::new(provider, engine_config).with_as_of(as_of);

    match cli.command {
        Commands::Estimate {
            product,
            model,
            start,
            end,
        } => commands::estimate::run(&service, product, &model, start, end)?,
        Commands::Optimize {
            product,
            min_margin,
        } => commands::optimize::run(&service, product, min_margin)?,
        Commands::Simulate {
            product,
            price,
            days,
            competitor_delay,
            match_percent,
            season,
        } => {
            let variant = match (competitor_delay, season) {
                (Some(delay_days), _) => Variant::Competitive {
                    delay_days,
                    match_percent,
                },
                (None, Some(season)) => Variant::Seasonal { season },
                (None, None) => Variant::Single { days },
            };
            commands::simulate::run(&service, product, price, variant)?
        }
        Commands::Bulk { products, changes } => commands::bulk::run(&service, &products, &changes)?,
        Commands::Curve { product, min, max } => commands::curve::run(&service, product, min, max)?,
    }

    Ok(())
}
