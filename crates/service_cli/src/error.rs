//! CLI error types.

use elasticity_engine::ElasticityError;
use thiserror::Error;

/// Errors raised while preparing or running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Rejected command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed CSV row or header
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being read
        path: String,
        /// Underlying parse error
        #[source]
        source: csv::Error,
    },

    /// Configuration could not be layered or deserialised
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Engine operation failed
    #[error(transparent)]
    Engine(#[from] ElasticityError),

    /// Result could not be rendered
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
