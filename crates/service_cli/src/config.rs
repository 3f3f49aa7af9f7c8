//! Layered engine configuration.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config`)
//! 3. Environment variables `ELASTICITY_<SECTION>__<KEY>`, e.g.
//!    `ELASTICITY_SIMULATION__HISTORY_WINDOW_DAYS=60`
//! 4. Command-line flags such as `--seed`

use std::path::Path;

use elasticity_engine::config::EngineConfig;

use crate::{CliError, Result};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ELASTICITY";

/// Build the engine configuration from defaults, file and environment.
pub fn load(path: Option<&Path>, seed: Option<u64>) -> Result<EngineConfig> {
    let mut builder = config::Config::builder().add_source(config::Config::try_from(&EngineConfig::default())?);

    if let Some(path) = path {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(config::File::from(path));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let mut engine: EngineConfig = builder.build()?.try_deserialize()?;
    if let Some(seed) = seed {
        engine.estimator.seed = Some(seed);
    }
    engine.validate()?;
    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = load(None, None).unwrap();
        assert_eq!(config.simulation.min_history, 10);
        assert_eq!(config.estimator.seed, None);
    }

    #[test]
    fn test_seed_flag_overrides() {
        let config = load(None, Some(99)).unwrap();
        assert_eq!(config.estimator.seed, Some(99));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = load(Some(Path::new("/definitely/not/here.toml")), None).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
