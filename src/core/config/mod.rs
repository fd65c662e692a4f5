//! Configuration for the ticket router
//!
//! - [`RouterConfig`] with one section per concern, loaded from TOML
//! - [`EnvLoader`] for deployment overrides on top of file values
pub mod env;
pub mod unified;

pub use env::EnvLoader;
pub use unified::{
    BackendConfig, InferenceConfig, InferenceProvider, ProficiencyConfig, RetryConfig,
    RouterConfig, ScoringConfig, SlaConfig,
};

use crate::core::errors::ConfigError;
use std::path::{Path, PathBuf};

/// Default config file location: `<config dir>/ticket-router/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ticket-router")
        .join("config.toml")
}

/// File (if present) then environment, validated.
pub async fn resolve(path: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    let config = match path {
        Some(p) => RouterConfig::load(p).await?,
        None => RouterConfig::load_or_default(&default_config_path()).await?,
    };
    let config = EnvLoader::default().apply_env_overrides(config);
    config.validate()?;
    Ok(config)
}
