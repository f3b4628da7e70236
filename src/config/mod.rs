mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the YAML config named by `CONFIG_PATH` and applies environment
/// overrides. Without `CONFIG_PATH`, a missing `config.yaml` means defaults.
pub async fn load() -> Result<Config> {
    let explicit = env::var("CONFIG_PATH").ok();
    let config_path = explicit
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if explicit.is_none() && !Path::new(&config_path).exists() {
        debug!("No {} found, using built-in defaults", config_path);
        Config::default()
    } else {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(&config_path).await?;
        parse(&config_str)?
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    Ok(config)
}

pub fn parse(config_str: &str) -> Result<Config> {
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// Applies `PORT`, `HOST`, `COMPRESSIVE_MODEL_PATH` and `TENSILE_MODEL_PATH`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(path) = lookup("COMPRESSIVE_MODEL_PATH") {
        config.models.compressive_path = path;
    }
    if let Some(path) = lookup("TENSILE_MODEL_PATH") {
        config.models.tensile_path = path;
    }
    Ok(())
}
