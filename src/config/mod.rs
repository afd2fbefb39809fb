mod types;

pub use types::*;

use crate::{Error, Result};
use std::{collections::HashSet, env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    let mut config = load_from(&config_path).await?;

    if let Ok(path) = env::var("YIELD_MODEL_PATH") {
        config.models.yield_model_path = path;
    }
    if let Ok(path) = env::var("PRICE_MODEL_PATH") {
        config.models.price_model_path = path;
    }

    config.validate()?;
    Ok(config)
}

/// Reads a config file, falling back to built-in defaults when it does not exist.
pub async fn load_from(config_path: &str) -> Result<Config> {
    if !Path::new(config_path).exists() {
        debug!("No configuration at {}, using defaults", config_path);
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("server.port must be non-zero"));
        }

        if self.crops.is_empty() {
            return Err(Error::config("crops must list at least one crop"));
        }

        let mut seen = HashSet::new();
        for crop in &self.crops {
            if crop.trim().is_empty() {
                return Err(Error::config("crop names must not be blank"));
            }
            if !seen.insert(crop.as_str()) {
                return Err(Error::config(format!("duplicate crop name: {}", crop)));
            }
        }

        Ok(())
    }
}
