//! Configuration management for nfd-lookup

use crate::error::{LookupError, Result};
use crate::logicsig::{MAINNET_REGISTRY_APP_ID, TESTNET_REGISTRY_APP_ID};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "nfd.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn registry_app_id(&self) -> u64 {
        match self {
            Network::Mainnet => MAINNET_REGISTRY_APP_ID,
            Network::Testnet => TESTNET_REGISTRY_APP_ID,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub network: Network,
    /// Overrides the network's registry when set.
    pub app_id: Option<u64>,
}

impl RegistryConfig {
    pub fn app_id(&self) -> u64 {
        self.app_id.unwrap_or_else(|| self.network.registry_app_id())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Loads `path`, or `nfd.toml` in the working directory. A missing file
/// gives the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let config: Config = match fs::read_to_string(path) {
        Ok(config_str) => toml::from_str(&config_str)?,
        Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
        Err(e) => return Err(e.into()),
    };

    // Validate critical values
    if config.registry.app_id == Some(0) {
        return Err(LookupError::ConfigError(
            "registry.app_id must be non-zero".to_string(),
        ));
    }

    if config.logging.level.trim().is_empty() {
        return Err(LookupError::ConfigError(
            "logging.level must not be empty".to_string(),
        ));
    }

    Ok(config)
}
