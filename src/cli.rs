//! Shared helpers for the command-line binary

use crate::config::{load_config, Config, Network};
use crate::error::Result;
use std::path::Path;

/// Loads the configuration and installs the logger. `RUST_LOG` takes
/// precedence over `logging.level`.
pub fn init_from_config(path: Option<&Path>) -> Result<Config> {
    let config = load_config(path)?;
    let env = env_logger::Env::default().default_filter_or(config.logging.level.clone());
    // A logger may already be installed when embedded in a test harness.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
    log::debug!("loaded configuration: {:?}", config);
    Ok(config)
}

/// Command-line flags win over the config file: an explicit app ID first,
/// then an explicit network, then `[registry]`.
pub fn resolve_app_id(app_id: Option<u64>, network: Option<Network>, config: &Config) -> u64 {
    match (app_id, network) {
        (Some(id), _) => id,
        (None, Some(network)) => network.registry_app_id(),
        (None, None) => config.registry.app_id(),
    }
}

/// Parses a 32-byte hex string, tolerating an `0x` prefix.
pub fn parse_hex32(input: &str) -> std::result::Result<Vec<u8>, String> {
    let trimmed = input.trim().trim_start_matches("0x");
    let bytes = hex::decode(trimmed).map_err(|e| format!("Invalid hex: {}", e))?;
    if bytes.len() != 32 {
        return Err(format!("Expected 32 bytes, got {}", bytes.len()));
    }
    Ok(bytes)
}
