//! Application configuration loading from config.toml
//!
//! The file is optional. `POS_CONFIG` may point at a different path; when the file does
//! not exist the built-in defaults and menu are used.

use crate::config::menu::CategoryConfig;
use crate::core::money::DEFAULT_CURRENCY_SYMBOL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_VAR: &str = "POS_CONFIG";
/// Configuration file used when `POS_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// General counter settings
    #[serde(default)]
    pub settings: Settings,
    /// Menu categories; empty means the built-in menu
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// The `[settings]` table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Seconds between header clock refreshes
    pub clock_interval_secs: u64,
    /// Symbol printed in front of amounts
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clock_interval_secs: 60,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Settings {
    /// Period between header clock refreshes.
    #[must_use]
    pub const fn clock_interval(&self) -> Duration {
        Duration::from_secs(self.clock_interval_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.clock_interval_secs == 0 {
            return Err(Error::Config {
                message: "settings.clock_interval_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses configuration from a TOML string.
///
/// # Errors
/// Returns an error if the TOML is invalid or a setting is out of range.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.settings.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A setting is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads the configuration named by `POS_CONFIG`, or `config.toml`.
///
/// A missing file yields the defaults; an unreadable or invalid one is an error.
///
/// # Errors
/// See [`load_config`].
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        info!("No configuration file at {}; using defaults", path);
        return Ok(AppConfig::default());
    }

    let config = load_config(&path)?;
    info!("Loaded configuration from {}", path);
    Ok(config)
}
