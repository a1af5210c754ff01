//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/expense-tracker/config.toml)
//! 3. Environment variables (EXPENSES_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "EXPENSES";

/// Directory name under the platform config and data dirs
const APP_DIR: &str = "expense-tracker";

/// Application configuration
///
/// Values equal to their defaults are left out when saving, so a saved file
/// only pins what the user set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the ledger file
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Ledger file name, relative to `data_dir` unless absolute
    #[serde(
        default = "default_ledger_file",
        skip_serializing_if = "is_default_ledger_file"
    )]
    pub ledger_file: PathBuf,

    /// Currency symbol printed in front of amounts
    #[serde(default = "default_currency", skip_serializing_if = "is_default_currency")]
    pub currency: String,

    /// Write logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ledger_file: default_ledger_file(),
            currency: default_currency(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (EXPENSES_DATA_DIR, EXPENSES_FILE, ...)
    /// 2. Config file (~/.config/expense-tracker/config.toml or EXPENSES_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = Self::load_file_only(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load only what the config file says, without environment overrides
    ///
    /// This is the base to edit and save back. If the file doesn't exist,
    /// defaults are used.
    pub fn load_file_only(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // EXPENSES_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // EXPENSES_FILE
        if let Ok(val) = std::env::var(format!("{}_FILE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.ledger_file = PathBuf::from(val);
            }
        }

        // EXPENSES_CURRENCY
        if let Ok(val) = std::env::var(format!("{}_CURRENCY", ENV_PREFIX)) {
            self.currency = val;
        }

        // EXPENSES_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with EXPENSES_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Get the path to the ledger file
    ///
    /// An absolute `ledger_file` is returned unchanged.
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(&self.ledger_file)
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_ledger_file() -> PathBuf {
    PathBuf::from("expenses.json")
}

fn default_currency() -> String {
    "$".to_string()
}

fn is_default_data_dir(path: &Path) -> bool {
    path == default_data_dir()
}

fn is_default_ledger_file(path: &Path) -> bool {
    path == default_ledger_file()
}

fn is_default_currency(currency: &str) -> bool {
    currency == default_currency()
}
