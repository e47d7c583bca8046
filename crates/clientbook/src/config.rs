//! Configuration management for clientbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "clientbook";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "clients.db";

/// Default key-value area file name.
const AREA_FILE_NAME: &str = "local-storage.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CLIENTBOOK_`, sections split by `__`)
/// 2. TOML config file at `~/.config/clientbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record store configuration.
    pub storage: StorageConfig,
    /// Transfer slot configuration.
    pub transfer: TransferConfig,
    /// Banner configuration.
    pub notices: NoticeConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/clientbook/clients.db`
    pub database_path: Option<PathBuf>,
}

/// Transfer slot configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Path to the key-value file backing the transfer slot.
    /// Defaults to `~/.local/share/clientbook/local-storage.json`
    pub area_path: Option<PathBuf>,
}

/// Banner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// How long success and error banners stay visible, in milliseconds.
    pub dismiss_after_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3_000,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("CLIENTBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.notices.dismiss_after_ms == 0 {
            return Err(Error::ConfigValidation {
                message: "dismiss_after_ms must be greater than 0".to_string(),
            });
        }

        if self.database_path() == self.transfer_area_path() {
            return Err(Error::ConfigValidation {
                message: format!(
                    "database_path and area_path must differ (both are {})",
                    self.database_path().display()
                ),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the transfer area path, resolving defaults if not set.
    #[must_use]
    pub fn transfer_area_path(&self) -> PathBuf {
        self.transfer
            .area_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(AREA_FILE_NAME))
    }

    /// Get the banner lifetime as a Duration.
    #[must_use]
    pub fn notice_lifetime(&self) -> Duration {
        Duration::from_millis(self.notices.dismiss_after_ms)
    }
}
