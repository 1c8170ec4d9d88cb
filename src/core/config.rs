//! Configuration file management.
//!
//! Handles reading, writing, and validating `~/.hexagon/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// User configuration stored in `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Metadata about the configuration
    pub hexagon: Meta,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Metadata section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
}

/// Share link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Landing page share links point at.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    constants::DEFAULT_SHARE_URL.to_string()
}

/// Store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Vault file; defaults to `~/.hexagon/vault.toml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Create a configuration with defaults and the current version
    pub fn new() -> Self {
        Self {
            hexagon: Meta {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            share: ShareConfig::default(),
            store: StoreConfig::default(),
        }
    }

    /// `~/.hexagon`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if HOME cannot be determined.
    pub fn app_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(constants::APP_DIR))
            .ok_or_else(|| ConfigError::NoHomeDir.into())
    }

    /// `$HEXAGON_CONFIG` if set, else `~/.hexagon/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        match std::env::var_os(constants::CONFIG_ENV) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(Self::app_dir()?.join(constants::CONFIG_FILE)),
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed and
    /// `ConfigError::InvalidValue` if it fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolved store file: `[store] path` or `~/.hexagon/vault.toml`.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::app_dir()?.join(constants::STORE_FILE)),
        }
    }

    /// Validate the configuration contents
    ///
    /// Checks:
    /// - Version field is non-empty
    /// - Share base URL is an http(s) URL without a query string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.hexagon.version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        let url = self.share.base_url.as_str();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        match rest {
            Some(host) if !host.is_empty() && !url.contains('?') => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "share.base_url",
                    reason: format!("expected an http(s) URL without a query, got '{}'", url),
                }
                .into())
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
