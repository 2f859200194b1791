//! Configuration management
//!
//! This module handles loading and saving the aikido configuration file.
//! The configuration file is stored in TOML format at ~/.config/aikido/config.toml,
//! or inside `$AIKIDO_CONFIG_DIR` when that variable is set.
//!
//! PROTECTED FILE: Changes to schema_version require migration support.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// API endpoint used when neither a flag nor the config file names one
pub const DEFAULT_BASE_URL: &str = "https://app.aikido.dev";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "AIKIDO_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// API key used to authenticate against the Aikido API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the Aikido API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            api_key: None,
            base_url: None,
        }
    }
}

/// Effective settings after applying command line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    /// Combine the stored settings with overrides from flags or environment
    ///
    /// Overrides win over the file; the base URL falls back to
    /// [`DEFAULT_BASE_URL`]. A missing API key is an error.
    pub fn resolve(
        &self,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<ResolvedConfig> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                Error::Config(
                    "No API key configured. Run `aikido apikey <key>` or set AIKIDO_API_KEY."
                        .into(),
                )
            })?;

        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(ResolvedConfig { api_key, base_url })
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("aikido"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade aikido.",
                config.schema_version, SCHEMA_VERSION
            )));
        }
        config.schema_version = SCHEMA_VERSION;

        Ok(config)
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only) since the file
    /// holds the API key.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }
}
