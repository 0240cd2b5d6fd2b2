//! Configuration management.
//!
//! Reads the optional `.hutch.toml`, applies `HUTCH_*` environment
//! overrides, and resolves the secret key. There is no built-in key: without
//! one, no cipher can be built.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher::AesCtr;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Settings from `.hutch.toml` plus environment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hutch: Meta,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub key: KeyConfig,
}

/// Metadata section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// File locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    /// Account store JSON file
    #[serde(default = "default_accounts")]
    pub accounts: PathBuf,
    /// Env file receiving the active credentials
    #[serde(default = "default_env")]
    pub env: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            env: default_env(),
        }
    }
}

fn default_accounts() -> PathBuf {
    PathBuf::from(constants::ACCOUNTS_FILE)
}

fn default_env() -> PathBuf {
    PathBuf::from(constants::ENV_FILE)
}

/// Key material source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    /// File containing the secret key; `HUTCH_SECRET_KEY` takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load `.hutch.toml` from the current directory and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, parsed,
    /// or validated.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path())?
            .with_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        Ok(config)
    }

    /// Apply `HUTCH_ACCOUNTS` and `HUTCH_ENV_FILE` from `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(accounts) = lookup(constants::ACCOUNTS_ENV).filter(|v| !v.is_empty()) {
            self.paths.accounts = PathBuf::from(accounts);
        }
        if let Some(env) = lookup(constants::ENV_FILE_ENV).filter(|v| !v.is_empty()) {
            self.paths.env = PathBuf::from(env);
        }
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on empty paths or version.
    pub fn validate(&self) -> Result<()> {
        if self.hutch.version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        if self.paths.accounts.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.accounts",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        if self.paths.env.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.env",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve the secret key from `env_value` (normally `HUTCH_SECRET_KEY`)
    /// or the configured key file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecretKey` if neither source yields a key
    /// and `ConfigError::ReadFile` if the key file cannot be read.
    pub fn secret_key(&self, env_value: Option<String>) -> Result<Zeroizing<String>> {
        if let Some(value) = env_value.map(Zeroizing::new) {
            if !value.is_empty() {
                debug!("secret key from environment");
                return Ok(value);
            }
        }

        let Some(path) = &self.key.file else {
            return Err(ConfigError::MissingSecretKey.into());
        };

        #[cfg(unix)]
        {
            if let Ok(Some(mode)) = crate::core::validation::loose_permissions(path) {
                tracing::warn!(
                    path = %path.display(),
                    mode = format_args!("{:o}", mode),
                    "key file is readable by other users; run chmod 600"
                );
            }
        }

        let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            ConfigError::ReadFile {
                path: path.clone(),
                source,
            }
        })?);
        let key = contents.trim_end_matches(['\r', '\n']);
        if key.is_empty() {
            return Err(ConfigError::MissingSecretKey.into());
        }

        debug!(path = %path.display(), "secret key from file");
        Ok(Zeroizing::new(key.to_string()))
    }

    /// Build the cipher from the configured key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no valid key is configured.
    pub fn cipher(&self) -> Result<AesCtr> {
        let secret = self.secret_key(std::env::var(constants::SECRET_KEY_ENV).ok())?;
        AesCtr::from_secret(&secret)
    }
}
