//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag, must exist)
//! 2. `~/.solsieve/config.toml` (user)
//! 3. `/etc/solsieve/config.toml` (system)
//!
//! A config file is optional; built-in defaults apply when none is found.
//! The API key is never read from a file. It comes from the process
//! environment, and its absence is fatal.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Result, SolsieveError};

/// Default oracle model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default base URL for the Gemini REST API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable read for the API key unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Environment variable tried when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Oracle endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Model identifier (default: gemini-2.5-flash).
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL (default: Gemini public endpoint).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key (default: API_KEY).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// Session behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Give up on a classification call after this many seconds.
    /// Unset means wait for as long as the oracle takes.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl SessionConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; an error if it does not exist)
    /// 2. `~/.solsieve/config.toml`
    /// 3. `/etc/solsieve/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a specific config file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SolsieveError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            SolsieveError::Configuration(msg) => {
                SolsieveError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SolsieveError::Configuration(format!("Failed to parse config: {e}"))
        })
    }

    /// Resolve the config file path, if any.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(SolsieveError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".solsieve").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/solsieve/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Resolve the oracle API key from the process environment.
    ///
    /// Checks the configured variable, then `GEMINI_API_KEY`. A missing or
    /// blank key is a fatal configuration error.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_with(|name| env::var(name).ok())
    }

    /// Same as [`api_key`](Self::api_key), with a custom variable lookup.
    pub fn api_key_with<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        [self.oracle.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                SolsieveError::Configuration(format!(
                    "{} environment variable is not set",
                    self.oracle.api_key_env
                ))
            })
    }
}
