//! Configuration management

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Default backend address when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the document backend
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::tome_home()?.join("config.toml"))
    }

    /// Get the tome home directory
    pub fn tome_home() -> Result<PathBuf> {
        // Check TOME_HOME env var first
        if let Ok(home) = std::env::var("TOME_HOME") {
            return Ok(PathBuf::from(home));
        }

        // Use XDG directories
        ProjectDirs::from("dev", "tome", "tome")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| Error::config("Could not determine tome home directory"))
    }

    /// Resolve the backend base URL.
    ///
    /// Precedence: `--url` flag, then `TOME_URL`, then the config file,
    /// then [`DEFAULT_BASE_URL`]. The result is validated and returned
    /// without a trailing slash.
    pub fn resolve_base_url(flag: Option<&str>) -> Result<String> {
        let raw = if let Some(url) = flag {
            url.to_string()
        } else if let Ok(url) = std::env::var("TOME_URL") {
            url
        } else {
            Self::load()?
                .backend
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        };

        let parsed = Url::parse(&raw)
            .map_err(|e| Error::config(format!("Invalid backend URL '{}': {}", raw, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Backend URL '{}' must use http or https",
                raw
            )));
        }

        Ok(raw.trim_end_matches('/').to_string())
    }
}
