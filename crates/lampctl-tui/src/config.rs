//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default controller URL when nothing is configured.
pub const DEFAULT_URL: &str = "http://lamp.local";

/// Default status poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the controller
    #[serde(default)]
    pub device_url: Option<String>,

    /// Status poll interval in milliseconds
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lampctl")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Resolve the controller URL from arg, then config, then default.
pub fn resolve_url(url: Option<String>, config: &Config) -> String {
    url.or_else(|| config.device_url.clone())
        .unwrap_or_else(|| DEFAULT_URL.to_string())
}

/// Resolve the poll interval from arg, then config, then default.
pub fn resolve_poll_interval(interval_ms: Option<u64>, config: &Config) -> u64 {
    interval_ms
        .or(config.poll_interval_ms)
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
}
