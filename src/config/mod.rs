// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration: network and retry settings
//! persisted to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use iced_async_image::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Retry twice by default
//! config.default_retry_attempts = Some(2);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.default_retry_attempts, Some(2));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::error::Result;
use crate::media::MaxRetryAttempts;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedAsyncImage";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub redirect_limit: Option<usize>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub max_body_bytes: Option<u64>,
    #[serde(default)]
    pub default_retry_attempts: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: None,
            redirect_limit: Some(DEFAULT_REDIRECT_LIMIT),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_body_bytes: Some(DEFAULT_MAX_BODY_BYTES),
            default_retry_attempts: Some(DEFAULT_RETRY_ATTEMPTS),
        }
    }
}

impl Config {
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    #[must_use]
    pub fn redirect_limit(&self) -> usize {
        self.redirect_limit.unwrap_or(DEFAULT_REDIRECT_LIMIT)
    }

    /// Request timeout, `None` when disabled with `0`.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    #[must_use]
    pub fn max_body_bytes(&self) -> u64 {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// Retry budget for requests that do not set their own, capped at
    /// [`MAX_RETRY_ATTEMPTS`].
    #[must_use]
    pub fn default_retry_attempts(&self) -> MaxRetryAttempts {
        self.default_retry_attempts
            .map(|value| MaxRetryAttempts::new(value.min(MAX_RETRY_ATTEMPTS)))
            .unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to parse settings.toml; using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            user_agent: Some("tests/1.0".to_string()),
            redirect_limit: Some(3),
            request_timeout_secs: Some(5),
            max_body_bytes: Some(1024),
            default_retry_attempts: Some(4),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_path_errors_when_file_is_missing() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn partial_file_keeps_missing_fields_unset() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "default_retry_attempts = 2\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(loaded.default_retry_attempts, Some(2));
        assert_eq!(loaded.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(loaded.redirect_limit(), DEFAULT_REDIRECT_LIMIT);
    }

    #[test]
    fn zero_timeout_disables_timeout() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(config.request_timeout().is_none());
        assert_eq!(
            Config::default().request_timeout(),
            Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        );
    }

    #[test]
    fn configured_retry_default_is_capped() {
        let config = Config {
            default_retry_attempts: Some(10_000),
            ..Config::default()
        };
        assert_eq!(config.default_retry_attempts().value(), MAX_RETRY_ATTEMPTS);
    }
}
