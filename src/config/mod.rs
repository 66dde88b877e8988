// SPDX-License-Identifier: MPL-2.0
//! This module handles the client configuration, including loading and saving
//! user preferences to a `settings.toml` file, and the compiled-in build mode
//! that decides which base path the application is served under.
//!
//! # Examples
//!
//! ```no_run
//! use estate_client::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep toasts on screen a little longer
//! config.notification_ttl_ms = Some(8000);
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
//! assert_eq!(loaded_config.notification_ttl_ms, Some(8000));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, DEFAULT_NOTIFICATION_TTL_MS,
    MAX_DIAGNOSTICS_BUFFER_CAPACITY, MAX_NOTIFICATION_TTL_MS, MIN_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_NOTIFICATION_TTL_MS,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "EstateClient";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How long a toast stays visible, in milliseconds.
    #[serde(default)]
    pub notification_ttl_ms: Option<u64>,
    /// Number of diagnostic events kept in memory.
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notification_ttl_ms: Some(DEFAULT_NOTIFICATION_TTL_MS),
            diagnostics_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        }
    }
}

impl Config {
    /// Toast lifetime, clamped to the accepted range.
    #[must_use]
    pub fn notification_ttl(&self) -> Duration {
        let ms = self
            .notification_ttl_ms
            .unwrap_or(DEFAULT_NOTIFICATION_TTL_MS)
            .clamp(MIN_NOTIFICATION_TTL_MS, MAX_NOTIFICATION_TTL_MS);
        Duration::from_millis(ms)
    }

    /// Diagnostics buffer capacity, clamped to the accepted range.
    #[must_use]
    pub fn diagnostics_capacity(&self) -> usize {
        self.diagnostics_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
            .clamp(
                MIN_DIAGNOSTICS_BUFFER_CAPACITY,
                MAX_DIAGNOSTICS_BUFFER_CAPACITY,
            )
    }
}

/// Packaging mode the crate was built for.
///
/// Set at compile time from the `ESTATE_ENV` environment flag: `production`
/// selects [`BuildMode::Production`], anything else (or nothing) selects
/// [`BuildMode::Development`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    /// The mode this binary was compiled in.
    #[must_use]
    pub fn current() -> Self {
        Self::from_flag(env!("ESTATE_BUILD_MODE"))
    }

    /// Interprets a build flag value. Only `production` (any case) is special.
    #[must_use]
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("production") {
            BuildMode::Production
        } else {
            BuildMode::Development
        }
    }

    /// Public URL path the application is served under.
    #[must_use]
    pub fn base_path(self) -> &'static str {
        match self {
            BuildMode::Production => defaults::PRODUCTION_BASE_PATH,
            BuildMode::Development => defaults::DEVELOPMENT_BASE_PATH,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the settings file from the platform config directory.
///
/// Returns the defaults when no config directory exists or the file has not
/// been written yet.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Writes `config` to the platform config directory.
///
/// Does nothing on platforms without a config directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparseable content falls back to defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid settings file {}: {}", path.display(), err);
            Ok(Config::default())
        }
    }
}

/// Writes `config` as TOML to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
