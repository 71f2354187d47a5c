// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadError(PathBuf, String),

    #[error("failed to parse config file {0}: {1}")]
    ParseError(PathBuf, String),
}

/// Loads a config type from a specific file, or the first of its default
/// search paths (current directory → XDG config → `/etc`) that exists.
pub trait ConfigFile: Sized + Default + DeserializeOwned {
    fn config_filename() -> &'static str;

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Returns `(config, path_where_found)`, or `(Default::default(), None)`
    /// if none of the default search paths exist.
    fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        for path in Self::default_search_paths() {
            if path.exists() {
                let cfg = Self::load_from_file(&path)?;
                return Ok((cfg, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(Self::config_filename())];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("ook-rs").join(Self::config_filename()));
        }
        paths.push(PathBuf::from("/etc/ook-rs").join(Self::config_filename()));
        paths
    }
}

/// Top-level configuration: the hardware-independent receiver constants
/// plus the bits that only make sense for a running process (which device
/// to open, how verbosely to log).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SoapySDR device args string, e.g. `"driver=rtlsdr"`. Empty lets
    /// SoapySDR pick whatever device it finds.
    pub device_args: String,
    /// `tracing` level name. `None` falls back to INFO.
    pub log_level: Option<String>,
    // Must come last: `receiver` serializes as a `[receiver]` table, and
    // TOML forbids a scalar value after a table header.
    pub receiver: ook_core::Config,
}

impl ConfigFile for AppConfig {
    fn config_filename() -> &'static str {
        "ook-rs.toml"
    }
}
