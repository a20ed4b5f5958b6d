// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved CLI configuration.
//!
//! Command-line flags win over environment variables, which win over the
//! optional TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jw_engine::SyncConfig;
use jw_wire::{EndpointError, Endpoints};
use serde::Deserialize;
use thiserror::Error;

use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no backend URL configured; pass --base-url, set JW_BASE_URL, or add base_url to {0}")]
    MissingBaseUrl(String),
    #[error("invalid backend URL: {0}")]
    BaseUrl(#[from] EndpointError),
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config file {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("cannot determine state directory; set JW_STATE_DIR or HOME")]
    NoStateDir,
}

/// Contents of `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub state_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load `path`. A missing file is only an error when it was asked for
    /// explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default())
            }
            Err(source) => return Err(ConfigError::Read { path: path.to_path_buf(), source }),
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub state_dir: PathBuf,
    pub reconnect_delay: Duration,
    pub debounce: Duration,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
    config_path: PathBuf,
}

impl Config {
    pub fn resolve(overrides: Overrides) -> Result<Self, ConfigError> {
        let (config_path, explicit) = match overrides.config_file.or_else(env::config_file) {
            Some(path) => (path, true),
            None => (default_config_path(), false),
        };
        let file = FileConfig::load(&config_path, explicit)?;

        let state_dir = match overrides.state_dir.or_else(env::state_dir).or(file.state_dir) {
            Some(dir) => dir,
            None => env::default_state_dir()?,
        };

        Ok(Self {
            base_url: overrides.base_url.or_else(env::base_url).or(file.base_url),
            token: overrides.token.or_else(env::token).or(file.token),
            state_dir,
            reconnect_delay: env::reconnect_delay(),
            debounce: env::debounce(),
            poll_interval: env::poll_interval(),
            http_timeout: env::http_timeout(),
            config_path,
        })
    }

    /// Endpoints of the configured backend.
    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingBaseUrl(self.config_path.display().to_string()))?;
        Ok(Endpoints::parse(base)?)
    }

    pub fn sync_config(&self) -> Result<SyncConfig, ConfigError> {
        let mut sync = SyncConfig::new(self.endpoints()?, self.token.clone());
        sync.reconnect_delay = self.reconnect_delay;
        sync.debounce = self.debounce;
        Ok(sync)
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("jw").join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
