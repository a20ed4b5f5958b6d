// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

use jw_adapters::{DEFAULT_HTTP_TIMEOUT, DEFAULT_RECONNECT_DELAY};
use jw_engine::{DEFAULT_DEBOUNCE, DEFAULT_POLL_INTERVAL};

use crate::config::ConfigError;

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn millis(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Backend base URL
pub fn base_url() -> Option<String> {
    non_empty("JW_BASE_URL")
}

/// Token appended to the lifecycle and log sockets and sent as a bearer
/// token on REST calls.
pub fn token() -> Option<String> {
    non_empty("JW_TOKEN")
}

/// Explicit state directory (`JW_STATE_DIR`).
pub fn state_dir() -> Option<PathBuf> {
    non_empty("JW_STATE_DIR").map(PathBuf::from)
}

/// Fallback state directory: XDG_STATE_HOME/jw > ~/.local/state/jw
pub fn default_state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("jw"));
    }
    let home = non_empty("HOME").ok_or(ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/jw"))
}

/// Config file override (default `<config_dir>/jw/config.toml`).
pub fn config_file() -> Option<PathBuf> {
    non_empty("JW_CONFIG").map(PathBuf::from)
}

pub fn reconnect_delay() -> Duration {
    millis("JW_RECONNECT_MS").unwrap_or(DEFAULT_RECONNECT_DELAY)
}

pub fn debounce() -> Duration {
    millis("JW_DEBOUNCE_MS").unwrap_or(DEFAULT_DEBOUNCE)
}

pub fn poll_interval() -> Duration {
    millis("JW_POLL_MS").unwrap_or(DEFAULT_POLL_INTERVAL)
}

pub fn http_timeout() -> Duration {
    millis("JW_HTTP_TIMEOUT_MS").unwrap_or(DEFAULT_HTTP_TIMEOUT)
}

/// Tracing filter: JW_LOG > RUST_LOG > "info"
pub fn log_filter() -> String {
    non_empty("JW_LOG").or_else(|| non_empty("RUST_LOG")).unwrap_or_else(|| "info".to_string())
}
