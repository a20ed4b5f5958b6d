// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::time::Duration;

const VARS: &[&str] = &[
    "JW_BASE_URL",
    "JW_TOKEN",
    "JW_STATE_DIR",
    "JW_CONFIG",
    "JW_RECONNECT_MS",
    "JW_DEBOUNCE_MS",
    "JW_POLL_MS",
    "JW_HTTP_TIMEOUT_MS",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

fn with_file(path: &Path) -> Overrides {
    Overrides { config_file: Some(path.to_path_buf()), ..Overrides::default() }
}

#[test]
#[serial]
fn flags_beat_env_beat_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "base_url = \"http://file.test\"\ntoken = \"file-token\"\nstate_dir = \"/tmp/file-state\"\n",
    );

    let from_file = Config::resolve(with_file(&path)).unwrap();
    assert_eq!(from_file.base_url.as_deref(), Some("http://file.test"));
    assert_eq!(from_file.token.as_deref(), Some("file-token"));
    assert_eq!(from_file.state_dir, PathBuf::from("/tmp/file-state"));

    std::env::set_var("JW_BASE_URL", "http://env.test");
    std::env::set_var("JW_STATE_DIR", "/tmp/env-state");
    let from_env = Config::resolve(with_file(&path)).unwrap();
    assert_eq!(from_env.base_url.as_deref(), Some("http://env.test"));
    assert_eq!(from_env.token.as_deref(), Some("file-token"));
    assert_eq!(from_env.state_dir, PathBuf::from("/tmp/env-state"));

    let overrides = Overrides {
        base_url: Some("http://flag.test".into()),
        ..with_file(&path)
    };
    let from_flag = Config::resolve(overrides).unwrap();
    assert_eq!(from_flag.base_url.as_deref(), Some("http://flag.test"));
    clear_env();
}

#[test]
#[serial]
fn timing_defaults_and_overrides() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "");

    let config = Config::resolve(with_file(&path)).unwrap();
    assert_eq!(config.reconnect_delay, Duration::from_millis(3000));
    assert_eq!(config.debounce, Duration::from_millis(2000));
    assert_eq!(config.poll_interval, Duration::from_millis(5000));

    std::env::set_var("JW_RECONNECT_MS", "250");
    std::env::set_var("JW_POLL_MS", "not a number");
    let config = Config::resolve(with_file(&path)).unwrap();
    assert_eq!(config.reconnect_delay, Duration::from_millis(250));
    assert_eq!(config.poll_interval, Duration::from_millis(5000));
    clear_env();
}

#[test]
#[serial]
fn missing_base_url_names_the_config_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "token = \"t\"\n");

    let err = Config::resolve(with_file(&path)).unwrap().endpoints().unwrap_err();
    assert!(matches!(err, ConfigError::MissingBaseUrl(_)));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
#[serial]
fn unsupported_scheme_is_rejected() {
    clear_env();
    std::env::set_var("JW_BASE_URL", "ftp://backend.test");
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "");

    let err = Config::resolve(with_file(&path)).unwrap().endpoints().unwrap_err();
    assert!(matches!(err, ConfigError::BaseUrl(_)));
    clear_env();
}

#[yare::parameterized(
    unknown_key = { "colour = \"red\"\n" },
    bad_syntax  = { "base_url = \n" },
)]
#[serial]
fn invalid_file_is_a_parse_error(body: &str) {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), body);
    assert!(matches!(Config::resolve(with_file(&path)), Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(Config::resolve(with_file(&missing)), Err(ConfigError::Read { .. })));
    assert!(FileConfig::load(&missing, false).is_ok());
}

#[test]
#[serial]
fn sync_config_carries_token_and_timing() {
    clear_env();
    std::env::set_var("JW_DEBOUNCE_MS", "750");
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "base_url = \"https://console.test\"\ntoken = \"abc\"\n");

    let sync = Config::resolve(with_file(&path)).unwrap().sync_config().unwrap();
    assert_eq!(sync.token.as_deref(), Some("abc"));
    assert_eq!(sync.debounce, Duration::from_millis(750));
    assert_eq!(sync.endpoints.job_stream().as_str(), "wss://console.test/jobs/ws");
    clear_env();
}
