// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration resolution as seen from the command line.

use crate::prelude::*;

#[test]
fn missing_base_url_is_a_config_error() {
    cli().args(&["stop", "5"]).fails().code_is(2).stderr_has("no backend URL configured");
}

#[test]
fn unsupported_scheme_is_rejected() {
    cli()
        .args(&["--base-url", "ftp://console.example.com", "active"])
        .fails()
        .code_is(2)
        .stderr_has("unsupported scheme `ftp`");
}

#[test]
fn env_base_url_is_validated() {
    cli()
        .env("JW_BASE_URL", "gopher://console.example.com")
        .args(&["stop-all"])
        .fails()
        .code_is(2)
        .stderr_has("unsupported scheme `gopher`");
}

#[test]
fn config_file_supplies_base_url() {
    cli()
        .file("config/jw/config.toml", "base_url = \"ftp://from-file.example.com\"\n")
        .args(&["active"])
        .fails()
        .code_is(2)
        .stderr_has("unsupported scheme `ftp`");
}

#[test]
fn flag_overrides_config_file() {
    cli()
        .file("config/jw/config.toml", "base_url = \"https://from-file.example.com\"\n")
        .args(&["--base-url", "ftp://flag.example.com", "active"])
        .fails()
        .stderr_has("unsupported scheme `ftp`");
}

#[test]
fn unknown_config_key_is_rejected() {
    let run = cli().file("custom.toml", "base_url = \"https://x.example.com\"\nretries = 3\n");
    let path = run.home().join("custom.toml");
    run.env("JW_CONFIG", &path)
        .args(&["active"])
        .fails()
        .code_is(2)
        .stderr_has("invalid config file");
}

#[test]
fn explicit_missing_config_is_an_error() {
    cli()
        .args(&["--config", "/nonexistent/jw.toml", "logs"])
        .fails()
        .code_is(2)
        .stderr_has("cannot read");
}
