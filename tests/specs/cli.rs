// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help, version and argument validation.

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("watch")
        .stdout_has("logs")
        .stdout_has("stop-all")
        .stdout_has("accounts");
}

#[test]
fn accounts_help_lists_subcommands() {
    cli()
        .args(&["accounts", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("delete")
        .stdout_has("bulk-delete")
        .stdout_has("set");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn bulk_delete_needs_a_selection() {
    cli().args(&["accounts", "bulk-delete"]).fails().code_is(2);
}

#[test]
fn exclude_requires_all() {
    cli().args(&["accounts", "bulk-delete", "--ids", "1", "--exclude", "2"]).fails().code_is(2);
}

#[test]
fn unreachable_backend_fails_with_request_error() {
    cli()
        .args(&["--base-url", "http://127.0.0.1:1", "stop", "5"])
        .env("JW_HTTP_TIMEOUT_MS", "2000")
        .fails()
        .code_is(1)
        .stderr_has("error:");
}
