// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jw logs` against the persisted buffer; no backend needed.

use crate::prelude::*;

#[test]
fn logs_shows_most_recent_lines() {
    cli()
        .file("state/jw/automation_logs.json", &stored_logs(3))
        .args(&["logs", "-n", "2"])
        .passes()
        .stdout_lacks("line 1\n")
        .stdout_has("line 2")
        .stdout_has("line 3");
}

#[test]
fn logs_honours_state_dir_env() {
    let run = cli();
    let dir = run.home().join("elsewhere");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("automation_logs.json"), stored_logs(1)).unwrap();

    run.env("JW_STATE_DIR", &dir).args(&["logs"]).passes().stdout_has("INFO     line 1");
}

#[test]
fn logs_json_prints_one_object_per_line() {
    let outcome = cli()
        .file("state/jw/automation_logs.json", &stored_logs(2))
        .args(&["--format", "json", "logs"])
        .passes();

    let lines: Vec<serde_json::Value> =
        outcome.stdout().lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["message"], "line 2");
    assert_eq!(lines[1]["level"], "INFO");
}

#[test]
fn fresh_session_clears_stored_lines() {
    let run = cli().file("state/jw/automation_logs.json", &stored_logs(2));
    let stored = run.state_dir().join("automation_logs.json");
    let _outcome = run.args(&["logs", "--fresh"]).passes().stdout_lacks("line");
    assert!(!stored.exists());
}

#[test]
fn corrupt_store_starts_empty() {
    cli()
        .file("state/jw/automation_logs.json", "{not json")
        .args(&["logs"])
        .passes()
        .stdout_lacks("line");
}
