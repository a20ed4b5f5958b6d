// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::test_support::{job, JobBuilder};
use jw_core::{AccountRef, JobStatus, LogLevel};
use jw_storage::JobLists;
use serial_test::serial;

fn no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn job_line_shows_progress_and_error() {
    no_color();
    let failed = JobBuilder::new("123456789")
        .status(JobStatus::Failed)
        .progress(40)
        .error("captcha")
        .build();

    let line = job_line(&failed);
    assert!(line.starts_with("12345678  failed"));
    assert!(line.contains(" 40%"));
    assert!(line.ends_with("(captcha)"));
}

#[test]
#[serial]
fn log_line_prefixes_account() {
    no_color();
    let mut entry = LogEntry::new(LogLevel::Warning, "slow inbox", "2026-01-30T08:00:00Z");
    assert_eq!(log_line(&entry), "2026-01-30T08:00:00Z  WARNING  slow inbox");

    entry.account = Some(AccountRef { id: "9".into(), email: "a@x.io".into() });
    assert_eq!(log_line(&entry), "2026-01-30T08:00:00Z  WARNING  [a@x.io] slow inbox");
}

#[test]
fn view_json_lists_busy_accounts_sorted() {
    let lists = JobLists::from_snapshot(
        &[job("1", "b", JobStatus::Running)],
        &[job("2", "a", JobStatus::Queued)],
        &[job("3", "c", JobStatus::Completed)],
    );
    let value = view_json(&JobView::new(lists));

    assert_eq!(value["busy_accounts"], json!(["a", "b"]));
    assert_eq!(value["running"][0]["id"], json!("1"));
    assert_eq!(value["completed"].as_array().map(Vec::len), Some(1));
}
