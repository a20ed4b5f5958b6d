// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn job_json(progress: serde_json::Value) -> serde_json::Value {
    json!({
        "id": 7,
        "account_id": 42,
        "account_email": "a@example.com",
        "automation_id": 3,
        "automation_name": "warmup",
        "status": "running",
        "queued_at": "2026-01-30T08:14:09Z",
        "started_at": "2026-01-30T08:15:00Z",
        "progress": progress,
    })
}

#[yare::parameterized(
    queued    = { JobStatus::Queued,    false },
    running   = { JobStatus::Running,   false },
    completed = { JobStatus::Completed, true },
    failed    = { JobStatus::Failed,    true },
    cancelled = { JobStatus::Cancelled, true },
)]
fn terminal_iff_finished(status: JobStatus, expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[yare::parameterized(
    integer    = { json!(40),    40 },
    fractional = { json!(12.6),  13 },
    over       = { json!(250),   100 },
    negative   = { json!(-3),    0 },
    null       = { json!(null),  0 },
)]
fn progress_is_clamped(raw: serde_json::Value, expected: u8) {
    let job: Job = serde_json::from_value(job_json(raw)).unwrap();
    assert_eq!(job.progress, expected);
}

#[test]
fn job_decodes_numeric_ids_as_strings() {
    let job: Job = serde_json::from_value(job_json(json!(0))).unwrap();
    assert_eq!(job.id, "7");
    assert_eq!(job.account_id, "42");
    assert_eq!(job.automation_id, "3");
    assert_eq!(job.status, JobStatus::Running);
    assert_eq!(job.completed_at, None);
}

#[test]
fn job_rejects_unknown_status() {
    let mut raw = job_json(json!(0));
    raw["status"] = json!("paused");
    assert!(serde_json::from_value::<Job>(raw).is_err());
}

#[test]
fn job_status_displays_snake_case() {
    assert_eq!(JobStatus::Cancelled.to_string(), "cancelled");
}
