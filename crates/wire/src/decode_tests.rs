// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::{JobStatus, LogLevel};

#[test]
fn decodes_job_started_frame() {
    let frame = r#"{"type":"job_started","job":{"id":3,"account_id":42,"status":"running","progress":5}}"#;
    let event = decode_job_frame(frame).unwrap();

    let JobEvent::JobStarted { job } = event else {
        panic!("expected job_started, got {event:?}");
    };
    assert_eq!(job.id, "3");
    assert_eq!(job.account_id, "42");
    assert_eq!(job.status, JobStatus::Running);
}

#[yare::parameterized(
    not_json      = { "hello" },
    truncated     = { r#"{"type":"snapshot","running":["# },
    missing_tag   = { r#"{"job":{"id":1}}"# },
    bad_job       = { r#"{"type":"job_queued","job":{"status":"queued"}}"# },
    array         = { "[1,2,3]" },
)]
fn malformed_job_frames_are_decode_errors(frame: &str) {
    assert!(matches!(decode_job_frame(frame), Err(DecodeError::Json(_))));
}

#[yare::parameterized(
    empty      = { "" },
    whitespace = { "  \n" },
)]
fn blank_frames_are_empty(frame: &str) {
    assert!(matches!(decode_job_frame(frame), Err(DecodeError::Empty)));
}

#[test]
fn unknown_job_frame_type_decodes_to_unknown() {
    let event = decode_job_frame(r#"{"type":"queue_resized","size":4}"#).unwrap();
    assert_eq!(event, JobEvent::Unknown);
}

#[test]
fn decodes_log_frame() {
    let frame = r#"{"level":"SUCCESS","message":"logged in","timestamp":"2026-01-30T08:00:00Z","account":{"id":9,"email":"a@b.c"},"activity_id":"act-1"}"#;
    let entry = decode_log_frame(frame).unwrap();

    assert_eq!(entry.level, LogLevel::Success);
    assert_eq!(entry.account.map(|a| a.id.to_string()), Some("9".to_string()));
    assert_eq!(entry.activity_id.as_deref(), Some("act-1"));
}

#[test]
fn log_frame_with_unknown_level_is_rejected() {
    assert!(decode_log_frame(r#"{"level":"TRACE","message":"x"}"#).is_err());
}

#[test]
fn decodes_lifecycle_frame() {
    let event = decode_lifecycle_frame(r#"{"type":"job_queued","data":{"job_id":1}}"#).unwrap();
    assert!(matches!(event, LifecycleEvent::JobQueued { .. }));
}
