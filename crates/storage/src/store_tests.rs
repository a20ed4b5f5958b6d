// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::test_support::{completed_event, progress_event, queued_event, started_event};

#[test]
fn apply_publishes_new_arc_on_change() {
    let store = JobStore::new();
    let before = store.snapshot();

    store.apply(&queued_event("1", "42"));
    let after = store.snapshot();

    assert!(!Arc::ptr_eq(&before, &after));
    assert!(after.is_account_busy("42"));
}

#[test]
fn no_op_event_keeps_the_same_arc() {
    let store = JobStore::new();
    store.apply(&queued_event("1", "42"));
    let before = store.snapshot();

    assert_eq!(store.apply(&progress_event("1", "42", 10)), None);
    assert_eq!(store.apply(&JobEvent::Unknown), None);

    assert!(Arc::ptr_eq(&before, &store.snapshot()));
}

#[test]
fn completion_returns_finished_job() {
    let store = JobStore::new();
    store.apply(&started_event("1", "42"));

    let finished = store.apply(&completed_event("1", "42"));

    assert_eq!(finished.map(|j| j.id.to_string()), Some("1".to_string()));
    assert!(!store.snapshot().is_account_busy("42"));
}

#[tokio::test]
async fn subscribers_see_changes() {
    let store = JobStore::new();
    let mut rx = store.subscribe();

    store.apply(&queued_event("1", "42"));

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().lists().queued.len(), 1);
}

#[tokio::test]
async fn subscribers_are_not_woken_by_no_ops() {
    let store = JobStore::new();
    let mut rx = store.subscribe();

    store.apply(&JobEvent::Unknown);

    assert!(!rx.has_changed().unwrap());
}
