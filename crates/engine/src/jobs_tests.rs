// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::test_support::{
    completed_event, failed_event, job, progress_event, queued_event, snapshot_event,
    started_event, stopped_event,
};
use jw_core::JobStatus;
use parking_lot::Mutex;
use tokio::time::sleep;

fn frame(event: &JobEvent) -> String {
    serde_json::to_string(event).unwrap()
}

fn feed(handler: &Arc<dyn FrameHandler>, events: &[JobEvent]) {
    for event in events {
        handler.handle(&frame(event)).unwrap();
    }
}

#[test]
fn frames_flow_into_the_view() {
    let jobs = JobsService::new();
    let handler = jobs.frame_handler();
    feed(&handler, &[queued_event("1", "42"), queued_event("2", "7"), started_event("1", "42")]);

    let view = jobs.view();
    assert_eq!(view.lists().running.len(), 1);
    assert_eq!(view.lists().queued.len(), 1);
    assert!(jobs.is_account_busy("42"));
    assert_eq!(jobs.account_job("42").map(|j| j.status), Some(JobStatus::Running));

    feed(&handler, &[completed_event("1", "42")]);
    assert!(!jobs.is_account_busy("42"));
    assert!(jobs.is_account_busy("7"));
}

#[test]
fn only_completed_and_failed_reach_subscribers() {
    let jobs = JobsService::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = jobs.completions().subscribe(move |job| sink.lock().push(job.id.to_string()));

    feed(
        &jobs.frame_handler(),
        &[
            queued_event("1", "a"),
            started_event("1", "a"),
            progress_event("1", "a", 50),
            completed_event("1", "a"),
            queued_event("2", "b"),
            stopped_event("2", "b"),
            failed_event("3", "c", "captcha"),
        ],
    );

    assert_eq!(*seen.lock(), vec!["1".to_string(), "3".to_string()]);
}

#[test]
fn replayed_completion_notifies_once() {
    let jobs = JobsService::new();
    let seen = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&seen);
    let _sub = jobs.completions().subscribe(move |_| *sink.lock() += 1);

    let handler = jobs.frame_handler();
    feed(&handler, &[started_event("1", "a"), completed_event("1", "a"), completed_event("1", "a")]);

    assert_eq!(*seen.lock(), 1);
    assert_eq!(jobs.view().lists().completed.len(), 1);
}

#[test]
fn unknown_and_malformed_frames_leave_state_alone() {
    let jobs = JobsService::new();
    let handler = jobs.frame_handler();
    feed(&handler, &[snapshot_event(vec![job("1", "a", JobStatus::Running)], vec![], vec![])]);
    let before = jobs.view();

    handler.handle(r#"{"type":"job_paused","job":{}}"#).unwrap();
    assert!(handler.handle(r#"{"type":"job_started","job":{"id":1}}"#).is_err());
    assert!(handler.handle("[1,2").is_err());

    assert!(Arc::ptr_eq(&before, &jobs.view()));
}

#[tokio::test(start_paused = true)]
async fn completion_burst_refreshes_accounts_once() {
    let jobs = JobsService::new();
    let cache = Arc::new(QueryCache::new());
    let mut rx = cache.subscribe();
    let refresh = jobs.on_completion_refresh_accounts(Arc::clone(&cache), Duration::from_millis(2_000));
    let handler = jobs.frame_handler();

    for n in 0..5 {
        feed(&handler, &[completed_event(&n.to_string(), "a")]);
        sleep(Duration::from_millis(100)).await;
    }
    assert!(refresh.is_pending());
    assert!(rx.try_recv().is_err());

    sleep(Duration::from_millis(2_000)).await;
    assert_eq!(rx.try_recv().unwrap(), QueryKey::Accounts);
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_refresh_unsubscribes() {
    let jobs = JobsService::new();
    let cache = Arc::new(QueryCache::new());
    let mut rx = cache.subscribe();
    drop(jobs.on_completion_refresh_accounts(Arc::clone(&cache), Duration::from_millis(2_000)));

    feed(&jobs.frame_handler(), &[completed_event("1", "a")]);
    sleep(Duration::from_secs(5)).await;

    assert_eq!(jobs.completions().subscriber_count(), 0);
    assert!(rx.try_recv().is_err());
}
