// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::JobId;

fn drain(rx: &mut tokio::sync::broadcast::Receiver<QueryKey>) -> Vec<QueryKey> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[yare::parameterized(
    queued    = { r#"{"type":"job_queued","data":{"job_id":5}}"#,
                  vec![QueryKey::Jobs, QueryKey::ActiveJobs] },
    started   = { r#"{"type":"job_started","data":{"job_id":5,"account_id":2}}"#,
                  vec![QueryKey::Jobs, QueryKey::ActiveJobs, QueryKey::Job(JobId::new("5"))] },
    completed = { r#"{"type":"job_completed","data":{"job_id":"5"}}"#,
                  vec![QueryKey::Jobs, QueryKey::ActiveJobs, QueryKey::Job(JobId::new("5")), QueryKey::Accounts] },
    no_id     = { r#"{"type":"job_completed"}"#,
                  vec![QueryKey::Jobs, QueryKey::ActiveJobs, QueryKey::Accounts] },
    account   = { r#"{"type":"account_update","data":{"account_id":2}}"#,
                  vec![QueryKey::Accounts] },
    unknown   = { r#"{"type":"server_restarting"}"#, vec![] },
)]
fn frame_invalidates_expected_queries(frame: &str, expected: Vec<QueryKey>) {
    let cache = Arc::new(QueryCache::new());
    let mut rx = cache.subscribe();
    let dispatcher = LifecycleDispatcher::new(Arc::clone(&cache));

    dispatcher.handle(frame).unwrap();
    assert_eq!(drain(&mut rx), expected);
}

#[test]
fn malformed_frame_is_an_error_and_invalidates_nothing() {
    let cache = Arc::new(QueryCache::new());
    let mut rx = cache.subscribe();
    let dispatcher = LifecycleDispatcher::new(Arc::clone(&cache));

    assert!(dispatcher.handle("{\"type\":").is_err());
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn invalidation_is_idempotent_under_replay() {
    let event: LifecycleEvent =
        serde_json::from_str(r#"{"type":"job_started","data":{"job_id":1}}"#).unwrap();
    assert_eq!(invalidations(&event), invalidations(&event.clone()));
}
