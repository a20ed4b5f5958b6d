// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn account_busy_after_queue_and_free_after_completion() {
    let queued = replay(&[queued_event("1", "42")]);
    assert!(JobIndex::build(&queued).is_account_busy("42"));

    let done = queued.apply(&completed_event("1", "42")).next.unwrap();
    assert!(!JobIndex::build(&done).is_account_busy("42"));
}

#[test]
fn account_job_prefers_running_over_queued() {
    // Lists built by hand: the reducer never produces two active jobs per
    // account sharing an id, but different jobs per account are allowed.
    let lists = JobLists {
        running: vec![job("2", "acct-1", JobStatus::Running)],
        queued: vec![job("1", "acct-1", JobStatus::Queued)],
        completed: vec![],
    };
    let index = JobIndex::build(&lists);

    assert_eq!(index.account_job("acct-1").map(|j| j.id.as_str()), Some("2"));
    assert_eq!(index.busy_count(), 1);
}

#[test]
fn account_job_falls_back_to_queued() {
    let index = JobIndex::build(&replay(&[queued_event("5", "acct-3")]));
    assert_eq!(index.account_job("acct-3").map(|j| j.id.as_str()), Some("5"));
    assert!(index.account_job("acct-4").is_none());
}

#[test]
fn completed_jobs_do_not_make_accounts_busy() {
    let index = JobIndex::build(&replay(&[failed_event("1", "acct-1", "banned")]));
    assert!(!index.is_account_busy("acct-1"));
    assert_eq!(index.busy_accounts().count(), 0);
}

#[test]
fn view_index_matches_lists() {
    let view = JobView::new(replay(&[started_event("1", "acct-1"), queued_event("2", "acct-2")]));
    assert!(view.is_account_busy("acct-1"));
    assert!(view.is_account_busy("acct-2"));
    assert_eq!(view.index(), &JobIndex::build(view.lists()));
}
