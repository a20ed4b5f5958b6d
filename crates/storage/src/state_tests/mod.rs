// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod index;
mod invariants;

pub(super) use super::{Applied, JobIndex, JobLists, JobView, COMPLETED_CAP};
pub(super) use jw_core::test_support::{
    cancelled_event, completed_event, failed_event, job, progress_event, queued_event,
    snapshot_event, started_event, stopped_event,
};
pub(super) use jw_core::{JobEvent, JobStatus};

/// Apply events in order from an empty state.
pub(super) fn replay(events: &[JobEvent]) -> JobLists {
    events.iter().fold(JobLists::default(), |state, event| {
        state.apply(event).next.unwrap_or(state)
    })
}

fn ids(jobs: &[jw_core::Job]) -> Vec<&str> {
    jobs.iter().map(|j| j.id.as_str()).collect()
}

// ── Lifecycle ordering ──────────────────────────────────────────────────────

#[test]
fn queued_started_completed_ends_in_completed() {
    let state = replay(&[
        queued_event("1", "acct-1"),
        started_event("1", "acct-1"),
        completed_event("1", "acct-1"),
    ]);

    assert!(state.running.is_empty());
    assert!(state.queued.is_empty());
    assert_eq!(ids(&state.completed), vec!["1"]);
    assert_eq!(state.completed[0].status, JobStatus::Completed);
}

#[test]
fn job_started_moves_from_queued_to_running() {
    let state = replay(&[queued_event("1", "acct-1"), queued_event("2", "acct-2")]);
    let next = state.apply(&started_event("1", "acct-1")).next.unwrap();

    assert_eq!(ids(&next.queued), vec!["2"]);
    assert_eq!(ids(&next.running), vec!["1"]);
}

#[test]
fn job_started_for_unseen_job_inserts_into_running() {
    let state = replay(&[started_event("9", "acct-1")]);
    assert_eq!(ids(&state.running), vec!["9"]);
    assert!(state.queued.is_empty());
}

#[test]
fn completion_before_start_still_leaves_queue() {
    let state = replay(&[queued_event("1", "acct-1"), completed_event("1", "acct-1")]);
    assert!(state.queued.is_empty());
    assert_eq!(ids(&state.completed), vec!["1"]);
}

#[test]
fn queued_after_completion_requeues_without_duplicate() {
    let state = replay(&[
        queued_event("1", "acct-1"),
        completed_event("1", "acct-1"),
        queued_event("1", "acct-1"),
    ]);
    assert_eq!(ids(&state.queued), vec!["1"]);
    assert!(state.completed.is_empty());
}

// ── Progress ────────────────────────────────────────────────────────────────

#[test]
fn progress_patches_running_job_in_place() {
    let state = replay(&[started_event("1", "acct-1"), started_event("2", "acct-2")]);
    let next = state.apply(&progress_event("1", "acct-1", 60)).next.unwrap();

    assert_eq!(ids(&next.running), vec!["1", "2"]);
    assert_eq!(next.running[0].progress, 60);
    assert_eq!(next.running[1].progress, 0);
}

#[test]
fn progress_only_touches_the_progress_field() {
    let state = replay(&[started_event("1", "acct-1")]);
    let mut event_job = job("1", "acct-other", JobStatus::Running);
    event_job.progress = 30;
    event_job.automation_name = "renamed".into();
    let next = state.apply(&JobEvent::JobProgress { job: event_job }).next.unwrap();

    assert_eq!(next.running[0].progress, 30);
    assert_eq!(next.running[0].account_id, "acct-1");
    assert_eq!(next.running[0].automation_name, "warmup");
}

#[yare::parameterized(
    queued_job    = { vec![queued_event("1", "acct-1")] },
    unknown_job   = { vec![started_event("2", "acct-1")] },
    empty         = { vec![] },
)]
fn progress_for_non_running_job_is_a_no_op(setup: Vec<JobEvent>) {
    let state = replay(&setup);
    let applied = state.apply(&progress_event("1", "acct-1", 50));
    assert_eq!(applied.next, None);
}

#[test]
fn unchanged_progress_is_a_no_op() {
    let state = replay(&[started_event("1", "acct-1"), progress_event("1", "acct-1", 20)]);
    assert_eq!(state.apply(&progress_event("1", "acct-1", 20)).next, None);
}

// ── Terminal transitions ────────────────────────────────────────────────────

#[yare::parameterized(
    completed = { completed_event("1", "acct-1"),         true },
    failed    = { failed_event("1", "acct-1", "captcha"), true },
    cancelled = { cancelled_event("1", "acct-1"),         false },
    stopped   = { stopped_event("1", "acct-1"),           false },
)]
fn terminal_events_retire_job(event: JobEvent, notifies: bool) {
    let state = replay(&[started_event("1", "acct-1")]);
    let applied = state.apply(&event);
    let next = applied.next.unwrap();

    assert!(next.running.is_empty());
    assert_eq!(ids(&next.completed), vec!["1"]);
    assert_eq!(applied.finished.is_some(), notifies);
}

#[test]
fn cancellation_from_queue_removes_queued_job() {
    let state = replay(&[queued_event("1", "acct-1"), cancelled_event("1", "acct-1")]);
    assert!(state.queued.is_empty());
    assert_eq!(ids(&state.completed), vec!["1"]);
}

#[test]
fn completed_is_most_recent_first_and_capped() {
    let events: Vec<_> = (1..=13).map(|n| completed_event(&n.to_string(), "acct-1")).collect();
    let state = replay(&events);

    assert_eq!(state.completed.len(), COMPLETED_CAP);
    assert_eq!(
        ids(&state.completed),
        vec!["13", "12", "11", "10", "9", "8", "7", "6", "5", "4"]
    );
}

#[test]
fn repeated_completion_is_idempotent() {
    let once = replay(&[started_event("1", "acct-1"), completed_event("1", "acct-1")]);
    let applied = once.apply(&completed_event("1", "acct-1"));
    assert_eq!(applied.next, None);
    assert_eq!(applied.finished, None);
}

#[test]
fn completion_behind_newer_jobs_moves_up_without_finishing_again() {
    let state = replay(&[completed_event("1", "acct-1"), completed_event("2", "acct-1")]);
    let applied = state.apply(&failed_event("1", "acct-1", "late"));

    assert_eq!(ids(&applied.next.unwrap().completed), vec!["1", "2"]);
    assert_eq!(applied.finished, None);
}

// ── Snapshot barrier ────────────────────────────────────────────────────────

#[test]
fn snapshot_replaces_incremental_state() {
    let state = replay(&[
        queued_event("1", "acct-1"),
        started_event("2", "acct-2"),
        completed_event("3", "acct-3"),
    ]);
    let snapshot = snapshot_event(
        vec![job("7", "acct-7", JobStatus::Running)],
        vec![],
        vec![job("8", "acct-8", JobStatus::Failed)],
    );
    let next = state.apply(&snapshot).next.unwrap();

    assert_eq!(ids(&next.running), vec!["7"]);
    assert!(next.queued.is_empty());
    assert_eq!(ids(&next.completed), vec!["8"]);
}

#[test]
fn snapshot_with_overlap_is_normalised() {
    let completed: Vec<_> = (10..25).map(|n| job(&n.to_string(), "acct-1", JobStatus::Completed)).collect();
    let snapshot = snapshot_event(
        vec![job("1", "acct-1", JobStatus::Running)],
        vec![job("1", "acct-1", JobStatus::Queued), job("2", "acct-2", JobStatus::Queued)],
        completed,
    );
    let state = replay(&[snapshot]);

    assert_eq!(ids(&state.running), vec!["1"]);
    assert_eq!(ids(&state.queued), vec!["2"]);
    assert_eq!(state.completed.len(), COMPLETED_CAP);
    assert_eq!(state.completed[0].id, "10");
}

#[test]
fn unknown_event_changes_nothing() {
    let state = replay(&[queued_event("1", "acct-1")]);
    assert_eq!(state.apply(&JobEvent::Unknown), Applied::default());
}
