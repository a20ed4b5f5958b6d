// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{AccountId, AutomationId, Job, JobEvent, JobId, JobStatus, LogEntry, LogLevel};

// ── Builders ────────────────────────────────────────────────────────────────

/// Test builder for [`Job`] with sensible defaults.
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            job: Job {
                id: JobId::new(id),
                account_id: AccountId::new("acct-1"),
                account_email: "acct-1@example.com".to_string(),
                automation_id: AutomationId::new("auto-1"),
                automation_name: "warmup".to_string(),
                status: JobStatus::Queued,
                queued_at: "2026-01-30T08:00:00Z".to_string(),
                started_at: None,
                completed_at: None,
                progress: 0,
                error: None,
            },
        }
    }

    pub fn account(mut self, account: &str) -> Self {
        self.job.account_id = AccountId::new(account);
        self.job.account_email = format!("{account}@example.com");
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.job.status = status;
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.job.progress = progress;
        self
    }

    pub fn error(mut self, error: &str) -> Self {
        self.job.error = Some(error.to_string());
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}

pub fn job(id: &str, account: &str, status: JobStatus) -> Job {
    JobBuilder::new(id).account(account).status(status).build()
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn queued_event(id: &str, account: &str) -> JobEvent {
    JobEvent::JobQueued { job: job(id, account, JobStatus::Queued) }
}

pub fn started_event(id: &str, account: &str) -> JobEvent {
    JobEvent::JobStarted { job: job(id, account, JobStatus::Running) }
}

pub fn progress_event(id: &str, account: &str, progress: u8) -> JobEvent {
    JobEvent::JobProgress {
        job: JobBuilder::new(id).account(account).status(JobStatus::Running).progress(progress).build(),
    }
}

pub fn completed_event(id: &str, account: &str) -> JobEvent {
    JobEvent::JobCompleted {
        job: JobBuilder::new(id).account(account).status(JobStatus::Completed).progress(100).build(),
    }
}

pub fn failed_event(id: &str, account: &str, error: &str) -> JobEvent {
    JobEvent::JobFailed {
        job: JobBuilder::new(id).account(account).status(JobStatus::Failed).error(error).build(),
    }
}

pub fn cancelled_event(id: &str, account: &str) -> JobEvent {
    JobEvent::JobCancelled { job: job(id, account, JobStatus::Cancelled) }
}

pub fn stopped_event(id: &str, account: &str) -> JobEvent {
    JobEvent::JobStopped { job: job(id, account, JobStatus::Cancelled) }
}

pub fn snapshot_event(running: Vec<Job>, queued: Vec<Job>, completed: Vec<Job>) -> JobEvent {
    JobEvent::Snapshot { running, queued, completed }
}

pub fn log_entry(n: usize) -> LogEntry {
    LogEntry::new(LogLevel::Info, format!("line {n}"), format!("2026-01-30T08:00:{:02}Z", n % 60))
}

// ── Proptest strategies ─────────────────────────────────────────────────────

/// Proptest strategies over a small id space so events collide often.
pub mod strategies {
    use super::*;
    use proptest::prelude::*;

    fn arb_id() -> impl Strategy<Value = String> {
        (1u8..=8).prop_map(|n| n.to_string())
    }

    fn arb_account() -> impl Strategy<Value = String> {
        (1u8..=4).prop_map(|n| format!("acct-{n}"))
    }

    fn arb_job(status: JobStatus) -> impl Strategy<Value = Job> {
        (arb_id(), arb_account()).prop_map(move |(id, account)| job(&id, &account, status))
    }

    pub fn arb_job_event() -> impl Strategy<Value = JobEvent> {
        prop_oneof![
            6 => arb_job(JobStatus::Queued).prop_map(|job| JobEvent::JobQueued { job }),
            6 => arb_job(JobStatus::Running).prop_map(|job| JobEvent::JobStarted { job }),
            3 => (arb_job(JobStatus::Running), 0u8..=100)
                .prop_map(|(mut job, p)| { job.progress = p; JobEvent::JobProgress { job } }),
            4 => arb_job(JobStatus::Completed).prop_map(|job| JobEvent::JobCompleted { job }),
            2 => arb_job(JobStatus::Failed).prop_map(|job| JobEvent::JobFailed { job }),
            2 => arb_job(JobStatus::Cancelled).prop_map(|job| JobEvent::JobCancelled { job }),
            2 => arb_job(JobStatus::Cancelled).prop_map(|job| JobEvent::JobStopped { job }),
            1 => arb_snapshot_event(),
            1 => Just(JobEvent::Unknown),
        ]
    }

    /// Snapshots that may overlap or exceed the completed cap.
    pub fn arb_snapshot_event() -> impl Strategy<Value = JobEvent> {
        (
            prop::collection::vec(arb_job(JobStatus::Running), 0..4),
            prop::collection::vec(arb_job(JobStatus::Queued), 0..4),
            prop::collection::vec(arb_job(JobStatus::Completed), 0..14),
        )
            .prop_map(|(running, queued, completed)| JobEvent::Snapshot { running, queued, completed })
    }
}
