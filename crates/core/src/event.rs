// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server-pushed events.
//!
//! Both unions serialize as `{"type": "...", ...fields}`. Unknown type tags
//! deserialize to `Unknown` so newer servers never break older clients.

use crate::account::AccountId;
use crate::job::{Job, JobId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Events on the job-list stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobEvent {
    /// Full resync: replaces every list.
    Snapshot {
        #[serde(default)]
        running: Vec<Job>,
        #[serde(default)]
        queued: Vec<Job>,
        #[serde(default)]
        completed: Vec<Job>,
    },
    JobQueued { job: Job },
    JobStarted { job: Job },
    JobProgress { job: Job },
    JobCompleted { job: Job },
    JobFailed { job: Job },
    JobCancelled { job: Job },
    JobStopped { job: Job },
    #[serde(other, skip_serializing)]
    Unknown,
}

impl JobEvent {
    /// The job carried by an incremental event.
    pub fn job(&self) -> Option<&Job> {
        match self {
            JobEvent::JobQueued { job }
            | JobEvent::JobStarted { job }
            | JobEvent::JobProgress { job }
            | JobEvent::JobCompleted { job }
            | JobEvent::JobFailed { job }
            | JobEvent::JobCancelled { job }
            | JobEvent::JobStopped { job } => Some(job),
            JobEvent::Snapshot { .. } | JobEvent::Unknown => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            JobEvent::Snapshot { .. } => "snapshot",
            JobEvent::JobQueued { .. } => "job_queued",
            JobEvent::JobStarted { .. } => "job_started",
            JobEvent::JobProgress { .. } => "job_progress",
            JobEvent::JobCompleted { .. } => "job_completed",
            JobEvent::JobFailed { .. } => "job_failed",
            JobEvent::JobCancelled { .. } => "job_cancelled",
            JobEvent::JobStopped { .. } => "job_stopped",
            JobEvent::Unknown => "unknown",
        }
    }
}

/// Payload of a lifecycle notification. Only the ids are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Events on the lifecycle-notification stream.
///
/// These trigger refetches rather than local patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    JobQueued {
        #[serde(default)]
        data: LifecycleData,
    },
    JobStarted {
        #[serde(default)]
        data: LifecycleData,
    },
    JobCompleted {
        #[serde(default)]
        data: LifecycleData,
    },
    AccountUpdate {
        #[serde(default)]
        data: LifecycleData,
    },
    #[serde(other, skip_serializing)]
    Unknown,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
