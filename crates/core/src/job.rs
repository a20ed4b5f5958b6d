// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation jobs as reported by the backend.

use crate::account::AccountId;
use serde::{Deserialize, Deserializer, Serialize};

crate::define_id! {
    /// Server-assigned job identifier.
    pub struct JobId;
}

crate::define_id! {
    /// Identifier of the automation a job runs.
    #[derive(Default)]
    pub struct AutomationId;
}

/// Lifecycle status of a job.
///
/// Jobs move `queued → running → (completed | failed | cancelled)`;
/// cancellation may also happen straight from `queued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    /// True for completed, failed and cancelled jobs.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled)
    }
}

crate::simple_display! {
    JobStatus {
        Queued => "queued",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
        Cancelled => "cancelled",
    }
}

/// One automation run assigned to one account.
///
/// Timestamps are kept exactly as the server sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub account_id: AccountId,
    #[serde(default)]
    pub account_email: String,
    #[serde(default)]
    pub automation_id: AutomationId,
    #[serde(default)]
    pub automation_name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub queued_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    /// Percent complete, clamped to 0-100.
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Accepts integer or fractional progress (or null) and clamps to 0-100.
fn deserialize_progress<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let raw = Option::<f64>::deserialize(d)?.unwrap_or(0.0);
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
