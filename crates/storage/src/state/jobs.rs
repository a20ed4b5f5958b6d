// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job event reducer.

use jw_core::{Job, JobEvent};

use super::{JobLists, COMPLETED_CAP};

/// Result of applying one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// The next state, or `None` when the event changed nothing.
    pub next: Option<JobLists>,
    /// Set for the first `job_completed` / `job_failed` of a job: the job to
    /// hand to completion subscribers.
    pub finished: Option<Job>,
}

impl Applied {
    fn changed(next: JobLists) -> Self {
        Self { next: Some(next), finished: None }
    }

    fn unchanged() -> Self {
        Self::default()
    }
}

impl JobLists {
    /// Apply an event, producing a new state. `self` is never mutated.
    ///
    /// Handlers are idempotent: replaying an event yields the same lists.
    /// Every insert first removes the job id from all lists, so events that
    /// arrive out of order (a start for an unseen job, a completion for a
    /// job still marked queued) keep the lists disjoint.
    pub fn apply(&self, event: &JobEvent) -> Applied {
        match event {
            JobEvent::Snapshot { running, queued, completed } => {
                Applied::changed(JobLists::from_snapshot(running, queued, completed))
            }

            JobEvent::JobQueued { job } => {
                let mut next = self.without(&job.id);
                next.queued.push(job.clone());
                Applied::changed(next)
            }

            JobEvent::JobStarted { job } => {
                let mut next = self.without(&job.id);
                next.running.push(job.clone());
                Applied::changed(next)
            }

            // Progress only patches running jobs and never moves them
            JobEvent::JobProgress { job } => {
                let Some(pos) = self.running.iter().position(|j| j.id == job.id) else {
                    return Applied::unchanged();
                };
                if self.running[pos].progress == job.progress {
                    return Applied::unchanged();
                }
                let mut next = self.clone();
                next.running[pos].progress = job.progress;
                Applied::changed(next)
            }

            // A replayed terminal event re-retires the job but is not a new finish
            JobEvent::JobCompleted { job } | JobEvent::JobFailed { job } => {
                let seen = self.completed.iter().any(|j| j.id == job.id);
                if seen && self.completed.first() == Some(job) {
                    return Applied::unchanged();
                }
                Applied { next: Some(self.retire(job)), finished: (!seen).then(|| job.clone()) }
            }

            JobEvent::JobCancelled { job } | JobEvent::JobStopped { job } => {
                Applied::changed(self.retire(job))
            }

            JobEvent::Unknown => Applied::unchanged(),
        }
    }

    fn retire(&self, job: &Job) -> JobLists {
        let mut next = self.without(&job.id);
        next.completed.insert(0, job.clone());
        next.completed.truncate(COMPLETED_CAP);
        next
    }
}
