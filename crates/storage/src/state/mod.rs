// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-list projection derived from the server event stream.

mod index;
mod jobs;

pub use index::{JobIndex, JobView};
pub use jobs::Applied;

use jw_core::{Job, JobId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of recently finished jobs kept in `completed`.
pub const COMPLETED_CAP: usize = 10;

/// The three disjoint job lists.
///
/// `completed` is most-recent-first and never longer than [`COMPLETED_CAP`].
/// No job id appears twice across (or within) the lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLists {
    pub running: Vec<Job>,
    pub queued: Vec<Job>,
    pub completed: Vec<Job>,
}

impl JobLists {
    /// Build lists from a server snapshot, restoring the invariants if the
    /// server sent overlapping lists. Precedence: running, queued, completed.
    pub fn from_snapshot(running: &[Job], queued: &[Job], completed: &[Job]) -> Self {
        let mut seen = HashSet::new();
        let mut take = |jobs: &[Job]| -> Vec<Job> {
            jobs.iter().filter(|job| seen.insert(job.id.clone())).cloned().collect()
        };
        let running = take(running);
        let queued = take(queued);
        let mut completed = take(completed);
        completed.truncate(COMPLETED_CAP);
        Self { running, queued, completed }
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.iter().find(|job| job.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.running.iter().chain(self.queued.iter()).chain(self.completed.iter())
    }

    pub fn active_len(&self) -> usize {
        self.running.len() + self.queued.len()
    }

    /// Copy of the lists with `id` removed everywhere.
    fn without(&self, id: &JobId) -> Self {
        let keep = |jobs: &[Job]| -> Vec<Job> { jobs.iter().filter(|j| &j.id != id).cloned().collect() };
        Self {
            running: keep(&self.running),
            queued: keep(&self.queued),
            completed: keep(&self.completed),
        }
    }
}

#[cfg(test)]
#[path = "../state_tests/mod.rs"]
mod tests;
