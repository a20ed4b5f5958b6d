// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reactive holder of the current job view.

use jw_core::{Job, JobEvent};
use std::sync::Arc;
use tokio::sync::watch;

use crate::state::JobView;

/// Single-writer store of the job lists.
///
/// Each change publishes a fresh `Arc<JobView>`; an unchanged `Arc` pointer
/// means nothing changed. Readers take snapshots or subscribe; the owner of
/// the store is the only caller of [`JobStore::apply`].
#[derive(Debug)]
pub struct JobStore {
    tx: watch::Sender<Arc<JobView>>,
}

impl JobStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(JobView::default()));
        Self { tx }
    }

    pub fn snapshot(&self) -> Arc<JobView> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<JobView>> {
        self.tx.subscribe()
    }

    /// Apply one event and publish the result if it changed anything.
    ///
    /// Returns the finished job for `job_completed` / `job_failed`.
    pub fn apply(&self, event: &JobEvent) -> Option<Job> {
        let mut finished = None;
        let changed = self.tx.send_if_modified(|view| {
            let applied = view.lists().apply(event);
            finished = applied.finished;
            match applied.next {
                Some(next) => {
                    *view = Arc::new(JobView::new(next));
                    true
                }
                None => false,
            }
        });
        if changed {
            let view = self.tx.borrow();
            tracing::debug!(
                event = event.name(),
                running = view.lists().running.len(),
                queued = view.lists().queued.len(),
                completed = view.lists().completed.len(),
                "job lists updated"
            );
        }
        finished
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
