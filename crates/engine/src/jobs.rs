// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Owner of the job store and its completion fan-out.

use crate::completion::{CompletionNotifier, Debouncer, Subscription};
use jw_adapters::FrameHandler;
use jw_core::{Job, JobEvent};
use jw_storage::{JobStore, JobView, QueryCache, QueryKey};
use jw_wire::{decode_job_frame, DecodeError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Read-only face of the job lists plus the completion registry.
///
/// Only the frame handler returned by [`JobsService::frame_handler`] writes
/// to the store.
#[derive(Clone, Default)]
pub struct JobsService {
    store: Arc<JobStore>,
    completions: CompletionNotifier,
}

impl JobsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Arc<JobView> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<JobView>> {
        self.store.subscribe()
    }

    pub fn is_account_busy(&self, account_id: &str) -> bool {
        self.store.snapshot().is_account_busy(account_id)
    }

    pub fn account_job(&self, account_id: &str) -> Option<Job> {
        self.store.snapshot().account_job(account_id).cloned()
    }

    pub fn completions(&self) -> &CompletionNotifier {
        &self.completions
    }

    pub fn frame_handler(&self) -> Arc<dyn FrameHandler> {
        Arc::new(JobFrames { store: Arc::clone(&self.store), completions: self.completions.clone() })
    }

    /// Refresh the account list once completions settle down.
    pub fn on_completion_refresh_accounts(
        &self,
        cache: Arc<QueryCache>,
        quiet: Duration,
    ) -> CompletionRefresh {
        let debouncer = Arc::new(Debouncer::new(quiet, move || {
            cache.invalidate(QueryKey::Accounts);
        }));
        let trigger = Arc::clone(&debouncer);
        let subscription = self.completions.subscribe(move |_| trigger.trigger());
        CompletionRefresh { debouncer, _subscription: subscription }
    }
}

/// Keeps the debounced account refresh registered while alive.
pub struct CompletionRefresh {
    debouncer: Arc<Debouncer>,
    _subscription: Subscription,
}

impl CompletionRefresh {
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

struct JobFrames {
    store: Arc<JobStore>,
    completions: CompletionNotifier,
}

impl FrameHandler for JobFrames {
    fn handle(&self, text: &str) -> Result<(), DecodeError> {
        let event = decode_job_frame(text)?;
        if event == JobEvent::Unknown {
            tracing::debug!("ignoring unknown job event");
            return Ok(());
        }
        if let Some(job) = self.store.apply(&event) {
            tracing::info!(job_id = %job.id, status = %job.status, account = %job.account_id, "job finished");
            self.completions.notify(&job);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
