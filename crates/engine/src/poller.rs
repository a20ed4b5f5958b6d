// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active-jobs polling while the job stream is down.

use jw_adapters::{ConnectionState, ControlError, JobControl};
use jw_storage::{CacheSlot, QueryCache, QueryKey};
use jw_wire::ActiveJobSummary;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

pub struct ActivePoller<C> {
    control: C,
    slot: CacheSlot<Vec<ActiveJobSummary>>,
    published: watch::Sender<Option<Vec<ActiveJobSummary>>>,
    interval: Duration,
}

impl<C: JobControl> ActivePoller<C> {
    pub fn new(control: C, interval: Duration) -> Self {
        let (published, _) = watch::channel(None);
        Self { control, slot: CacheSlot::new(), published, interval }
    }

    /// Last polled list, if any poll has succeeded.
    pub fn active(&self) -> Option<Vec<ActiveJobSummary>> {
        self.slot.get()
    }

    /// Every stored poll result, including repeats of the same list.
    pub fn subscribe(&self) -> watch::Receiver<Option<Vec<ActiveJobSummary>>> {
        self.published.subscribe()
    }

    /// Fetch once. Returns whether the result was stored.
    pub async fn poll_once(&self) -> Result<bool, ControlError> {
        let ticket = self.slot.begin_fetch();
        let active = self.control.active().await?;
        tracing::debug!(jobs = active.len(), "polled active jobs");
        let stored = self.slot.complete_fetch(ticket, active.clone());
        if stored {
            self.published.send_replace(Some(active));
        }
        Ok(stored)
    }

    /// Poll every interval while `state` is not `Connected`, and at once on
    /// an `ActiveJobs` invalidation. Returns when the connection or the
    /// cache goes away.
    pub async fn run(&self, mut state: watch::Receiver<ConnectionState>, cache: Arc<QueryCache>) {
        let mut invalidations = cache.subscribe();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if *state.borrow() != ConnectionState::Connected {
                        self.poll_logged().await;
                    }
                }
                key = invalidations.recv() => match key {
                    Ok(QueryKey::ActiveJobs) | Err(RecvError::Lagged(_)) => self.poll_logged().await,
                    Ok(_) => {}
                    Err(RecvError::Closed) => break,
                },
                changed = state.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("active-jobs poller stopped");
    }

    async fn poll_logged(&self) {
        if let Err(e) = self.poll_once().await {
            tracing::warn!(error = %e, "active-jobs poll failed");
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
