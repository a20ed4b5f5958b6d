// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle notifications turned into query invalidations.
//!
//! The lifecycle stream never patches local state. Each event marks the
//! affected queries stale and whoever holds them refetches.

use jw_adapters::FrameHandler;
use jw_core::LifecycleEvent;
use jw_storage::{QueryCache, QueryKey};
use jw_wire::{decode_lifecycle_frame, DecodeError};
use std::sync::Arc;

/// Queries made stale by one lifecycle event, in invalidation order.
pub fn invalidations(event: &LifecycleEvent) -> Vec<QueryKey> {
    match event {
        LifecycleEvent::JobQueued { .. } => vec![QueryKey::Jobs, QueryKey::ActiveJobs],
        LifecycleEvent::JobStarted { data } => {
            let mut keys = vec![QueryKey::Jobs, QueryKey::ActiveJobs];
            keys.extend(data.job_id.clone().map(QueryKey::Job));
            keys
        }
        LifecycleEvent::JobCompleted { data } => {
            let mut keys = vec![QueryKey::Jobs, QueryKey::ActiveJobs];
            keys.extend(data.job_id.clone().map(QueryKey::Job));
            keys.push(QueryKey::Accounts);
            keys
        }
        LifecycleEvent::AccountUpdate { .. } => vec![QueryKey::Accounts],
        LifecycleEvent::Unknown => Vec::new(),
    }
}

/// Frame handler for the lifecycle stream.
pub struct LifecycleDispatcher {
    cache: Arc<QueryCache>,
}

impl LifecycleDispatcher {
    pub fn new(cache: Arc<QueryCache>) -> Self {
        Self { cache }
    }

    pub fn dispatch(&self, event: &LifecycleEvent) {
        for key in invalidations(event) {
            self.cache.invalidate(key);
        }
    }
}

impl FrameHandler for LifecycleDispatcher {
    fn handle(&self, text: &str) -> Result<(), DecodeError> {
        let event = decode_lifecycle_frame(text)?;
        if event == LifecycleEvent::Unknown {
            tracing::debug!("ignoring unknown lifecycle event");
        }
        self.dispatch(&event);
        Ok(())
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
