// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion fan-out and the debounce used by its subscribers.

use jw_core::Job;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Quiet period before a debounced refresh fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

type Callback = Arc<dyn Fn(&Job) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_token: u64,
    callbacks: BTreeMap<u64, Callback>,
}

/// Registry of callbacks run when a job completes or fails.
#[derive(Clone, Default)]
pub struct CompletionNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl CompletionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&Job) + Send + Sync + 'static) -> Subscription {
        let mut registry = self.registry.lock();
        let token = registry.next_token;
        registry.next_token += 1;
        registry.callbacks.insert(token, Arc::new(callback));
        Subscription { token, registry: Arc::downgrade(&self.registry) }
    }

    /// Run every callback with `job`, in subscription order.
    ///
    /// The registry lock is released first, so callbacks may subscribe or
    /// unsubscribe.
    pub fn notify(&self, job: &Job) {
        let callbacks: Vec<Callback> = self.registry.lock().callbacks.values().cloned().collect();
        tracing::debug!(job_id = %job.id, subscribers = callbacks.len(), "job finished");
        for callback in callbacks {
            callback(job);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().callbacks.len()
    }
}

/// Handle returned by [`CompletionNotifier::subscribe`].
#[must_use = "dropping a subscription unsubscribes it"]
pub struct Subscription {
    token: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().callbacks.remove(&self.token);
        }
    }
}

/// Runs an action once triggers have stopped for the quiet period.
///
/// Each trigger cancels the pending run and arms a new one. Triggers must
/// come from within a tokio runtime.
pub struct Debouncer {
    quiet: Duration,
    action: Arc<dyn Fn() + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self { quiet, action: Arc::new(action), pending: Mutex::new(None) }
    }

    pub fn trigger(&self) {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let action = Arc::clone(&self.action);
        let quiet = self.quiet;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action();
        }));
    }

    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.lock().as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
