// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Query cache slots, invalidation bus, and optimistic transactions.
//!
//! A [`CacheSlot`] holds the last fetched value for one query. Fetches carry
//! a [`FetchTicket`]; bumping the slot generation (cancel, optimistic write,
//! rollback) makes every outstanding ticket stale so a late response can
//! never overwrite newer local state. [`QueryCache`] broadcasts invalidated
//! keys to whoever refetches them.

use jw_core::JobId;
use parking_lot::Mutex;
use std::fmt;
use tokio::sync::broadcast;

/// Named queries that can be invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Jobs,
    ActiveJobs,
    Job(JobId),
    Accounts,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Jobs => f.write_str("jobs"),
            QueryKey::ActiveJobs => f.write_str("active-jobs"),
            QueryKey::Job(id) => write!(f, "job:{id}"),
            QueryKey::Accounts => f.write_str("accounts"),
        }
    }
}

const INVALIDATION_CHANNEL_CAPACITY: usize = 256;

/// Invalidation bus shared by every refetcher.
#[derive(Debug)]
pub struct QueryCache {
    tx: broadcast::Sender<QueryKey>,
}

impl QueryCache {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(INVALIDATION_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Mark a query stale; subscribed refetchers reload it.
    pub fn invalidate(&self, key: QueryKey) {
        tracing::debug!(%key, "query invalidated");
        // No subscribers just means nothing is mounted for this key
        let _ = self.tx.send(key);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QueryKey> {
        self.tx.subscribe()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a fetch was started at a given slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug)]
struct SlotInner<T> {
    value: Option<T>,
    generation: u64,
}

/// Cached value of one query.
#[derive(Debug)]
pub struct CacheSlot<T> {
    inner: Mutex<SlotInner<T>>,
}

impl<T: Clone> CacheSlot<T> {
    pub fn new() -> Self {
        Self { inner: Mutex::new(SlotInner { value: None, generation: 0 }) }
    }

    pub fn with_value(value: T) -> Self {
        Self { inner: Mutex::new(SlotInner { value: Some(value), generation: 0 }) }
    }

    pub fn get(&self) -> Option<T> {
        self.inner.lock().value.clone()
    }

    /// Replace the value and invalidate outstanding fetches.
    pub fn set(&self, value: Option<T>) {
        let mut inner = self.inner.lock();
        inner.value = value;
        inner.generation += 1;
    }

    pub fn begin_fetch(&self) -> FetchTicket {
        FetchTicket { generation: self.inner.lock().generation }
    }

    /// Store a fetch result unless the ticket went stale. Returns whether the
    /// value was stored.
    pub fn complete_fetch(&self, ticket: FetchTicket, value: T) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != ticket.generation {
            return false;
        }
        inner.value = Some(value);
        true
    }

    /// Make every outstanding fetch stale without touching the value.
    pub fn cancel_fetches(&self) {
        self.inner.lock().generation += 1;
    }

    /// Patch the value in place if present. Returns whether a value existed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut inner = self.inner.lock();
        match inner.value.as_mut() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Three-phase optimistic mutation over one cache slot.
///
/// `begin` cancels in-flight fetches and snapshots the slot, `apply` patches
/// it, and [`confirm`](Optimistic::confirm) or
/// [`rollback`](Optimistic::rollback) settles it. Settling always
/// invalidates the key so a refetch reconciles server-computed fields.
/// Dropping an unsettled transaction rolls back.
#[must_use = "an optimistic transaction must be confirmed or rolled back"]
pub struct Optimistic<'a, T: Clone> {
    slot: &'a CacheSlot<T>,
    cache: &'a QueryCache,
    key: QueryKey,
    snapshot: Option<T>,
    settled: bool,
}

impl<'a, T: Clone> Optimistic<'a, T> {
    pub fn begin(slot: &'a CacheSlot<T>, cache: &'a QueryCache, key: QueryKey) -> Self {
        slot.cancel_fetches();
        let snapshot = slot.get();
        Self { slot, cache, key, snapshot, settled: false }
    }

    pub fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    /// Apply the optimistic patch. A no-op when nothing is cached yet.
    pub fn apply(&self, f: impl FnOnce(&mut T)) {
        self.slot.update(f);
    }

    /// The server accepted the mutation.
    pub fn confirm(mut self) {
        self.settle();
    }

    /// The server rejected the mutation: restore the exact snapshot.
    pub fn rollback(mut self) {
        self.restore();
        self.settle();
    }

    fn restore(&mut self) {
        self.slot.set(self.snapshot.take());
    }

    fn settle(&mut self) {
        self.settled = true;
        self.cache.invalidate(self.key.clone());
    }
}

impl<T: Clone> Drop for Optimistic<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!(key = %self.key, "optimistic update dropped unsettled, rolling back");
            self.restore();
            self.settle();
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
