// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, persisted ring of automation log entries.
//!
//! The whole buffer is rewritten to durable storage after every append and
//! read back on cold start. Storage failures are logged and swallowed; the
//! in-memory buffer is authoritative.

use jw_core::LogEntry;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum entries kept in memory and on disk.
pub const LOG_CAPACITY: usize = 1000;

/// File name of the persisted buffer inside the state directory.
pub const LOG_STORE_FILE: &str = "automation_logs.json";

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for the serialized buffer.
pub trait LogStore: Send + Sync {
    /// Load stored entries, oldest first. Missing storage is an empty list.
    fn load(&self) -> Result<Vec<LogEntry>, LogStoreError>;
    fn save(&self, entries: &VecDeque<LogEntry>) -> Result<(), LogStoreError>;
    fn clear(&self) -> Result<(), LogStoreError>;
}

/// JSON array in a single file, replaced atomically on each save.
#[derive(Debug, Clone)]
pub struct FileLogStore {
    path: PathBuf,
}

impl FileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<state_dir>/automation_logs.json`.
    pub fn in_dir(state_dir: &Path) -> Self {
        Self::new(state_dir.join(LOG_STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for FileLogStore {
    fn load(&self) -> Result<Vec<LogEntry>, LogStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &VecDeque<LogEntry>) -> Result<(), LogStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), LogStoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory store holding the last serialized payload.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    payload: Mutex<Option<Vec<u8>>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of the last save, if any.
    pub fn payload(&self) -> Option<Vec<u8>> {
        self.payload.lock().clone()
    }
}

impl LogStore for MemoryLogStore {
    fn load(&self) -> Result<Vec<LogEntry>, LogStoreError> {
        match self.payload.lock().as_deref() {
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &VecDeque<LogEntry>) -> Result<(), LogStoreError> {
        *self.payload.lock() = Some(serde_json::to_vec(entries)?);
        Ok(())
    }

    fn clear(&self) -> Result<(), LogStoreError> {
        *self.payload.lock() = None;
        Ok(())
    }
}

impl<S: LogStore + ?Sized> LogStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Vec<LogEntry>, LogStoreError> {
        (**self).load()
    }

    fn save(&self, entries: &VecDeque<LogEntry>) -> Result<(), LogStoreError> {
        (**self).save(entries)
    }

    fn clear(&self) -> Result<(), LogStoreError> {
        (**self).clear()
    }
}

/// Append-only FIFO ring with write-through persistence.
pub struct LogBuffer<S> {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    store: S,
}

impl<S: LogStore> LogBuffer<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, LOG_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity, store }
    }

    /// Load the persisted buffer, keeping the newest `LOG_CAPACITY` entries.
    ///
    /// Unreadable storage yields an empty buffer.
    pub fn hydrate(store: S) -> Self {
        let mut buffer = Self::new(store);
        match buffer.store.load() {
            Ok(stored) => {
                let skip = stored.len().saturating_sub(buffer.capacity);
                buffer.entries.extend(stored.into_iter().skip(skip));
                tracing::debug!(entries = buffer.entries.len(), "hydrated log buffer");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted logs, starting empty");
            }
        }
        buffer
    }

    /// Append an entry, evicting the oldest at capacity, then persist.
    pub fn push(&mut self, entry: LogEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        if let Err(e) = self.store.save(&self.entries) {
            tracing::warn!(error = %e, "failed to persist log buffer");
        }
    }

    /// Drop all entries in memory and in storage (fresh session).
    pub fn reset(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear persisted logs");
        }
    }

    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "log_buffer_tests.rs"]
mod tests;
