// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live automation log: persisted ring plus a broadcast of new lines.

use jw_adapters::FrameHandler;
use jw_core::LogEntry;
use jw_storage::{LogBuffer, LogStore};
use jw_wire::{decode_log_frame, DecodeError};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;

const LIVE_CHANNEL_CAPACITY: usize = 256;

/// Owns the log ring. Hydrate it before the log stream connects so stored
/// lines precede live ones.
pub struct LogService<S> {
    buffer: Arc<Mutex<LogBuffer<S>>>,
    live: broadcast::Sender<LogEntry>,
}

impl<S> Clone for LogService<S> {
    fn clone(&self) -> Self {
        Self { buffer: Arc::clone(&self.buffer), live: self.live.clone() }
    }
}

impl<S: LogStore + 'static> LogService<S> {
    /// Restore the stored buffer, or clear it when starting a fresh session.
    pub fn open(store: S, fresh: bool) -> Self {
        let buffer = if fresh {
            let mut buffer = LogBuffer::new(store);
            buffer.reset();
            tracing::info!("starting fresh log session");
            buffer
        } else {
            LogBuffer::hydrate(store)
        };
        let (live, _) = broadcast::channel(LIVE_CHANNEL_CAPACITY);
        Self { buffer: Arc::new(Mutex::new(buffer)), live }
    }

    /// Append and persist synchronously. Persistence is best effort and
    /// runs under the buffer lock so stored order matches arrival order.
    pub fn push(&self, entry: LogEntry) {
        self.buffer.lock().push(entry.clone());
        // No live subscribers is fine; the ring still has the line
        let _ = self.live.send(entry);
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer.lock().entries().iter().cloned().collect()
    }

    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        self.buffer.lock().recent(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn reset(&self) {
        self.buffer.lock().reset();
    }

    /// Lines pushed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.live.subscribe()
    }

    pub fn frame_handler(&self) -> Arc<dyn FrameHandler> {
        Arc::new(LogFrames { service: self.clone() })
    }
}

struct LogFrames<S> {
    service: LogService<S>,
}

impl<S: LogStore + 'static> FrameHandler for LogFrames<S> {
    fn handle(&self, text: &str) -> Result<(), DecodeError> {
        let entry = decode_log_frame(text)?;
        self.service.push(entry);
        Ok(())
    }
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;
