// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervised push-stream connections.
//!
//! A [`ConnectionManager`] owns at most one live socket per stream. It
//! reconnects on a fixed interval until shut down and hands every text frame
//! to a [`FrameHandler`]. Frames that fail to decode are logged and dropped;
//! they never close the connection.

mod ws;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;

pub use ws::WsConnector;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeConnector, FakeSocket};

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use jw_wire::DecodeError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay between the end of one connection attempt and the next.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Errors from the transport layer
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] Box<tokio_tungstenite::tungstenite::Error>),
    #[error("connection refused: {0}")]
    Refused(String),
    #[error("stream error: {0}")]
    Stream(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for TransportError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(e))
    }
}

/// Text frames of one open socket. The stream ends when the peer closes.
pub type FrameStream = BoxStream<'static, Result<String, TransportError>>;

/// Opens sockets.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, url: &str) -> Result<FrameStream, TransportError>;
}

/// Consumer of decoded-or-not text frames.
pub trait FrameHandler: Send + Sync + 'static {
    fn handle(&self, text: &str) -> Result<(), DecodeError>;
}

impl<F> FrameHandler for F
where
    F: Fn(&str) -> Result<(), DecodeError> + Send + Sync + 'static,
{
    fn handle(&self, text: &str) -> Result<(), DecodeError> {
        self(text)
    }
}

/// Observable state of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

jw_core::simple_display! {
    ConnectionState {
        Disconnected => "disconnected",
        Connecting => "connecting",
        Connected => "connected",
    }
}

/// Static settings of one supervised stream.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Name used in log lines (`jobs`, `lifecycle`, `logs`).
    pub label: &'static str,
    pub url: String,
    pub reconnect_delay: Duration,
}

impl ConnectionConfig {
    pub fn new(label: &'static str, url: impl Into<String>) -> Self {
        Self { label, url: url.into(), reconnect_delay: DEFAULT_RECONNECT_DELAY }
    }

    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

struct Shared {
    connector: Arc<dyn Connector>,
    handler: Arc<dyn FrameHandler>,
    config: ConnectionConfig,
    state: watch::Sender<ConnectionState>,
    attempts: AtomicU64,
}

impl Shared {
    fn set_state(&self, next: ConnectionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

struct Supervisor {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Keeps one stream connected until shut down.
pub struct ConnectionManager {
    shared: Arc<Shared>,
    supervisor: Mutex<Option<Supervisor>>,
    closed: AtomicBool,
}

impl ConnectionManager {
    pub fn new(
        connector: Arc<dyn Connector>,
        handler: Arc<dyn FrameHandler>,
        config: ConnectionConfig,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            shared: Arc::new(Shared {
                connector,
                handler,
                config,
                state,
                attempts: AtomicU64::new(0),
            }),
            supervisor: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Start the supervisor task. Calling this while a supervisor is alive
    /// is a no-op, so the stream never has two sockets open.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self) {
        if self.closed.load(Ordering::SeqCst) {
            tracing::debug!(stream = self.shared.config.label, "connect after shutdown ignored");
            return;
        }
        let mut supervisor = self.supervisor.lock();
        if supervisor.as_ref().is_some_and(|s| !s.handle.is_finished()) {
            return;
        }
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(supervise(Arc::clone(&self.shared), shutdown_rx));
        *supervisor = Some(Supervisor { shutdown, handle });
    }

    /// Close the socket and stop reconnecting. Further `connect` calls are
    /// ignored.
    pub async fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let supervisor = self.supervisor.lock().take();
        if let Some(Supervisor { shutdown, handle }) = supervisor {
            let _ = shutdown.send(true);
            if let Err(e) = handle.await {
                tracing::warn!(stream = self.shared.config.label, error = %e, "supervisor task failed");
            }
        }
        self.shared.set_state(ConnectionState::Disconnected);
    }

    pub fn state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    /// Number of connection attempts made so far.
    pub fn attempts(&self) -> u64 {
        self.shared.attempts.load(Ordering::SeqCst)
    }

    pub fn label(&self) -> &'static str {
        self.shared.config.label
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        if let Some(supervisor) = self.supervisor.get_mut().take() {
            let _ = supervisor.shutdown.send(true);
        }
    }
}

async fn supervise(shared: Arc<Shared>, mut shutdown: watch::Receiver<bool>) {
    let label = shared.config.label;
    loop {
        shared.set_state(ConnectionState::Connecting);
        shared.attempts.fetch_add(1, Ordering::SeqCst);

        let opened = tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => break,
            opened = shared.connector.connect(&shared.config.url) => opened,
        };

        match opened {
            Ok(frames) => {
                tracing::info!(stream = label, "connected");
                shared.set_state(ConnectionState::Connected);
                if pump(&shared, frames, &mut shutdown).await.is_break() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(stream = label, error = %e, "connect failed");
            }
        }

        shared.set_state(ConnectionState::Disconnected);
        tracing::debug!(
            stream = label,
            delay_ms = shared.config.reconnect_delay.as_millis() as u64,
            "reconnecting"
        );
        tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => break,
            _ = tokio::time::sleep(shared.config.reconnect_delay) => {}
        }
    }
    shared.set_state(ConnectionState::Disconnected);
    tracing::debug!(stream = label, "supervisor stopped");
}

/// Drain one socket. Breaks when shutdown is requested, continues when the
/// socket ended and a reconnect is due.
async fn pump(
    shared: &Shared,
    mut frames: FrameStream,
    shutdown: &mut watch::Receiver<bool>,
) -> std::ops::ControlFlow<()> {
    let label = shared.config.label;
    loop {
        tokio::select! {
            biased;
            _ = shutdown.wait_for(|stop| *stop) => return std::ops::ControlFlow::Break(()),
            frame = frames.next() => match frame {
                Some(Ok(text)) => {
                    if let Err(e) = shared.handler.handle(&text) {
                        tracing::warn!(stream = label, error = %e, "dropping undecodable frame");
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(stream = label, error = %e, "connection error");
                    return std::ops::ControlFlow::Continue(());
                }
                None => {
                    tracing::info!(stream = label, "connection closed");
                    return std::ops::ControlFlow::Continue(());
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
