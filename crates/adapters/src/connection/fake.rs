// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{Connector, FrameStream, TransportError};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

type FrameTx = mpsc::UnboundedSender<Result<String, TransportError>>;
type FrameRx = mpsc::UnboundedReceiver<Result<String, TransportError>>;

enum Outcome {
    Refuse,
    Accept(FrameRx),
}

#[derive(Default)]
struct FakeConnectorState {
    script: VecDeque<Outcome>,
    attempts: Vec<(Instant, String)>,
}

/// Scripted connector. Attempts with nothing scripted are refused.
#[derive(Clone, Default)]
pub struct FakeConnector {
    inner: Arc<Mutex<FakeConnectorState>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the next scripted attempt.
    pub fn refuse_next(&self) {
        self.inner.lock().script.push_back(Outcome::Refuse);
    }

    /// Accept the next scripted attempt and return the server side of it.
    pub fn accept_next(&self) -> FakeSocket {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().script.push_back(Outcome::Accept(rx));
        FakeSocket { tx: Some(tx) }
    }

    /// Times at which attempts were made.
    pub fn attempt_times(&self) -> Vec<Instant> {
        self.inner.lock().attempts.iter().map(|(at, _)| *at).collect()
    }

    pub fn attempt_count(&self) -> usize {
        self.inner.lock().attempts.len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.inner.lock().attempts.iter().map(|(_, url)| url.clone()).collect()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, url: &str) -> Result<FrameStream, TransportError> {
        let outcome = {
            let mut inner = self.inner.lock();
            inner.attempts.push((Instant::now(), url.to_string()));
            inner.script.pop_front().unwrap_or(Outcome::Refuse)
        };
        match outcome {
            Outcome::Refuse => Err(TransportError::Refused(url.to_string())),
            Outcome::Accept(rx) => Ok(stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|item| (item, rx))
            })
            .boxed()),
        }
    }
}

/// Server half of an accepted fake socket.
pub struct FakeSocket {
    tx: Option<FrameTx>,
}

impl FakeSocket {
    /// Push a text frame. Returns false once the client side is gone.
    pub fn send(&self, text: impl Into<String>) -> bool {
        self.tx.as_ref().is_some_and(|tx| tx.send(Ok(text.into())).is_ok())
    }

    /// Fail the socket with a transport error.
    pub fn fail(&self, message: &str) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Err(TransportError::Stream(message.to_string())));
        }
    }

    /// Close from the server side.
    pub fn close(&mut self) {
        self.tx = None;
    }

    /// Whether the client still holds the socket open.
    pub fn is_open(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}
