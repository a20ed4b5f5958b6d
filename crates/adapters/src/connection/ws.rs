// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket connector over tokio-tungstenite.

use super::{Connector, FrameStream, TransportError};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use url::Url;

/// Opens `ws://` and `wss://` sockets.
#[derive(Clone, Copy, Debug, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<FrameStream, TransportError> {
        let (socket, response) = tokio_tungstenite::connect_async(url).await?;
        tracing::debug!(url = %redacted(url), status = %response.status(), "websocket handshake complete");

        // Ping/pong is answered by tungstenite while reading; only payload
        // frames surface here.
        let frames = stream::unfold(socket, |mut socket| async move {
            loop {
                match socket.next().await? {
                    Ok(Message::Text(text)) => return Some((Ok(text.as_str().to_owned()), socket)),
                    Ok(Message::Binary(bytes)) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => return Some((Ok(text), socket)),
                        Err(_) => tracing::debug!("ignoring non-utf8 binary frame"),
                    },
                    Ok(Message::Close(frame)) => {
                        tracing::debug!(?frame, "received close frame");
                        return None;
                    }
                    Ok(_) => {}
                    Err(e) => return Some((Err(TransportError::from(e)), socket)),
                }
            }
        });
        Ok(frames.boxed())
    }
}

/// `url` without its query string, which carries the access token.
fn redacted(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.to_string()
        }
        Err(_) => "<unparseable url>".to_string(),
    }
}

#[cfg(test)]
#[path = "ws_tests.rs"]
mod tests;
