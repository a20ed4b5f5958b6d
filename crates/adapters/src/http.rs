// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared reqwest plumbing for the backend's REST endpoints.

use jw_wire::{Endpoints, ErrorBody};
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// Overall per-request timeout unless configured otherwise.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a request did not produce a 2xx response.
#[derive(Debug)]
pub(crate) enum Failure {
    Request(reqwest::Error),
    Status { status: u16, message: String },
}

impl From<reqwest::Error> for Failure {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

/// Authenticated client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        endpoints: Endpoints,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoints, token: token.filter(|t| !t.is_empty()) })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and reject non-2xx responses, keeping the server's message.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, Failure> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::message_from(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        tracing::debug!(status = status.as_u16(), %message, "request rejected");
        Err(Failure::Status { status: status.as_u16(), message })
    }
}
