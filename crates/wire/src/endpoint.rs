// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Endpoint derivation from the configured backend base URL.
//!
//! HTTP endpoints and the job stream live under the base path (for example
//! `https://host/api`). The token-authenticated `/ws/*` streams are rooted at
//! the host.

use jw_core::{AccountId, JobId};
use thiserror::Error;
use url::Url;

pub const JOB_STREAM_PATH: &str = "/jobs/ws";
pub const LIFECYCLE_STREAM_PATH: &str = "/ws/jobs/";
pub const LOG_STREAM_PATH: &str = "/ws/logs/";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("invalid base url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("unsupported scheme `{0}` (expected http, https, ws or wss)")]
    Scheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    http: Url,
    stream: Url,
}

impl Endpoints {
    /// Parse a base URL. Either an HTTP or a WebSocket scheme is accepted;
    /// the other flavour is derived by swapping `http↔ws` / `https↔wss`.
    pub fn parse(base: &str) -> Result<Self, EndpointError> {
        let mut parsed = Url::parse(base.trim())?;
        parsed.set_query(None);
        parsed.set_fragment(None);

        let (http_scheme, stream_scheme) = match parsed.scheme() {
            "http" | "ws" => ("http", "ws"),
            "https" | "wss" => ("https", "wss"),
            other => return Err(EndpointError::Scheme(other.to_string())),
        };

        let mut http = parsed.clone();
        let mut stream = parsed;
        http.set_scheme(http_scheme).map_err(|_| EndpointError::Scheme(http_scheme.into()))?;
        stream
            .set_scheme(stream_scheme)
            .map_err(|_| EndpointError::Scheme(stream_scheme.into()))?;

        Ok(Self { http, stream })
    }

    pub fn base(&self) -> &Url {
        &self.http
    }

    pub fn job_stream(&self) -> Url {
        under_base(&self.stream, JOB_STREAM_PATH)
    }

    pub fn lifecycle_stream(&self, token: Option<&str>) -> Url {
        with_token(at_root(&self.stream, LIFECYCLE_STREAM_PATH), token)
    }

    pub fn log_stream(&self, token: Option<&str>) -> Url {
        with_token(at_root(&self.stream, LOG_STREAM_PATH), token)
    }

    pub fn stop_job(&self, id: &JobId) -> Url {
        under_base(&self.http, &format!("/jobs/{}/stop", encode_segment(id.as_str())))
    }

    pub fn stop_all(&self) -> Url {
        under_base(&self.http, "/jobs/stop-all")
    }

    pub fn active_jobs(&self) -> Url {
        under_base(&self.http, "/jobs/active")
    }

    pub fn accounts(&self, search: Option<&str>) -> Url {
        let mut url = under_base(&self.http, "/accounts/");
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("search", search);
        }
        url
    }

    pub fn account(&self, id: &AccountId) -> Url {
        under_base(&self.http, &format!("/accounts/{}/", encode_segment(id.as_str())))
    }

    pub fn bulk_delete_accounts(&self) -> Url {
        under_base(&self.http, "/accounts/bulk-delete/")
    }
}

fn under_base(base: &Url, suffix: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}{suffix}"));
    url
}

fn at_root(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url
}

fn with_token(mut url: Url, token: Option<&str>) -> Url {
    if let Some(token) = token {
        url.query_pairs_mut().append_pair("token", token);
    }
    url
}

/// Keep ids from escaping their path segment.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
