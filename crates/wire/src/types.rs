// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jw_core::{AccountId, JobId, JobStatus};
use serde::{Deserialize, Serialize};

/// Row of `GET /jobs/active` (polling fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveJobSummary {
    pub id: JobId,
    pub account_id: AccountId,
    #[serde(default)]
    pub account_email: String,
    #[serde(default)]
    pub automation_name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: u8,
}

/// Body of an account field patch: `{"<field>": <value>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldPatch(pub serde_json::Map<String, serde_json::Value>);

impl FieldPatch {
    pub fn single(field: &str, value: serde_json::Value) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(field.to_string(), value);
        Self(map)
    }
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "error", alias = "message")]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Best-effort extraction of a human-readable message.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
            })
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
