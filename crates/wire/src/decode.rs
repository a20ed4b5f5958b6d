// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validating frame decoders.

use jw_core::{JobEvent, LifecycleEvent, LogEntry};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A frame that could not be turned into a typed event.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty frame")]
    Empty,
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode one text frame into `T`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

pub fn decode_job_frame(text: &str) -> Result<JobEvent, DecodeError> {
    decode(text)
}

pub fn decode_lifecycle_frame(text: &str) -> Result<LifecycleEvent, DecodeError> {
    decode(text)
}

/// Log frames carry exactly one entry each.
pub fn decode_log_frame(text: &str) -> Result<LogEntry, DecodeError> {
    decode(text)
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
