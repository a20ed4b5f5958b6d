// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend wire contract.
//!
//! Stream frames are single JSON objects; HTTP bodies are plain JSON.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod decode;
mod endpoint;
mod types;

pub use decode::{decode, decode_job_frame, decode_lifecycle_frame, decode_log_frame, DecodeError};
pub use endpoint::{EndpointError, Endpoints, JOB_STREAM_PATH, LIFECYCLE_STREAM_PATH, LOG_STREAM_PATH};
pub use types::{ActiveJobSummary, ErrorBody, FieldPatch};
