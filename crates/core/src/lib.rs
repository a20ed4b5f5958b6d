// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-core: domain types shared by the jobwatch crates

pub mod macros;

pub mod account;
pub mod event;
pub mod id;
pub mod job;
pub mod log;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use account::{Account, AccountId, AccountPage, AccountRef, BulkSelection};
pub use event::{JobEvent, LifecycleData, LifecycleEvent};
pub use id::short;
pub use job::{AutomationId, Job, JobId, JobStatus};
pub use log::{LogEntry, LogLevel};
pub use smol_str::SmolStr;
