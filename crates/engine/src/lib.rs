// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-engine: services that keep local state in step with the backend.

pub mod accounts;
pub mod completion;
mod error;
pub mod jobs;
pub mod lifecycle;
pub mod logs;
pub mod poller;
mod sync;

pub use accounts::AccountList;
pub use completion::{CompletionNotifier, Debouncer, Subscription, DEFAULT_DEBOUNCE};
pub use error::{Mutation, MutationError};
pub use jobs::{CompletionRefresh, JobsService};
pub use lifecycle::{invalidations, LifecycleDispatcher};
pub use logs::LogService;
pub use poller::{ActivePoller, DEFAULT_POLL_INTERVAL};
pub use sync::{SyncClient, SyncConfig};
