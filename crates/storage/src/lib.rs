// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw-storage: client-side projections of server state.

pub mod cache;
pub mod log_buffer;
mod state;
mod store;

pub use cache::{CacheSlot, FetchTicket, Optimistic, QueryCache, QueryKey};
pub use log_buffer::{
    FileLogStore, LogBuffer, LogStore, LogStoreError, MemoryLogStore, LOG_CAPACITY, LOG_STORE_FILE,
};
pub use state::{Applied, JobIndex, JobLists, JobView, COMPLETED_CAP};
pub use store::JobStore;
