// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! jw-adapters: sockets, REST calls and notifications.

pub mod accounts;
pub mod connection;
pub mod control;
mod http;
pub mod notify;

pub use accounts::{AccountApi, AccountApiError, HttpAccountApi};
pub use connection::{
    ConnectionConfig, ConnectionManager, ConnectionState, Connector, FrameHandler, FrameStream,
    TransportError, WsConnector, DEFAULT_RECONNECT_DELAY,
};
pub use control::{ControlError, HttpJobControl, JobControl};
pub use http::{ApiClient, DEFAULT_HTTP_TIMEOUT};
pub use notify::{DesktopNotifyAdapter, LogNotifyAdapter, NotifyAdapter, NotifyError};

#[cfg(any(test, feature = "test-support"))]
pub use accounts::{AccountCall, FakeAccountApi};
#[cfg(any(test, feature = "test-support"))]
pub use connection::{FakeConnector, FakeSocket};
#[cfg(any(test, feature = "test-support"))]
pub use control::{ControlCall, FakeJobControl};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
