// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod accounts;
pub mod jobs;
pub mod logs;
pub mod watch;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use jw_adapters::{
    ApiClient, DesktopNotifyAdapter, HttpAccountApi, HttpJobControl, LogNotifyAdapter,
    NotifyAdapter,
};

use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

/// Everything a command needs from the global flags.
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub desktop_notify: bool,
}

impl Context {
    pub fn api_client(&self) -> Result<ApiClient> {
        let endpoints = self.config.endpoints().map_err(ExitError::from)?;
        ApiClient::new(endpoints, self.config.token.clone(), self.config.http_timeout)
            .context("failed to build HTTP client")
    }

    pub fn control(&self) -> Result<HttpJobControl> {
        Ok(HttpJobControl::new(self.api_client()?))
    }

    pub fn accounts(&self) -> Result<HttpAccountApi> {
        Ok(HttpAccountApi::new(self.api_client()?))
    }

    /// Where mutation failures are surfaced.
    pub fn notifier(&self) -> Arc<dyn NotifyAdapter> {
        if self.desktop_notify {
            Arc::new(DesktopNotifyAdapter::new())
        } else {
            Arc::new(LogNotifyAdapter)
        }
    }
}
