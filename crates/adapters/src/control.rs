// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job control requests: stop one, stop all, list active.
//!
//! Stopping is never applied locally. The job leaves the running list only
//! when the server pushes `job_cancelled` or `job_stopped`.

use crate::http::{ApiClient, Failure};
use async_trait::async_trait;
use jw_core::JobId;
use jw_wire::ActiveJobSummary;
use reqwest::Method;
use thiserror::Error;

/// Errors from job control requests
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl From<Failure> for ControlError {
    fn from(f: Failure) -> Self {
        match f {
            Failure::Request(e) => Self::Http(e),
            Failure::Status { status, message } => Self::Status { status, message },
        }
    }
}

/// Adapter for the job control endpoints
#[async_trait]
pub trait JobControl: Send + Sync + 'static {
    async fn stop(&self, job_id: &JobId) -> Result<(), ControlError>;
    async fn stop_all(&self) -> Result<(), ControlError>;
    async fn active(&self) -> Result<Vec<ActiveJobSummary>, ControlError>;
}

#[derive(Debug, Clone)]
pub struct HttpJobControl {
    client: ApiClient,
}

impl HttpJobControl {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobControl for HttpJobControl {
    async fn stop(&self, job_id: &JobId) -> Result<(), ControlError> {
        let url = self.client.endpoints().stop_job(job_id);
        tracing::info!(job_id = %job_id, "requesting stop");
        self.client.send(self.client.request(Method::POST, url)).await?;
        Ok(())
    }

    async fn stop_all(&self) -> Result<(), ControlError> {
        let url = self.client.endpoints().stop_all();
        tracing::info!("requesting stop of all jobs");
        self.client.send(self.client.request(Method::POST, url)).await?;
        Ok(())
    }

    async fn active(&self) -> Result<Vec<ActiveJobSummary>, ControlError> {
        let url = self.client.endpoints().active_jobs();
        let response = self.client.send(self.client.request(Method::GET, url)).await?;
        Ok(response.json().await?)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ControlError, JobControl};
    use async_trait::async_trait;
    use jw_core::JobId;
    use jw_wire::ActiveJobSummary;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded control request
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ControlCall {
        Stop(JobId),
        StopAll,
        Active,
    }

    #[derive(Default)]
    struct FakeControlState {
        calls: Vec<ControlCall>,
        active: Vec<ActiveJobSummary>,
        reject: Option<(u16, String)>,
    }

    /// Fake job control adapter for testing
    #[derive(Clone, Default)]
    pub struct FakeJobControl {
        inner: Arc<Mutex<FakeControlState>>,
    }

    impl FakeJobControl {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_active(&self, active: Vec<ActiveJobSummary>) {
            self.inner.lock().active = active;
        }

        /// Reject every following request with this status.
        pub fn reject_with(&self, status: u16, message: &str) {
            self.inner.lock().reject = Some((status, message.to_string()));
        }

        pub fn calls(&self) -> Vec<ControlCall> {
            self.inner.lock().calls.clone()
        }

        fn record(&self, call: ControlCall) -> Result<(), ControlError> {
            let mut inner = self.inner.lock();
            inner.calls.push(call);
            match &inner.reject {
                Some((status, message)) => {
                    Err(ControlError::Status { status: *status, message: message.clone() })
                }
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl JobControl for FakeJobControl {
        async fn stop(&self, job_id: &JobId) -> Result<(), ControlError> {
            self.record(ControlCall::Stop(job_id.clone()))
        }

        async fn stop_all(&self) -> Result<(), ControlError> {
            self.record(ControlCall::StopAll)
        }

        async fn active(&self) -> Result<Vec<ActiveJobSummary>, ControlError> {
            self.record(ControlCall::Active)?;
            Ok(self.inner.lock().active.clone())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ControlCall, FakeJobControl};

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
