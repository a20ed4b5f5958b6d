// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of the three push streams to their services.

use crate::completion::DEFAULT_DEBOUNCE;
use crate::jobs::{CompletionRefresh, JobsService};
use crate::lifecycle::LifecycleDispatcher;
use crate::logs::LogService;
use jw_adapters::{
    ConnectionConfig, ConnectionManager, ConnectionState, Connector, FrameHandler,
    DEFAULT_RECONNECT_DELAY,
};
use jw_storage::{LogStore, QueryCache};
use jw_wire::Endpoints;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Settings shared by every stream.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub endpoints: Endpoints,
    pub token: Option<String>,
    pub reconnect_delay: Duration,
    pub debounce: Duration,
}

impl SyncConfig {
    pub fn new(endpoints: Endpoints, token: Option<String>) -> Self {
        Self {
            endpoints,
            token,
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Job, lifecycle and log streams bound to their services.
///
/// The job stream and the lifecycle stream run side by side: one patches the
/// local lists, the other invalidates queries. Both are idempotent.
pub struct SyncClient<S> {
    jobs: JobsService,
    cache: Arc<QueryCache>,
    logs: LogService<S>,
    job_stream: ConnectionManager,
    lifecycle_stream: ConnectionManager,
    log_stream: ConnectionManager,
    _refresh: CompletionRefresh,
}

impl<S: LogStore + 'static> SyncClient<S> {
    /// `logs` should already be hydrated (see [`LogService::open`]).
    pub fn new(config: &SyncConfig, connector: Arc<dyn Connector>, logs: LogService<S>) -> Self {
        let jobs = JobsService::new();
        let cache = Arc::new(QueryCache::new());
        let token = config.token.as_deref();
        let stream = |label: &'static str, url: String, handler: Arc<dyn FrameHandler>| {
            ConnectionManager::new(
                Arc::clone(&connector),
                handler,
                ConnectionConfig::new(label, url).reconnect_delay(config.reconnect_delay),
            )
        };

        let endpoints = &config.endpoints;
        let job_stream = stream("jobs", endpoints.job_stream().to_string(), jobs.frame_handler());
        let lifecycle_stream = stream(
            "lifecycle",
            endpoints.lifecycle_stream(token).to_string(),
            Arc::new(LifecycleDispatcher::new(Arc::clone(&cache))),
        );
        let log_stream =
            stream("logs", endpoints.log_stream(token).to_string(), logs.frame_handler());
        let refresh = jobs.on_completion_refresh_accounts(Arc::clone(&cache), config.debounce);

        Self { jobs, cache, logs, job_stream, lifecycle_stream, log_stream, _refresh: refresh }
    }

    /// Connect the job and lifecycle streams.
    pub fn connect_jobs(&self) {
        self.job_stream.connect();
        self.lifecycle_stream.connect();
    }

    pub fn connect_logs(&self) {
        self.log_stream.connect();
    }

    pub fn connect_all(&self) {
        self.connect_jobs();
        self.connect_logs();
    }

    pub async fn shutdown(&self) {
        self.job_stream.shutdown().await;
        self.lifecycle_stream.shutdown().await;
        self.log_stream.shutdown().await;
        tracing::info!("sync streams closed");
    }

    pub fn jobs(&self) -> &JobsService {
        &self.jobs
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn logs(&self) -> &LogService<S> {
        &self.logs
    }

    pub fn job_state(&self) -> watch::Receiver<ConnectionState> {
        self.job_stream.subscribe_state()
    }

    pub fn log_state(&self) -> watch::Receiver<ConnectionState> {
        self.log_stream.subscribe_state()
    }

    /// Connection attempts per stream: jobs, lifecycle, logs.
    pub fn attempts(&self) -> [u64; 3] {
        [self.job_stream.attempts(), self.lifecycle_stream.attempts(), self.log_stream.attempts()]
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
