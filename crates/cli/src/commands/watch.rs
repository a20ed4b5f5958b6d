// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live job list command handler

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use jw_adapters::{ConnectionState, WsConnector};
use jw_engine::{ActivePoller, LogService, SyncClient};
use jw_storage::FileLogStore;

use super::Context;
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{print_active, print_view};

#[derive(Args)]
pub struct WatchArgs {
    /// Exit after the first update
    #[arg(long)]
    pub once: bool,
}

pub async fn handle(ctx: &Context, args: WatchArgs) -> Result<()> {
    let sync = ctx.config.sync_config().map_err(ExitError::from)?;
    let logs = LogService::open(FileLogStore::in_dir(&ctx.config.state_dir), false);
    let client = SyncClient::new(&sync, Arc::new(WsConnector), logs);

    // Fallback for when the job stream is down
    let poller = Arc::new(ActivePoller::new(ctx.control()?, ctx.config.poll_interval));
    let poll_task = tokio::spawn({
        let poller = Arc::clone(&poller);
        let state = client.job_state();
        let cache = Arc::clone(client.cache());
        async move { poller.run(state, cache).await }
    });

    let _finished = client.jobs().completions().subscribe(|job| {
        tracing::info!(job_id = %job.id, status = %job.status, account = %job.account_email, "job finished");
    });

    let mut views = client.jobs().subscribe();
    let mut state = client.job_state();
    let mut polled = poller.subscribe();
    client.connect_jobs();

    let result = loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let view = Arc::clone(&views.borrow_and_update());
                if let Err(e) = print_view(&view, ctx.format) {
                    break Err(e);
                }
                if args.once {
                    break Ok(());
                }
            }
            changed = state.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let current = *state.borrow_and_update();
                eprintln!("{}", color::muted(&format!("job stream {current}")));
            }
            changed = polled.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let active = polled.borrow_and_update().clone();
                if *state.borrow() == ConnectionState::Connected {
                    continue;
                }
                if let Some(active) = active {
                    if let Err(e) = print_active(&active, ctx.format) {
                        break Err(e);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break Ok(()),
        }
    };

    client.shutdown().await;
    poll_task.abort();
    result
}
