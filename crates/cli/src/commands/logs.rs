// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation log command handler

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use jw_adapters::WsConnector;
use jw_engine::{LogService, SyncClient};
use jw_storage::FileLogStore;
use tokio::sync::broadcast::error::RecvError;

use super::Context;
use crate::exit_error::ExitError;
use crate::output::print_log;

#[derive(Args)]
pub struct LogsArgs {
    /// Clear stored lines and start a new session
    #[arg(long)]
    pub fresh: bool,
    /// Number of recent lines to show (default: 50)
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
    /// Stream live activity (like tail -f)
    #[arg(long, short = 'f')]
    pub follow: bool,
}

pub async fn handle(ctx: &Context, args: LogsArgs) -> Result<()> {
    let store = FileLogStore::in_dir(&ctx.config.state_dir);
    tracing::debug!(path = %store.path().display(), "opening log store");
    let logs = LogService::open(store, args.fresh);

    for entry in logs.recent(args.limit) {
        print_log(&entry, ctx.format)?;
    }
    if !args.follow {
        return Ok(());
    }

    let sync = ctx.config.sync_config().map_err(ExitError::from)?;
    let mut live = logs.subscribe();
    let client = SyncClient::new(&sync, Arc::new(WsConnector), logs);
    client.connect_logs();

    loop {
        tokio::select! {
            entry = live.recv() => match entry {
                Ok(entry) => print_log(&entry, ctx.format)?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "log output fell behind");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    client.shutdown().await;
    Ok(())
}
