// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jw: watch automation jobs and logs on a console backend

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::accounts::AccountsArgs;
use commands::jobs::StopArgs;
use commands::logs::LogsArgs;
use commands::watch::WatchArgs;
use commands::Context;
use config::{Config, Overrides};
use exit_error::{ExitError, EXIT_FAILURE};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "jw", version, about = "Watch automation jobs and logs", styles = color::styles())]
struct Cli {
    /// Backend base URL, e.g. https://console.example.com/api
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    /// API token
    #[arg(long, global = true)]
    token: Option<String>,
    /// Directory for persisted state (log buffer)
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,
    /// Config file (default: <config dir>/jw/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write diagnostics to a file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Show failed actions as desktop notifications
    #[arg(long, global = true)]
    desktop_notify: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Follow the job lists live
    Watch(WatchArgs),
    /// Show automation log lines
    Logs(LogsArgs),
    /// Ask the backend to stop a job
    Stop(StopArgs),
    /// Ask the backend to stop every job
    StopAll,
    /// List active jobs over REST
    Active,
    /// Manage accounts
    Accounts(AccountsArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => EXIT_FAILURE,
        };
        eprintln!("error: {e:#}");
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;

    let config = Config::resolve(Overrides {
        base_url: cli.base_url,
        token: cli.token,
        state_dir: cli.state_dir,
        config_file: cli.config,
    })
    .map_err(ExitError::from)?;
    let ctx = Context { config, format: cli.format, desktop_notify: cli.desktop_notify };

    match cli.command {
        Command::Watch(args) => commands::watch::handle(&ctx, args).await,
        Command::Logs(args) => commands::logs::handle(&ctx, args).await,
        Command::Stop(args) => commands::jobs::stop(&ctx, args).await,
        Command::StopAll => commands::jobs::stop_all(&ctx).await,
        Command::Active => commands::jobs::active(&ctx).await,
        Command::Accounts(args) => commands::accounts::handle(&ctx, args).await,
    }
}
