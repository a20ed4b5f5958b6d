// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job control command handlers

use anyhow::Result;
use clap::Args;
use jw_adapters::{ControlError, JobControl};
use jw_core::JobId;

use super::Context;
use crate::exit_error::ExitError;
use crate::output::print_active;

#[derive(Args)]
pub struct StopArgs {
    /// Job ID
    pub id: String,
}

pub async fn stop(ctx: &Context, args: StopArgs) -> Result<()> {
    let id = JobId::new(args.id);
    ctx.control()?.stop(&id).await.map_err(rejected)?;
    println!("Stop requested for job {id}");
    Ok(())
}

pub async fn stop_all(ctx: &Context) -> Result<()> {
    ctx.control()?.stop_all().await.map_err(rejected)?;
    println!("Stop requested for all jobs");
    Ok(())
}

pub async fn active(ctx: &Context) -> Result<()> {
    let active = ctx.control()?.active().await.map_err(rejected)?;
    print_active(&active, ctx.format)
}

fn rejected(e: ControlError) -> ExitError {
    ExitError::failure(e.to_string())
}
