// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use clap::ValueEnum;
use jw_core::{AccountPage, Job, LogEntry};
use jw_storage::JobView;
use jw_wire::ActiveJobSummary;
use serde_json::json;

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One job as a table row.
pub fn job_line(job: &Job) -> String {
    let mut line = format!(
        "{:<8}  {:<9}  {:>3}%  {}  {}",
        job.id.short(8),
        color::status(job.status),
        job.progress,
        job.automation_name,
        color::muted(&job.account_email),
    );
    if let Some(error) = &job.error {
        line.push_str(&format!("  ({error})"));
    }
    line
}

pub fn log_line(entry: &LogEntry) -> String {
    let account = match &entry.account {
        Some(account) if !account.email.is_empty() => format!("[{}] ", account.email),
        Some(account) => format!("[{}] ", account.id),
        None => String::new(),
    };
    format!(
        "{}  {}  {}{}",
        color::muted(&entry.timestamp),
        color::level(entry.level),
        account,
        entry.message
    )
}

pub fn view_json(view: &JobView) -> serde_json::Value {
    let lists = view.lists();
    let mut busy: Vec<&str> = view.index().busy_accounts().map(|id| id.as_str()).collect();
    busy.sort_unstable();
    json!({
        "running": lists.running,
        "queued": lists.queued,
        "completed": lists.completed,
        "busy_accounts": busy,
    })
}

pub fn print_view(view: &JobView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let lists = view.lists();
            for (title, jobs) in
                [("Running", &lists.running), ("Queued", &lists.queued), ("Completed", &lists.completed)]
            {
                println!("{}", color::header(&format!("{title} ({})", jobs.len())));
                for job in jobs {
                    println!("  {}", job_line(job));
                }
            }
            println!("{}", color::muted(&format!("{} busy account(s)", view.index().busy_count())));
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&view_json(view))?),
    }
    Ok(())
}

pub fn print_log(entry: &LogEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", log_line(entry)),
        OutputFormat::Json => println!("{}", serde_json::to_string(entry)?),
    }
    Ok(())
}

pub fn print_active(active: &[ActiveJobSummary], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if active.is_empty() {
                println!("No active jobs");
            }
            for job in active {
                println!(
                    "{:<8}  {:<9}  {:>3}%  {}  {}",
                    job.id.short(8),
                    color::status(job.status),
                    job.progress,
                    job.automation_name,
                    color::muted(&job.account_email),
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(active)?),
    }
    Ok(())
}

pub fn print_accounts(page: &AccountPage, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for account in &page.results {
                println!("{:<8}  {}", account.id.short(8), account.email);
            }
            println!("{}", color::muted(&format!("{} account(s)", page.count)));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
