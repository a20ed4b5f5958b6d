// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account command handlers

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use jw_adapters::{HttpAccountApi, NotifyAdapter};
use jw_core::{AccountId, BulkSelection};
use jw_engine::AccountList;
use jw_storage::QueryCache;
use serde_json::Value;

use super::Context;
use crate::exit_error::ExitError;
use crate::output::print_accounts;

#[derive(Args)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub command: AccountsCommand,
}

#[derive(Subcommand)]
pub enum AccountsCommand {
    /// List accounts
    List {
        /// Only accounts matching this filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete one account
    Delete {
        /// Account ID
        id: String,
    },
    /// Delete several accounts at once
    BulkDelete {
        /// Account IDs to delete
        #[arg(long, num_args = 1.., required_unless_present = "all", conflicts_with = "all")]
        ids: Vec<String>,
        /// Delete every account matching --search
        #[arg(long)]
        all: bool,
        /// Keep these accounts when using --all
        #[arg(long, num_args = 1.., requires = "all")]
        exclude: Vec<String>,
        /// Filter applied with --all
        #[arg(long, requires = "all")]
        search: Option<String>,
    },
    /// Update one field of an account
    Set {
        /// Account ID
        id: String,
        /// Field name
        field: String,
        /// New value (JSON, or a plain string)
        value: String,
    },
}

type Accounts = AccountList<HttpAccountApi, Arc<dyn NotifyAdapter>>;

pub async fn handle(ctx: &Context, args: AccountsArgs) -> Result<()> {
    let list: Accounts = AccountList::new(ctx.accounts()?, ctx.notifier(), Arc::new(QueryCache::new()));

    match args.command {
        AccountsCommand::List { search } => {
            list.load(search.as_deref()).await.map_err(|e| ExitError::failure(e.to_string()))?;
            if let Some(page) = list.page() {
                print_accounts(&page, ctx.format)?;
            }
        }
        AccountsCommand::Delete { id } => {
            let id = AccountId::new(id);
            list.delete(&id).await.map_err(|e| ExitError::failure(e.to_string()))?;
            println!("Deleted account {id}");
        }
        AccountsCommand::BulkDelete { ids, all, exclude, search } => {
            let selection = bulk_selection(ids, all, exclude, search);
            list.bulk_delete(&selection).await.map_err(|e| ExitError::failure(e.to_string()))?;
            match selection {
                BulkSelection::Ids { ids } => println!("Deleted {} account(s)", ids.len()),
                BulkSelection::AllMatching { .. } => println!("Deleted all matching accounts"),
            }
        }
        AccountsCommand::Set { id, field, value } => {
            let id = AccountId::new(id);
            list.patch(&id, &field, parse_value(&value))
                .await
                .map_err(|e| ExitError::failure(e.to_string()))?;
            println!("Updated {field} on account {id}");
        }
    }
    Ok(())
}

pub(crate) fn bulk_selection(
    ids: Vec<String>,
    all: bool,
    exclude: Vec<String>,
    search: Option<String>,
) -> BulkSelection {
    if all {
        BulkSelection::AllMatching {
            search: search.filter(|s| !s.is_empty()),
            exclude: exclude.into_iter().map(AccountId::new).collect(),
        }
    } else {
        BulkSelection::Ids { ids: ids.into_iter().map(AccountId::new).collect() }
    }
}

/// `true`, `3` and `{"a":1}` are JSON; anything else is taken as a string.
pub(crate) fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
