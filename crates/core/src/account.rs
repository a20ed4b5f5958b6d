// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webmail accounts managed by the console.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

crate::define_id! {
    /// Server-assigned account identifier.
    pub struct AccountId;
}

/// Lightweight account reference carried by logs and jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: AccountId,
    #[serde(default)]
    pub email: String,
}

/// One row of the account list.
///
/// Only `id` and `email` are interpreted; every other server field is kept
/// verbatim (in server order) so optimistic patches and rollbacks never lose
/// data the client does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, email: impl Into<String>) -> Self {
        Self { id: id.into(), email: email.into(), fields: Map::new() }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field locally. `email` updates the typed field.
    pub fn set_field(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("email", Value::String(email)) => self.email = email,
            (_, value) => {
                self.fields.insert(name.to_string(), value);
            }
        }
    }
}

/// A page of accounts as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPage {
    #[serde(default, alias = "accounts")]
    pub results: Vec<Account>,
    #[serde(default, alias = "total")]
    pub count: u64,
}

impl AccountPage {
    pub fn contains(&self, id: &AccountId) -> bool {
        self.results.iter().any(|a| &a.id == id)
    }
}

/// Target set of a bulk account operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BulkSelection {
    /// An explicit list of ids.
    Ids { ids: Vec<AccountId> },
    /// Everything matching the current filter, minus explicit exclusions.
    AllMatching {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        search: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        exclude: Vec<AccountId>,
    },
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;
