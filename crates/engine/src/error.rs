// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine error types

use jw_adapters::AccountApiError;
use thiserror::Error;

/// Account list mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Delete,
    BulkDelete,
    Update,
}

jw_core::simple_display! {
    Mutation {
        Delete => "delete account",
        BulkDelete => "bulk delete accounts",
        Update => "update account",
    }
}

/// A mutation the server rejected. The optimistic change has already been
/// rolled back when this is returned.
#[derive(Debug, Error)]
#[error("{mutation} failed: {source}")]
pub struct MutationError {
    pub mutation: Mutation,
    #[source]
    pub source: AccountApiError,
}

impl MutationError {
    pub fn user_message(&self) -> String {
        self.source.user_message()
    }
}
