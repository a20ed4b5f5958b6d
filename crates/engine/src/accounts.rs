// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account list with optimistic mutations.
//!
//! Every mutation patches the cached page first, sends the request, then
//! confirms or rolls back to the exact prior page. Either way the
//! `Accounts` query is invalidated so the next refetch reconciles fields the
//! server computes.

use crate::error::{Mutation, MutationError};
use jw_adapters::{AccountApi, AccountApiError, NotifyAdapter};
use jw_core::{Account, AccountId, AccountPage, BulkSelection};
use jw_storage::{CacheSlot, Optimistic, QueryCache, QueryKey};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

pub struct AccountList<A, N> {
    api: A,
    notify: N,
    cache: Arc<QueryCache>,
    page: CacheSlot<AccountPage>,
    search: Mutex<Option<String>>,
}

impl<A: AccountApi, N: NotifyAdapter> AccountList<A, N> {
    pub fn new(api: A, notify: N, cache: Arc<QueryCache>) -> Self {
        Self { api, notify, cache, page: CacheSlot::new(), search: Mutex::new(None) }
    }

    pub fn page(&self) -> Option<AccountPage> {
        self.page.get()
    }

    pub fn search(&self) -> Option<String> {
        self.search.lock().clone()
    }

    /// Switch the filter and fetch the matching page.
    pub async fn load(&self, search: Option<&str>) -> Result<bool, AccountApiError> {
        *self.search.lock() = search.filter(|s| !s.is_empty()).map(str::to_string);
        self.refresh().await
    }

    /// Refetch the current page. Returns false when a mutation started in
    /// the meantime and the response was discarded.
    pub async fn refresh(&self) -> Result<bool, AccountApiError> {
        let search = self.search();
        let ticket = self.page.begin_fetch();
        let page = self.api.list(search.as_deref()).await?;
        let stored = self.page.complete_fetch(ticket, page);
        if !stored {
            tracing::debug!("discarding stale account page");
        }
        Ok(stored)
    }

    pub async fn delete(&self, id: &AccountId) -> Result<(), MutationError> {
        let txn = self.begin();
        txn.apply(|page| remove_where(page, |a| &a.id == id));
        let result = self.api.delete(id).await;
        self.settle(Mutation::Delete, txn, result).await
    }

    /// Bulk delete. For an all-matching selection the optimistic page keeps
    /// only the explicitly excluded rows; the refetch corrects the rest.
    pub async fn bulk_delete(&self, selection: &BulkSelection) -> Result<(), MutationError> {
        let txn = self.begin();
        match selection {
            BulkSelection::Ids { ids } => txn.apply(|page| remove_where(page, |a| ids.contains(&a.id))),
            BulkSelection::AllMatching { exclude, .. } => {
                txn.apply(|page| remove_where(page, |a| !exclude.contains(&a.id)))
            }
        }
        let result = self.api.bulk_delete(selection).await;
        self.settle(Mutation::BulkDelete, txn, result).await
    }

    pub async fn patch(&self, id: &AccountId, field: &str, value: Value) -> Result<(), MutationError> {
        let txn = self.begin();
        txn.apply(|page| {
            if let Some(account) = page.results.iter_mut().find(|a| &a.id == id) {
                account.set_field(field, value.clone());
            }
        });
        let result = self.api.patch(id, field, value).await;
        self.settle(Mutation::Update, txn, result).await
    }

    /// Refetch whenever `Accounts` is invalidated. Runs until the cache is
    /// dropped.
    pub async fn follow_invalidations(&self) {
        let mut rx = self.cache.subscribe();
        loop {
            match rx.recv().await {
                Ok(QueryKey::Accounts) | Err(RecvError::Lagged(_)) => {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "account refetch failed");
                    }
                }
                Ok(_) => {}
                Err(RecvError::Closed) => break,
            }
        }
    }

    fn begin(&self) -> Optimistic<'_, AccountPage> {
        Optimistic::begin(&self.page, &self.cache, QueryKey::Accounts)
    }

    async fn settle(
        &self,
        mutation: Mutation,
        txn: Optimistic<'_, AccountPage>,
        result: Result<(), AccountApiError>,
    ) -> Result<(), MutationError> {
        match result {
            Ok(()) => {
                txn.confirm();
                tracing::info!(%mutation, "mutation confirmed");
                Ok(())
            }
            Err(source) => {
                txn.rollback();
                let err = MutationError { mutation, source };
                tracing::warn!(error = %err, "mutation rejected, rolled back");
                let title = format!("Could not {mutation}");
                if let Err(e) = self.notify.notify(&title, &err.user_message()).await {
                    tracing::warn!(error = %e, "failed to report mutation error");
                }
                Err(err)
            }
        }
    }
}

fn remove_where(page: &mut AccountPage, matches: impl Fn(&Account) -> bool) {
    let before = page.results.len();
    page.results.retain(|a| !matches(a));
    let removed = (before - page.results.len()) as u64;
    page.count = page.count.saturating_sub(removed);
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
