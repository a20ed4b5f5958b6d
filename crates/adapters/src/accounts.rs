// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account list REST endpoints.

use crate::http::{ApiClient, Failure};
use async_trait::async_trait;
use jw_core::{AccountId, AccountPage, BulkSelection};
use jw_wire::FieldPatch;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;

/// Errors from account requests
#[derive(Debug, Error)]
pub enum AccountApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl AccountApiError {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Http(e) if e.is_connect() => "backend unreachable".to_string(),
            Self::Http(e) => e.to_string(),
            Self::Status { message, .. } => message.clone(),
        }
    }
}

impl From<Failure> for AccountApiError {
    fn from(f: Failure) -> Self {
        match f {
            Failure::Request(e) => Self::Http(e),
            Failure::Status { status, message } => Self::Status { status, message },
        }
    }
}

/// Adapter for the account endpoints
#[async_trait]
pub trait AccountApi: Send + Sync + 'static {
    async fn list(&self, search: Option<&str>) -> Result<AccountPage, AccountApiError>;
    async fn delete(&self, id: &AccountId) -> Result<(), AccountApiError>;
    async fn bulk_delete(&self, selection: &BulkSelection) -> Result<(), AccountApiError>;
    async fn patch(&self, id: &AccountId, field: &str, value: Value)
        -> Result<(), AccountApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpAccountApi {
    client: ApiClient,
}

impl HttpAccountApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn list(&self, search: Option<&str>) -> Result<AccountPage, AccountApiError> {
        let url = self.client.endpoints().accounts(search);
        let response = self.client.send(self.client.request(Method::GET, url)).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountApiError> {
        let url = self.client.endpoints().account(id);
        self.client.send(self.client.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn bulk_delete(&self, selection: &BulkSelection) -> Result<(), AccountApiError> {
        let url = self.client.endpoints().bulk_delete_accounts();
        self.client.send(self.client.request(Method::POST, url).json(selection)).await?;
        Ok(())
    }

    async fn patch(
        &self,
        id: &AccountId,
        field: &str,
        value: Value,
    ) -> Result<(), AccountApiError> {
        let url = self.client.endpoints().account(id);
        let body = FieldPatch::single(field, value);
        self.client.send(self.client.request(Method::PATCH, url).json(&body)).await?;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AccountApi, AccountApiError};
    use async_trait::async_trait;
    use jw_core::{AccountId, AccountPage, BulkSelection};
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::watch;

    /// Recorded account request
    #[derive(Debug, Clone, PartialEq)]
    pub enum AccountCall {
        List(Option<String>),
        Delete(AccountId),
        BulkDelete(BulkSelection),
        Patch(AccountId, String, Value),
    }

    #[derive(Default)]
    struct FakeAccountState {
        calls: Vec<AccountCall>,
        page: AccountPage,
        reject: Option<(u16, String)>,
    }

    /// Fake account adapter for testing.
    ///
    /// `hold()` parks mutating requests until `release()`, so callers can
    /// observe optimistic state while a request is in flight.
    #[derive(Clone)]
    pub struct FakeAccountApi {
        inner: Arc<Mutex<FakeAccountState>>,
        open: Arc<watch::Sender<bool>>,
    }

    impl Default for FakeAccountApi {
        fn default() -> Self {
            let (open, _) = watch::channel(true);
            Self { inner: Arc::default(), open: Arc::new(open) }
        }
    }

    impl FakeAccountApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(page: AccountPage) -> Self {
            let fake = Self::default();
            fake.set_page(page);
            fake
        }

        pub fn set_page(&self, page: AccountPage) {
            self.inner.lock().page = page;
        }

        pub fn reject_with(&self, status: u16, message: &str) {
            self.inner.lock().reject = Some((status, message.to_string()));
        }

        pub fn accept(&self) {
            self.inner.lock().reject = None;
        }

        pub fn hold(&self) {
            self.open.send_replace(false);
        }

        pub fn release(&self) {
            self.open.send_replace(true);
        }

        pub fn calls(&self) -> Vec<AccountCall> {
            self.inner.lock().calls.clone()
        }

        async fn mutate(&self, call: AccountCall) -> Result<(), AccountApiError> {
            self.inner.lock().calls.push(call);
            let mut open = self.open.subscribe();
            let _ = open.wait_for(|open| *open).await;
            match &self.inner.lock().reject {
                Some((status, message)) => {
                    Err(AccountApiError::Status { status: *status, message: message.clone() })
                }
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl AccountApi for FakeAccountApi {
        async fn list(&self, search: Option<&str>) -> Result<AccountPage, AccountApiError> {
            let mut inner = self.inner.lock();
            inner.calls.push(AccountCall::List(search.map(str::to_string)));
            Ok(inner.page.clone())
        }

        async fn delete(&self, id: &AccountId) -> Result<(), AccountApiError> {
            self.mutate(AccountCall::Delete(id.clone())).await
        }

        async fn bulk_delete(&self, selection: &BulkSelection) -> Result<(), AccountApiError> {
            self.mutate(AccountCall::BulkDelete(selection.clone())).await
        }

        async fn patch(
            &self,
            id: &AccountId,
            field: &str,
            value: Value,
        ) -> Result<(), AccountApiError> {
            self.mutate(AccountCall::Patch(id.clone(), field.to_string(), value)).await
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{AccountCall, FakeAccountApi};

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
