// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::http::test_server::serve_once;
use crate::http::DEFAULT_HTTP_TIMEOUT;
use jw_wire::Endpoints;
use serde_json::json;

fn api(base: &str) -> HttpAccountApi {
    let endpoints = Endpoints::parse(base).unwrap();
    HttpAccountApi::new(ApiClient::new(endpoints, Some("t".into()), DEFAULT_HTTP_TIMEOUT).unwrap())
}

#[tokio::test]
async fn list_sends_search_and_decodes_page() {
    let body = r#"{"results":[{"id":1,"email":"a@x.io","is_active":true}],"count":1}"#;
    let (base, captured) = serve_once(200, body).await;
    let page = api(&base).list(Some("x.io")).await.unwrap();

    assert_eq!(captured.lock().await.request_line, "GET /accounts/?search=x.io HTTP/1.1");
    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].field("is_active"), Some(&json!(true)));
}

#[tokio::test]
async fn delete_targets_account_path() {
    let (base, captured) = serve_once(204, "").await;
    api(&base).delete(&AccountId::new("12")).await.unwrap();
    assert_eq!(captured.lock().await.request_line, "DELETE /accounts/12/ HTTP/1.1");
}

#[tokio::test]
async fn bulk_delete_posts_selection() {
    let (base, captured) = serve_once(200, "{}").await;
    let selection = BulkSelection::AllMatching {
        search: Some("gmail".into()),
        exclude: vec![AccountId::new("3")],
    };
    api(&base).bulk_delete(&selection).await.unwrap();

    let req = captured.lock().await;
    assert_eq!(req.request_line, "POST /accounts/bulk-delete/ HTTP/1.1");
    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, json!({"mode": "all_matching", "search": "gmail", "exclude": ["3"]}));
}

#[tokio::test]
async fn patch_sends_single_field() {
    let (base, captured) = serve_once(200, "{}").await;
    api(&base).patch(&AccountId::new("5"), "is_active", json!(false)).await.unwrap();

    let req = captured.lock().await;
    assert_eq!(req.request_line, "PATCH /accounts/5/ HTTP/1.1");
    let sent: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(sent, json!({"is_active": false}));
}

#[tokio::test]
async fn plain_text_rejection_is_kept() {
    let (base, _captured) = serve_once(500, "database is locked").await;
    let err = api(&base).delete(&AccountId::new("1")).await.unwrap_err();
    assert_eq!(err.user_message(), "database is locked");
}

#[tokio::test]
async fn fake_hold_parks_mutations_until_release() {
    let fake = FakeAccountApi::new();
    fake.hold();
    let task = tokio::spawn({
        let fake = fake.clone();
        async move { fake.delete(&AccountId::new("1")).await }
    });
    tokio::task::yield_now().await;
    assert!(!task.is_finished());

    fake.release();
    task.await.unwrap().unwrap();
    assert_eq!(fake.calls(), vec![AccountCall::Delete(AccountId::new("1"))]);
}
