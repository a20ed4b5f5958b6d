// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::http::test_server::serve_once;
use crate::http::DEFAULT_HTTP_TIMEOUT;
use jw_core::JobStatus;
use jw_wire::Endpoints;

fn control(base: &str, token: Option<&str>) -> HttpJobControl {
    let endpoints = Endpoints::parse(base).unwrap();
    HttpJobControl::new(
        ApiClient::new(endpoints, token.map(str::to_string), DEFAULT_HTTP_TIMEOUT).unwrap(),
    )
}

#[tokio::test]
async fn stop_posts_to_job_path_with_bearer() {
    let (base, captured) = serve_once(200, "{}").await;
    control(&format!("{base}/api"), Some("s3cret")).stop(&JobId::new("17")).await.unwrap();

    let req = captured.lock().await;
    assert_eq!(req.request_line, "POST /api/jobs/17/stop HTTP/1.1");
    assert_eq!(req.header("authorization").as_deref(), Some("Bearer s3cret"));
}

#[tokio::test]
async fn stop_all_posts_without_auth_when_no_token() {
    let (base, captured) = serve_once(204, "").await;
    control(&base, None).stop_all().await.unwrap();

    let req = captured.lock().await;
    assert_eq!(req.request_line, "POST /jobs/stop-all HTTP/1.1");
    assert_eq!(req.header("authorization"), None);
}

#[tokio::test]
async fn active_decodes_summaries() {
    let body = r#"[{"id":3,"account_id":8,"account_email":"a@x.io","automation_name":"warmup","status":"running","progress":40}]"#;
    let (base, captured) = serve_once(200, body).await;
    let active = control(&base, None).active().await.unwrap();

    assert_eq!(captured.lock().await.request_line, "GET /jobs/active HTTP/1.1");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "3");
    assert_eq!(active[0].status, JobStatus::Running);
    assert_eq!(active[0].progress, 40);
}

#[tokio::test]
async fn rejection_carries_server_detail() {
    let (base, _captured) = serve_once(409, r#"{"detail":"job already finished"}"#).await;
    let err = control(&base, None).stop(&JobId::new("1")).await.unwrap_err();

    match err {
        ControlError::Status { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "job already finished");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fake_records_calls_and_rejects() {
    let fake = FakeJobControl::new();
    fake.stop(&JobId::new("4")).await.unwrap();
    fake.reject_with(500, "boom");
    assert!(fake.stop_all().await.is_err());
    assert_eq!(fake.calls(), vec![ControlCall::Stop(JobId::new("4")), ControlCall::StopAll]);
}
