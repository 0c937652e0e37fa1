// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for GET /health and the index page

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::common::{body_json, test_router, ScriptedEngine};

#[tokio::test]
async fn test_health_without_engine() {
    let (_dir, router) = test_router(None).await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["engine_configured"], false);
    assert_eq!(json["engine_reachable"], false);
}

#[tokio::test]
async fn test_health_with_engine() {
    let engine = ScriptedEngine::returning(vec![]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["engine_configured"], true);
    assert_eq!(json["engine_reachable"], true);
    assert!(json["version"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn test_index_serves_html() {
    let (_dir, router) = test_router(None).await;

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("extract-table"));
}
