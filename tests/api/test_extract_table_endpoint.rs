// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for POST /extract-table
//!
//! These drive the full route through the router with a scripted engine
//! double, covering the multipart layer the handler unit tests cannot.

use axum::http::StatusCode;
use tower::ServiceExt;

use super::common::{
    body_json, png_bytes, table_region, test_router, text_region, MultipartBody, ScriptedEngine,
};

#[tokio::test]
async fn test_extract_returns_table_html() {
    let engine = ScriptedEngine::returning(vec![table_region(
        "<table><tr><td>42</td></tr></table>",
    )]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(800, 600))
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["tables"], "<table><tr><td>42</td></tr></table>");
}

#[tokio::test]
async fn test_extract_with_selection_near_edge() {
    let engine = ScriptedEngine::returning(vec![table_region("<table/>")]);
    let (_dir, router) = test_router(Some(engine)).await;

    // Selection overlapping the bottom-right corner; clamping must keep the
    // crop inside the image instead of failing.
    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(800, 600))
        .text("selection", r#"{"x": 700, "y": 500, "width": 300, "height": 300}"#)
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn test_extract_missing_file_is_400() {
    let engine = ScriptedEngine::returning(vec![table_region("<table/>")]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .text("selection", r#"{"x": 0, "y": 0, "width": 10, "height": 10}"#)
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file provided");
}

#[tokio::test]
async fn test_extract_empty_filename_is_400() {
    let engine = ScriptedEngine::returning(vec![table_region("<table/>")]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "", "image/png", &png_bytes(64, 64))
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file selected");
}

#[tokio::test]
async fn test_extract_no_tables_is_400_with_message() {
    let engine = ScriptedEngine::returning(vec![text_region("just prose")]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(640, 640))
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No tables detected in image");
}

#[tokio::test]
async fn test_extract_malformed_selection_is_400() {
    let engine = ScriptedEngine::returning(vec![table_region("<table/>")]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(64, 64))
        .text("selection", "{this is not json")
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("selection"));
}

#[tokio::test]
async fn test_extract_engine_failure_is_500() {
    let engine = ScriptedEngine::failing("inference backend exploded");
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(64, 64))
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Table processing error"));
}

#[tokio::test]
async fn test_extract_without_engine_is_503() {
    let (_dir, router) = test_router(None).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(64, 64))
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_extract_garbage_bytes_is_400() {
    let engine = ScriptedEngine::returning(vec![table_region("<table/>")]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", b"not an image at all")
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extract_structured_table_fallback() {
    // Engine result with a generic table payload instead of html
    let mut region = table_region("unused");
    region.res = Some(serde_json::json!({"table": [["h1", "h2"], ["a", "b"]]}));
    let engine = ScriptedEngine::returning(vec![region]);
    let (_dir, router) = test_router(Some(engine)).await;

    let request = MultipartBody::new()
        .file("file", "doc.png", "image/png", &png_bytes(64, 64))
        .into_request("/extract-table");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["tables"][0][0], "h1");
}
