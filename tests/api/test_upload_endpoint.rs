// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for POST /upload

use axum::http::StatusCode;
use tower::ServiceExt;

use super::common::{body_json, test_router, MultipartBody};

#[tokio::test]
async fn test_upload_stores_file() {
    let (dir, router) = test_router(None).await;

    let request = MultipartBody::new()
        .file("file", "invoice.png", "image/png", b"fake image bytes")
        .into_request("/upload");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "File uploaded successfully");
    assert_eq!(json["filename"], "invoice.png");

    let stored = dir.path().join("invoice.png");
    assert_eq!(std::fs::read(stored).unwrap(), b"fake image bytes");
}

#[tokio::test]
async fn test_upload_missing_file_is_400() {
    let (_dir, router) = test_router(None).await;

    let request = MultipartBody::new()
        .text("note", "no file in here")
        .into_request("/upload");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No file part");
}

#[tokio::test]
async fn test_upload_empty_filename_is_400() {
    let (_dir, router) = test_router(None).await;

    let request = MultipartBody::new()
        .file("file", "", "application/octet-stream", b"data")
        .into_request("/upload");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No selected file");
}

#[tokio::test]
async fn test_upload_path_traversal_is_confined() {
    let (dir, router) = test_router(None).await;

    let request = MultipartBody::new()
        .file("file", "../../escape.txt", "text/plain", b"gotcha")
        .into_request("/upload");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["filename"], "escape.txt");

    assert!(dir.path().join("escape.txt").exists());
    assert!(!dir.path().join("../../escape.txt").exists());
}

#[tokio::test]
async fn test_upload_works_without_engine() {
    // /upload has no engine dependency; it must work while /extract-table
    // would return 503
    let (_dir, router) = test_router(None).await;

    let request = MultipartBody::new()
        .file("file", "doc.pdf", "application/pdf", b"%PDF-1.4")
        .into_request("/upload");
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
