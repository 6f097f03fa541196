// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Upload validation shared by all processing endpoints

use axum::http::StatusCode;

use crate::common::{
    image_upload, multipart_body, multipart_without_file, png_bytes, upload_request,
    StubProvider, TestApp,
};

const PROCESSING_ENDPOINTS: [&str; 3] = ["/ocr", "/face_quality", "/card_detection"];

#[tokio::test]
async fn test_non_image_content_type_is_rejected_without_record() {
    let app = TestApp::new(StubProvider::default());

    for endpoint in PROCESSING_ENDPOINTS {
        let (status, json) = app
            .send(image_upload(endpoint, "notes.txt", "text/plain", b"not an image"))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", endpoint);
        assert_eq!(json["error_type"], "validation_error");
        assert!(json["message"].as_str().unwrap().contains("File must be an image"));
        assert!(json["request_id"].is_string());
    }

    assert_eq!(app.provider.call_count(), 0);
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_real_image_with_wrong_content_type_is_rejected() {
    let app = TestApp::new(StubProvider::default());
    let (status, _) = app
        .send(image_upload(
            "/face_quality",
            "face.png",
            "application/octet-stream",
            &png_bytes(8, 8),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_missing_file_field() {
    let app = TestApp::new(StubProvider::default());

    for endpoint in PROCESSING_ENDPOINTS {
        let (status, json) = app
            .send(upload_request(endpoint, multipart_without_file()))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", endpoint);
        assert_eq!(json["details"]["field"], "file");
    }
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_file_under_other_field_name_is_accepted() {
    let app = TestApp::new(StubProvider::default());
    let body = multipart_body("image", "face.png", "image/png", &png_bytes(8, 8));
    let (status, _) = app.send(upload_request("/face_quality", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.record_count().await, 1);
}

#[tokio::test]
async fn test_undecodable_image_is_server_error_without_record() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload("/ocr", "broken.png", "image/png", b"definitely not png"))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_type"], "processing_failed");
    assert_eq!(json["details"]["stage"], "decode");
    assert_eq!(app.provider.call_count(), 0);
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_empty_upload_is_server_error() {
    let app = TestApp::new(StubProvider::default());
    let (status, _) = app
        .send(image_upload("/card_detection", "empty.png", "image/png", &[]))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_provider_panic_is_server_error() {
    let app = TestApp::new(StubProvider::panicking());
    let (status, json) = app
        .send(image_upload("/ocr", "scan.png", "image/png", &png_bytes(8, 8)))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error_type"], "internal_error");
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::with_config(StubProvider::default(), |config| {
        config.max_upload_bytes = 1024;
    });
    let payload = vec![0u8; 256 * 1024];
    let (status, _) = app
        .send_raw(image_upload("/ocr", "huge.png", "image/png", &payload))
        .await;

    assert!(status.is_client_error(), "unexpected status {}", status);
    assert_eq!(app.provider.call_count(), 0);
    assert_eq!(app.record_count().await, 0);
}
