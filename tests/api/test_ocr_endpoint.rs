// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! OCR endpoint tests for POST /ocr
//!
//! Verifies that the handler:
//! - Forwards requested or default language hints to the provider
//! - Shapes the text, dimensions and language info
//! - Derives rates consistent with the reported processing time
//! - Falls back to empty text when the provider fails

use axum::http::StatusCode;
use fabstir_vision_node::metrics::OperationKind;
use fabstir_vision_node::pipeline::round4;

use crate::common::{image_upload, png_bytes, StubProvider, TestApp};

#[tokio::test]
async fn test_ocr_returns_text_and_metadata() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload("/ocr", "scan.png", "image/png", &png_bytes(40, 30)))
        .await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    assert_eq!(json["text"], "Hello World");
    assert_eq!(json["dimensions"]["width"], 40);
    assert_eq!(json["dimensions"]["height"], 30);
    assert_eq!(json["languages"]["detected"], serde_json::json!(["en-US"]));
    assert!(json["result_id"].as_i64().unwrap() >= 1);
    assert!(json["created_at"].as_str().unwrap().len() == "2025-01-01 00:00:00".len());

    let output_path = json["output_path"].as_str().unwrap();
    assert!(output_path.ends_with("_ocr_processed.png"), "{}", output_path);
    assert!(std::path::Path::new(output_path).exists());
}

#[tokio::test]
async fn test_ocr_uses_default_language_pair() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload("/ocr", "scan.png", "image/png", &png_bytes(8, 8)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["languages"]["requested"],
        serde_json::json!(["zh-Hans", "en-US"])
    );
    assert_eq!(
        app.provider.last_languages.lock().unwrap().clone(),
        Some(vec!["zh-Hans".to_string(), "en-US".to_string()])
    );
}

#[tokio::test]
async fn test_ocr_forwards_requested_languages() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload(
            "/ocr?languages=ja-JP,en-US",
            "scan.png",
            "image/png",
            &png_bytes(8, 8),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["languages"]["requested"],
        serde_json::json!(["ja-JP", "en-US"])
    );
    assert_eq!(
        app.provider.last_languages.lock().unwrap().clone(),
        Some(vec!["ja-JP".to_string(), "en-US".to_string()])
    );
}

#[tokio::test]
async fn test_ocr_rejects_unsupported_language() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload(
            "/ocr?languages=tlh-KL",
            "scan.png",
            "image/png",
            &png_bytes(8, 8),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_type"], "validation_error");
    assert_eq!(app.provider.call_count(), 0);
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_ocr_rates_match_processing_time() {
    let app = TestApp::new(StubProvider::default());
    let (_, json) = app
        .send(image_upload("/ocr", "scan.png", "image/png", &png_bytes(16, 16)))
        .await;

    let t = json["processing_time"].as_f64().unwrap();
    assert!(t >= 0.0);
    let fast = json["fast_rate"].as_f64().unwrap();
    let cooling = json["cooling_rate"].as_f64().unwrap();
    if t > 0.0 {
        assert_eq!(fast, round4(1.0 / t));
        assert_eq!(cooling, round4(1.0 / (t * 1.5)));
    } else {
        assert_eq!(fast, 0.0);
        assert_eq!(cooling, 0.0);
    }
}

#[tokio::test]
async fn test_ocr_provider_failure_returns_empty_text() {
    let app = TestApp::new(StubProvider::failing());
    let (status, json) = app
        .send(image_upload("/ocr", "blank.png", "image/png", &png_bytes(10, 10)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "");
    assert_eq!(json["languages"]["detected"], serde_json::json!([]));

    let stats = app
        .state
        .pipeline
        .metrics()
        .stats_for(OperationKind::Ocr)
        .await
        .unwrap();
    assert_eq!(stats.count, 1);
}

#[tokio::test]
async fn test_ocr_no_result_returns_empty_text() {
    let app = TestApp::new(StubProvider::empty());
    let (status, json) = app
        .send(image_upload("/ocr", "blank.png", "image/png", &png_bytes(10, 10)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "");
    assert!(json["languages"]["detected"].as_array().unwrap().is_empty());
}
