// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /supported_languages, GET /processing_speed_comparison, GET /health

use axum::http::StatusCode;

use crate::common::{get, image_upload, png_bytes, StubProvider, TestApp};

const KINDS: [&str; 3] = ["ocr", "face_quality", "card_detection"];

#[tokio::test]
async fn test_supported_languages() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app.send(get("/supported_languages")).await;

    assert_eq!(status, StatusCode::OK);
    let languages = json.as_object().unwrap();
    assert_eq!(languages["en-US"], "English");
    assert_eq!(languages["zh-Hans"], "Chinese (Simplified)");
    assert!(languages.len() >= 2);
}

#[tokio::test]
async fn test_comparison_with_no_records_is_all_zero() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app.send(get("/processing_speed_comparison")).await;

    assert_eq!(status, StatusCode::OK);
    let kinds = json.as_object().unwrap();
    assert_eq!(kinds.len(), 3);
    for kind in KINDS {
        assert_eq!(json[kind]["count"], 0);
        assert_eq!(json[kind]["avg_time"], 0.0);
        assert_eq!(json[kind]["min_time"], 0.0);
        assert_eq!(json[kind]["max_time"], 0.0);
    }
}

#[tokio::test]
async fn test_comparison_counts_processed_requests() {
    let app = TestApp::new(StubProvider::default());
    for _ in 0..2 {
        let (status, _) = app
            .send(image_upload("/ocr", "a.png", "image/png", &png_bytes(8, 8)))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = app
        .send(image_upload("/card_detection", "b.png", "image/png", &png_bytes(8, 8)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = app.send(get("/processing_speed_comparison")).await;
    assert_eq!(json["ocr"]["count"], 2);
    assert_eq!(json["card_detection"]["count"], 1);
    assert_eq!(json["face_quality"]["count"], 0);

    let ocr = &json["ocr"];
    let min = ocr["min_time"].as_f64().unwrap();
    let avg = ocr["avg_time"].as_f64().unwrap();
    let max = ocr["max_time"].as_f64().unwrap();
    assert!(min <= avg + 1e-12 && avg <= max + 1e-12);
}

#[tokio::test]
async fn test_health_reports_provider() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app.send(get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["provider"], "stub");
    assert_eq!(json["capabilities"]["card_detection"], true);
    assert_eq!(json["version"], fabstir_vision_node::version::VERSION_NUMBER);
    assert!(json.get("issues").is_none());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new(StubProvider::default());
    let (status, _) = app.send_raw(get("/thumbnail")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
