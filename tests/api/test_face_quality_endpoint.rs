// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Face quality endpoint tests for POST /face_quality

use axum::http::StatusCode;
use fabstir_vision_node::metrics::OperationKind;

use crate::common::{encode, gradient_image, image_upload, png_bytes, StubProvider, TestApp};

#[tokio::test]
async fn test_face_quality_returns_score() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload("/face_quality", "selfie.png", "image/png", &png_bytes(24, 32)))
        .await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    let score = json["quality_score"].as_f64().unwrap();
    assert!((score - 0.82).abs() < 1e-6);
    assert_eq!(json["dimensions"]["width"], 24);
    assert_eq!(json["dimensions"]["height"], 32);
    assert!(json["output_path"]
        .as_str()
        .unwrap()
        .ends_with("_face_quality_processed.png"));
}

#[tokio::test]
async fn test_face_quality_falls_back_to_zero() {
    for provider in [StubProvider::failing(), StubProvider::empty()] {
        let app = TestApp::new(provider);
        let (status, json) = app
            .send(image_upload("/face_quality", "noface.png", "image/png", &png_bytes(12, 12)))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["quality_score"], 0.0);
        assert_eq!(app.record_count().await, 1);
    }
}

#[tokio::test]
async fn test_face_quality_jpeg_upload_is_recorded() {
    let app = TestApp::new(StubProvider::default());
    let jpeg = encode(&gradient_image(20, 20), image::ImageFormat::Jpeg);
    let (status, _) = app
        .send(image_upload("/face_quality", "selfie.jpg", "image/jpeg", &jpeg))
        .await;
    assert_eq!(status, StatusCode::OK);

    let stats = app
        .state
        .pipeline
        .metrics()
        .stats_for(OperationKind::FaceQuality)
        .await
        .unwrap();
    assert_eq!(stats.count, 1);
    assert!(stats.min_time >= 0.0);
    assert_eq!(stats.min_time, stats.max_time);
}
