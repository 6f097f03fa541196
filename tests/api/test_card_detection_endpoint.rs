// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Card detection endpoint tests for POST /card_detection

use axum::http::StatusCode;
use fabstir_vision_node::metrics::OperationKind;

use crate::common::{gradient_image, image_upload, png_bytes, StubProvider, TestApp};

#[tokio::test]
async fn test_card_detected_and_rectified() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app
        .send(image_upload("/card_detection", "id.png", "image/png", &png_bytes(300, 200)))
        .await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    assert_eq!(json["message"], "Card detected and corrected");
    assert_eq!(json["card_detected"], true);
    assert_eq!(json["dimensions"]["width"], 640);
    assert_eq!(json["dimensions"]["height"], 400);

    let written = image::open(json["output_path"].as_str().unwrap()).unwrap();
    assert_eq!((written.width(), written.height()), (640, 400));
}

#[tokio::test]
async fn test_no_card_returns_original_image() {
    let app = TestApp::new(StubProvider::empty());
    let original = gradient_image(90, 60);
    let upload = crate::common::encode(&original, image::ImageFormat::Png);

    let (status, json) = app
        .send(image_upload("/card_detection", "desk.png", "image/png", &upload))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "No card detected, original image returned");
    assert_eq!(json["card_detected"], false);
    assert_eq!(json["dimensions"]["width"], 90);

    let written = image::open(json["output_path"].as_str().unwrap()).unwrap();
    assert_eq!(written.to_rgb8().as_raw(), original.to_rgb8().as_raw());

    let stats = app
        .state
        .pipeline
        .metrics()
        .stats_for(OperationKind::CardDetection)
        .await
        .unwrap();
    assert_eq!(stats.count, 1);
    assert!(stats.min_time >= 0.0);
    assert!(json["processing_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_provider_failure_returns_original_image() {
    let app = TestApp::new(StubProvider::failing());
    let (status, json) = app
        .send(image_upload("/card_detection", "desk.png", "image/png", &png_bytes(50, 40)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["card_detected"], false);
    assert_eq!(json["dimensions"]["height"], 40);
}

#[tokio::test]
async fn test_jpeg_artifact_format() {
    let app = TestApp::with_config(StubProvider::default(), |config| {
        config.artifact_format = fabstir_vision_node::config::ArtifactFormat::Jpg;
    });
    let (status, json) = app
        .send(image_upload("/card_detection", "id.png", "image/png", &png_bytes(30, 20)))
        .await;

    assert_eq!(status, StatusCode::OK);
    let output_path = json["output_path"].as_str().unwrap();
    assert!(output_path.ends_with("_card_detection_processed.jpg"), "{}", output_path);
    let written = std::fs::read(output_path).unwrap();
    assert_eq!(&written[..3], &[0xFF, 0xD8, 0xFF]);
}
