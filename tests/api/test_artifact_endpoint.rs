// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Artifact retrieval tests for GET /output/:filename

use axum::http::StatusCode;

use crate::common::{get, gradient_image, image_upload, png_bytes, StubProvider, TestApp};

#[tokio::test]
async fn test_artifact_can_be_fetched_after_processing() {
    let app = TestApp::new(StubProvider::empty());
    let original = gradient_image(33, 21);
    let upload = crate::common::encode(&original, image::ImageFormat::Png);
    let (status, json) = app
        .send(image_upload("/card_detection", "desk.png", "image/png", &upload))
        .await;
    assert_eq!(status, StatusCode::OK);

    let output_path = std::path::PathBuf::from(json["output_path"].as_str().unwrap());
    let filename = output_path.file_name().unwrap().to_str().unwrap().to_string();

    let response = {
        use tower::ServiceExt;
        app.router
            .clone()
            .oneshot(get(&format!("/output/{}", filename)))
            .await
            .unwrap()
    };
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body.as_ref(), std::fs::read(&output_path).unwrap().as_slice());

    let fetched = image::load_from_memory(&body).unwrap();
    assert_eq!(fetched.to_rgb8().as_raw(), original.to_rgb8().as_raw());
}

#[tokio::test]
async fn test_missing_artifact_is_not_found() {
    let app = TestApp::new(StubProvider::default());
    let (status, json) = app.send(get("/output/1_ocr_processed.png")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_type"], "not_found");
}

#[tokio::test]
async fn test_path_traversal_is_not_found() {
    let app = TestApp::new(StubProvider::default());
    // A real file one level above the output directory
    std::fs::write(app.dir.path().join("secret.png"), png_bytes(2, 2)).unwrap();

    for uri in ["/output/..%2Fsecret.png", "/output/%2E%2E%2Fsecret.png", "/output/.."] {
        let (status, _) = app.send_raw(get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}
