// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR endpoint handler

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::Multipart;
use tracing::{debug, warn};

use super::request::OcrQuery;
use super::response::OcrResponse;
use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::api::upload::read_image_upload;

/// POST /ocr - Extract text from an uploaded image
///
/// # Request
/// - multipart field `file`: the image (content type must be `image/*`)
/// - query `languages`: comma-separated language codes, defaults to the
///   configured pair
///
/// # Response
/// - `text`: Full extracted text, empty when none was found
/// - `dimensions`: Image width and height
/// - `languages`: Requested hints and detected languages
/// - `processing_time`, `fast_rate`, `cooling_rate`
/// - `output_path`, `created_at`, `result_id`
///
/// # Errors
/// - 400 Bad Request: Missing file, non-image upload, unsupported language
/// - 500 Internal Server Error: Decode, artifact or storage failure
pub async fn ocr_handler(
    State(state): State<AppState>,
    Query(query): Query<OcrQuery>,
    multipart: Multipart,
) -> Result<Json<OcrResponse>, ApiError> {
    let languages = query.language_hints().map_err(|e| {
        warn!("OCR validation failed: {}", e);
        e
    })?;
    debug!(?languages, "OCR request received");

    let upload = read_image_upload(multipart, state.config.max_upload_bytes).await?;
    let operation = state.pipeline.text_recognition(languages);
    let outcome = state.pipeline.run(upload, operation).await?;

    Ok(Json(OcrResponse::from(outcome)))
}
