// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card detection endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;

use super::response::CardDetectionResponse;
use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::api::upload::read_image_upload;

/// POST /card_detection - Detect a card and rectify it
///
/// The rectified card (or the unchanged input when no card qualifies) is
/// written to `output_path` and can be fetched from `GET /output/{filename}`.
pub async fn card_detection_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CardDetectionResponse>, ApiError> {
    let upload = read_image_upload(multipart, state.config.max_upload_bytes).await?;
    let operation = state.pipeline.card_detection();
    let outcome = state.pipeline.run(upload, operation).await?;

    Ok(Json(CardDetectionResponse::from(outcome)))
}
