// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Face quality endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;

use super::response::FaceQualityResponse;
use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::api::upload::read_image_upload;
use crate::pipeline::FaceQualityOp;

/// POST /face_quality - Score the capture quality of the most prominent face
///
/// The score is in `[0.0, 1.0]` and is `0.0` when no face is found or the
/// provider cannot score faces.
pub async fn face_quality_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FaceQualityResponse>, ApiError> {
    let upload = read_image_upload(multipart, state.config.max_upload_bytes).await?;
    let outcome = state.pipeline.run(upload, FaceQualityOp).await?;

    Ok(Json(FaceQualityResponse::from(outcome)))
}
