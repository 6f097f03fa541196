// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction shared by the processing endpoints

use axum::http::StatusCode;
use axum_extra::extract::multipart::{Multipart, MultipartError};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::pipeline::ImageUpload;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Filename recorded when the `file` field carries none
const UNNAMED_UPLOAD: &str = "upload";

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::InvalidRequest(format!("Malformed multipart body: {}", err.body_text()))
    }
}

/// Take the uploaded image from a multipart body
///
/// The `file` field is preferred; otherwise the first field that carries a
/// filename is used. Other fields are skipped.
pub async fn read_image_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None if is_file_field => UNNAMED_UPLOAD.to_string(),
            None => {
                debug!(field = ?field.name(), "Skipping non-file multipart field");
                continue;
            }
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        if data.len() > limit {
            return Err(ApiError::PayloadTooLarge { limit });
        }

        debug!(
            filename = %filename,
            content_type = ?content_type,
            size_bytes = data.len(),
            "Received upload"
        );
        return Ok(ImageUpload::new(filename, content_type, data));
    }

    Err(ApiError::ValidationError {
        field: FILE_FIELD.to_string(),
        message: "file is required".to_string(),
    })
}
