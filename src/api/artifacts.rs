// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval of persisted output artifacts

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use image::ImageFormat;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use super::errors::ApiError;
use super::server::AppState;

/// Only bare file names inside the output directory are served
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
}

fn content_type_for(filename: &str) -> &'static str {
    ImageFormat::from_path(filename)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// GET /output/:filename - stream a previously written artifact
pub async fn artifact_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    if !is_safe_filename(&filename) {
        warn!(filename = %filename, "Rejected artifact path");
        return Err(ApiError::NotFound(format!("artifact '{}' not found", filename)));
    }

    let path = state.pipeline.artifacts().output_dir().join(&filename);
    let not_found = || ApiError::NotFound(format!("artifact '{}' not found", filename));

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(not_found()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
        Err(e) => return Err(ApiError::InternalError(e.to_string())),
    }

    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            not_found()
        } else {
            ApiError::InternalError(e.to_string())
        }
    })?;
    debug!(path = %path.display(), "Streaming artifact");

    let body = Body::from_stream(ReaderStream::new(file));
    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], body).into_response())
}
