// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use super::errors::ApiError;
use super::server::AppState;
use crate::metrics::SpeedComparison;
use crate::vision::ocr::supported_languages;
use crate::vision::{ProviderCapabilities, VisionModelInfo};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub capabilities: ProviderCapabilities,
    pub models: Vec<VisionModelInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.pipeline.provider();
    let capabilities = provider.capabilities();

    let mut issues = Vec::new();
    if !capabilities.ocr {
        issues.push("OCR models not loaded; /ocr returns empty text".to_string());
    }
    if !capabilities.face_quality {
        issues.push("No face quality backend; /face_quality returns 0.0".to_string());
    }

    Json(HealthResponse {
        status: if issues.is_empty() { "healthy" } else { "degraded" }.to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        provider: provider.name().to_string(),
        capabilities,
        models: state.models.as_ref().clone(),
        issues: (!issues.is_empty()).then_some(issues),
    })
}

/// GET /supported_languages - language code to display name
pub async fn supported_languages_handler() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(supported_languages())
}

/// GET /processing_speed_comparison - processing time stats per operation
pub async fn processing_speed_comparison_handler(
    State(state): State<AppState>,
) -> Result<Json<SpeedComparison>, ApiError> {
    let comparison = state
        .pipeline
        .metrics()
        .compare_all()
        .await
        .map_err(|e| ApiError::ProcessingFailed {
            stage: "persistence",
            message: e.to_string(),
        })?;

    Ok(Json(comparison))
}
