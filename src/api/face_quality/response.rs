// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Face quality response types

use serde::Serialize;

use crate::pipeline::{Dimensions, PipelineOutcome, ProcessingSummary};

/// Response from `POST /face_quality`
#[derive(Debug, Clone, Serialize)]
pub struct FaceQualityResponse {
    pub quality_score: f32,
    pub dimensions: Dimensions,
    #[serde(flatten)]
    pub summary: ProcessingSummary,
}

impl From<PipelineOutcome<f32>> for FaceQualityResponse {
    fn from(outcome: PipelineOutcome<f32>) -> Self {
        Self {
            quality_score: outcome.payload,
            dimensions: outcome.dimensions,
            summary: outcome.summary,
        }
    }
}
