// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card detection response types

use serde::Serialize;

use crate::pipeline::{CardOutcome, Dimensions, PipelineOutcome, ProcessingSummary};

/// Response from `POST /card_detection`
#[derive(Debug, Clone, Serialize)]
pub struct CardDetectionResponse {
    pub message: String,
    pub card_detected: bool,
    /// Dimensions of the written image
    pub dimensions: Dimensions,
    #[serde(flatten)]
    pub summary: ProcessingSummary,
}

impl From<PipelineOutcome<CardOutcome>> for CardDetectionResponse {
    fn from(outcome: PipelineOutcome<CardOutcome>) -> Self {
        Self {
            message: outcome.payload.message().to_string(),
            card_detected: outcome.payload.detected,
            dimensions: outcome.dimensions,
            summary: outcome.summary,
        }
    }
}
