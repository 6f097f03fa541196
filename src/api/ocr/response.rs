// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR response types

use serde::Serialize;

use crate::pipeline::{Dimensions, OcrOutput, PipelineOutcome, ProcessingSummary};

/// Language hints used and languages observed in the text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageInfo {
    pub requested: Vec<String>,
    /// Empty when nothing was detected
    pub detected: Vec<String>,
}

/// Response from `POST /ocr`
#[derive(Debug, Clone, Serialize)]
pub struct OcrResponse {
    /// Full recognized text, empty when none was found
    pub text: String,
    pub dimensions: Dimensions,
    pub languages: LanguageInfo,
    #[serde(flatten)]
    pub summary: ProcessingSummary,
}

impl From<PipelineOutcome<OcrOutput>> for OcrResponse {
    fn from(outcome: PipelineOutcome<OcrOutput>) -> Self {
        let OcrOutput {
            text,
            requested_languages,
            detected_languages,
        } = outcome.payload;

        Self {
            text,
            dimensions: outcome.dimensions,
            languages: LanguageInfo {
                requested: requested_languages,
                detected: detected_languages,
            },
            summary: outcome.summary,
        }
    }
}
