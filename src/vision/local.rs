// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-process vision provider
//!
//! OCR runs through ocrs when models are loaded, card detection through
//! imageproc, and face quality through an optional [`FaceQualityScorer`].

use std::sync::Arc;

use image::DynamicImage;
use tracing::debug;

use crate::vision::card::{self, CardDetectionOptions};
use crate::vision::face::FaceQualityScorer;
use crate::vision::ocr::{detect_languages, OcrModel};
use crate::vision::provider::{
    ProviderCapabilities, ProviderOutcome, RecognitionOptions, TextRecognition, VisionProvider,
};

#[derive(Default)]
pub struct LocalVisionProvider {
    ocr: Option<Arc<OcrModel>>,
    face_scorer: Option<Arc<dyn FaceQualityScorer>>,
}

impl LocalVisionProvider {
    pub fn new(ocr: Option<Arc<OcrModel>>) -> Self {
        Self {
            ocr,
            face_scorer: None,
        }
    }

    pub fn with_face_scorer(mut self, scorer: Arc<dyn FaceQualityScorer>) -> Self {
        self.face_scorer = Some(scorer);
        self
    }
}

impl VisionProvider for LocalVisionProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            ocr: self.ocr.is_some(),
            face_quality: self.face_scorer.is_some(),
            card_detection: true,
        }
    }

    fn recognize_text(
        &self,
        image: &DynamicImage,
        options: &RecognitionOptions,
    ) -> ProviderOutcome<TextRecognition> {
        let Some(ocr) = self.ocr.as_ref() else {
            return ProviderOutcome::Failed("OCR models not loaded".to_string());
        };

        match ocr.recognize(image) {
            Ok(text) if text.is_empty() => ProviderOutcome::NoResult,
            Ok(text) => {
                let detected_languages = detect_languages(&text, &options.languages);
                debug!(chars = text.len(), ?detected_languages, "Text recognized");
                ProviderOutcome::Found(TextRecognition {
                    text,
                    detected_languages,
                })
            }
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }

    fn score_face_quality(&self, image: &DynamicImage) -> ProviderOutcome<f32> {
        let Some(scorer) = self.face_scorer.as_ref() else {
            return ProviderOutcome::Failed("no face quality backend configured".to_string());
        };

        match scorer.score(image) {
            Ok(Some(score)) => ProviderOutcome::Found(score.clamp(0.0, 1.0)),
            Ok(None) => ProviderOutcome::NoResult,
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }

    fn detect_card(
        &self,
        image: &DynamicImage,
        options: &CardDetectionOptions,
    ) -> ProviderOutcome<DynamicImage> {
        let Some(quad) = card::find_card_quad(image, options) else {
            return ProviderOutcome::NoResult;
        };

        match card::rectify(image, &quad, options.canonical_width, options.canonical_height) {
            Some(rectified) => ProviderOutcome::Found(rectified),
            None => ProviderOutcome::Failed("perspective transform could not be computed".to_string()),
        }
    }
}
