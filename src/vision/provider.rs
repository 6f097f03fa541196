// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision provider capability interface
//!
//! The pipeline talks to text recognition, face-quality scoring and card
//! rectification only through [`VisionProvider`]. Implementations can wrap a
//! local model, a native OS framework or a remote inference service.

use image::DynamicImage;
use serde::Serialize;

use crate::vision::card::CardDetectionOptions;

/// Outcome of a single provider call
///
/// `NoResult` means the call completed and found nothing; `Failed` means the
/// call itself did not complete. Callers decide how each maps to a default.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    Found(T),
    NoResult,
    Failed(String),
}

/// Options forwarded to text recognition
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOptions {
    /// Ordered language hints, highest priority first
    pub languages: Vec<String>,
}

/// Text recognized in an image
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecognition {
    pub text: String,
    /// Subset of the hinted languages actually observed in `text`
    pub detected_languages: Vec<String>,
}

/// Which capabilities a provider can actually serve
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProviderCapabilities {
    pub ocr: bool,
    pub face_quality: bool,
    pub card_detection: bool,
}

/// Vision capability provider
///
/// Calls are synchronous and may block; the pipeline runs them on the
/// blocking thread pool.
pub trait VisionProvider: Send + Sync {
    /// Short provider name for logs and health output
    fn name(&self) -> &str;

    fn capabilities(&self) -> ProviderCapabilities;

    fn recognize_text(
        &self,
        image: &DynamicImage,
        options: &RecognitionOptions,
    ) -> ProviderOutcome<TextRecognition>;

    /// Face capture quality in `[0.0, 1.0]` for the most prominent face
    fn score_face_quality(&self, image: &DynamicImage) -> ProviderOutcome<f32>;

    /// Rectified card image, or `NoResult` when no quadrilateral qualifies
    fn detect_card(
        &self,
        image: &DynamicImage,
        options: &CardDetectionOptions,
    ) -> ProviderOutcome<DynamicImage>;
}
