// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The three processing operations run by [`super::RequestPipeline`]
//!
//! Each operation calls one provider capability and turns its outcome into a
//! payload plus the image persisted as the request's artifact. Provider
//! failures and empty results never escape: they collapse into empty text,
//! a zero score, or the unchanged input image.

use std::path::Path;

use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::OperationKind;
use crate::vision::card::CardDetectionOptions;
use crate::vision::provider::{ProviderOutcome, RecognitionOptions, VisionProvider};

/// Result of invoking an operation against a provider
pub struct Invocation<T> {
    pub payload: T,
    /// Image persisted for this request (possibly the unchanged input)
    pub artifact: DynamicImage,
}

/// One kind of request the pipeline can run
pub trait VisionOperation: Send + 'static {
    type Output: Send + 'static;

    fn kind(&self) -> OperationKind;

    /// Call the provider. Runs on the blocking pool and must not fail.
    fn invoke(&self, provider: &dyn VisionProvider, image: DynamicImage)
        -> Invocation<Self::Output>;

    /// Text stored in the processing record
    fn record_result(&self, output: &Self::Output, artifact_path: &Path) -> String;
}

/// Collapse a provider outcome into an `Option`, logging why nothing came back
fn resolve<T>(kind: OperationKind, provider: &str, outcome: ProviderOutcome<T>) -> Option<T> {
    match outcome {
        ProviderOutcome::Found(value) => Some(value),
        ProviderOutcome::NoResult => {
            debug!(%kind, provider, "Provider found nothing, using fallback");
            None
        }
        ProviderOutcome::Failed(reason) => {
            warn!(%kind, provider, %reason, "Provider call failed, using fallback");
            None
        }
    }
}

// Text recognition

#[derive(Debug, Clone)]
pub struct TextRecognitionOp {
    pub options: RecognitionOptions,
}

impl TextRecognitionOp {
    pub fn new(languages: Vec<String>) -> Self {
        Self {
            options: RecognitionOptions { languages },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrOutput {
    pub text: String,
    pub requested_languages: Vec<String>,
    /// Always present; empty when nothing was recognized
    pub detected_languages: Vec<String>,
}

impl VisionOperation for TextRecognitionOp {
    type Output = OcrOutput;

    fn kind(&self) -> OperationKind {
        OperationKind::Ocr
    }

    fn invoke(&self, provider: &dyn VisionProvider, image: DynamicImage) -> Invocation<OcrOutput> {
        let recognized = resolve(
            self.kind(),
            provider.name(),
            provider.recognize_text(&image, &self.options),
        );

        let (text, detected_languages) = match recognized {
            Some(recognition) => (recognition.text, recognition.detected_languages),
            None => (String::new(), Vec::new()),
        };

        Invocation {
            payload: OcrOutput {
                text,
                requested_languages: self.options.languages.clone(),
                detected_languages,
            },
            artifact: image,
        }
    }

    fn record_result(&self, output: &OcrOutput, _artifact_path: &Path) -> String {
        output.text.clone()
    }
}

// Face quality

#[derive(Debug, Clone, Copy, Default)]
pub struct FaceQualityOp;

impl VisionOperation for FaceQualityOp {
    type Output = f32;

    fn kind(&self) -> OperationKind {
        OperationKind::FaceQuality
    }

    fn invoke(&self, provider: &dyn VisionProvider, image: DynamicImage) -> Invocation<f32> {
        let score = resolve(self.kind(), provider.name(), provider.score_face_quality(&image))
            .filter(|score| score.is_finite())
            .map(|score| score.clamp(0.0, 1.0))
            .unwrap_or(0.0);

        Invocation {
            payload: score,
            artifact: image,
        }
    }

    fn record_result(&self, output: &f32, _artifact_path: &Path) -> String {
        output.to_string()
    }
}

// Card detection

#[derive(Debug, Clone)]
pub struct CardDetectionOp {
    pub options: CardDetectionOptions,
}

impl CardDetectionOp {
    pub fn new(options: CardDetectionOptions) -> Self {
        Self { options }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardOutcome {
    /// False when the input image was returned unchanged
    pub detected: bool,
}

impl CardOutcome {
    pub fn message(&self) -> &'static str {
        if self.detected {
            "Card detected and corrected"
        } else {
            "No card detected, original image returned"
        }
    }
}

impl VisionOperation for CardDetectionOp {
    type Output = CardOutcome;

    fn kind(&self) -> OperationKind {
        OperationKind::CardDetection
    }

    fn invoke(&self, provider: &dyn VisionProvider, image: DynamicImage) -> Invocation<CardOutcome> {
        match resolve(
            self.kind(),
            provider.name(),
            provider.detect_card(&image, &self.options),
        ) {
            Some(rectified) => Invocation {
                payload: CardOutcome { detected: true },
                artifact: rectified,
            },
            None => Invocation {
                payload: CardOutcome { detected: false },
                artifact: image,
            },
        }
    }

    fn record_result(&self, _output: &CardOutcome, artifact_path: &Path) -> String {
        artifact_path.to_string_lossy().into_owned()
    }
}
