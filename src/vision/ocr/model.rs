// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ocrs model wrapper for text detection and recognition

use std::path::Path;

use anyhow::Result;
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;

/// Detection model file expected in the model directory
pub const DETECTION_MODEL_FILE: &str = "text-detection.rten";
/// Recognition model file expected in the model directory
pub const RECOGNITION_MODEL_FILE: &str = "text-recognition.rten";

/// Text extraction backed by the ocrs engine
///
/// Runs on CPU. Loading fails if either model file is missing.
pub struct OcrModel {
    engine: OcrEngine,
}

impl OcrModel {
    /// Load detection and recognition models from `model_dir`
    pub fn load(model_dir: &Path) -> Result<Self> {
        let detection_model_path = model_dir.join(DETECTION_MODEL_FILE);
        let recognition_model_path = model_dir.join(RECOGNITION_MODEL_FILE);

        if !detection_model_path.exists() || !recognition_model_path.exists() {
            anyhow::bail!(
                "OCR models not found. Expected locations:\n  - {}\n  - {}",
                detection_model_path.display(),
                recognition_model_path.display()
            );
        }

        let detection_model = Model::load_file(&detection_model_path)?;
        let recognition_model = Model::load_file(&recognition_model_path)?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })?;

        Ok(Self { engine })
    }

    /// Extract all text, one space between recognized lines
    pub fn recognize(&self, image: &DynamicImage) -> Result<String> {
        let rgb = image.to_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())?;
        let input = self.engine.prepare_input(source)?;
        let text = self.engine.get_text(&input)?;

        Ok(join_lines(&text))
    }
}

fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
