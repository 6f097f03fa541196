// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision model manager for loading the OCR models

use std::path::PathBuf;
use std::sync::Arc;

use crate::vision::ocr::OcrModel;

/// Configuration for loading vision models
#[derive(Debug, Clone, Default)]
pub struct VisionModelConfig {
    /// Path to the OCR model directory (optional)
    pub ocr_model_dir: Option<PathBuf>,
}

/// Information about a loaded vision model
#[derive(Debug, Clone, serde::Serialize)]
pub struct VisionModelInfo {
    /// Model name
    pub name: String,
    /// Model type (ocr)
    pub model_type: String,
    /// Whether the model is available
    pub available: bool,
}

/// Manager for vision models
///
/// Missing model directories are handled gracefully: the manager comes up
/// without the model and OCR requests fall back to empty text.
pub struct VisionModelManager {
    ocr_model: Option<Arc<OcrModel>>,
}

impl VisionModelManager {
    /// Create a new VisionModelManager with the given configuration
    pub async fn new(config: VisionModelConfig) -> anyhow::Result<Self> {
        let ocr_model = match config.ocr_model_dir {
            Some(dir) => {
                let load_dir = dir.clone();
                match tokio::task::spawn_blocking(move || OcrModel::load(&load_dir)).await? {
                    Ok(model) => {
                        tracing::info!("✅ OCR models loaded from {}", dir.display());
                        Some(Arc::new(model))
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ Failed to load OCR models from {}: {}", dir.display(), e);
                        None
                    }
                }
            }
            None => None,
        };

        Ok(Self { ocr_model })
    }

    /// Get the OCR model if available
    pub fn get_ocr_model(&self) -> Option<Arc<OcrModel>> {
        self.ocr_model.clone()
    }

    /// Check if OCR is available
    pub fn has_ocr(&self) -> bool {
        self.ocr_model.is_some()
    }

    /// List all vision models and whether they loaded
    pub fn list_models(&self) -> Vec<VisionModelInfo> {
        vec![VisionModelInfo {
            name: "ocrs".to_string(),
            model_type: "ocr".to_string(),
            available: self.ocr_model.is_some(),
        }]
    }
}
