// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for CPU-based image analysis
//!
//! This module provides:
//! - Image decoding and artifact encoding
//! - The [`VisionProvider`] capability interface
//! - A local provider: OCR via ocrs, card rectification via imageproc

pub mod card;
pub mod face;
pub mod image_utils;
pub mod local;
pub mod model_manager;
pub mod ocr;
pub mod provider;

pub use card::CardDetectionOptions;
pub use face::FaceQualityScorer;
pub use image_utils::{decode_image_bytes, detect_format, encode_image, ImageError, ImageInfo};
pub use local::LocalVisionProvider;
pub use model_manager::{VisionModelConfig, VisionModelInfo, VisionModelManager};
pub use provider::{
    ProviderCapabilities, ProviderOutcome, RecognitionOptions, TextRecognition, VisionProvider,
};
