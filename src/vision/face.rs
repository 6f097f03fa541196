// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pluggable face-capture quality backend

use image::DynamicImage;

/// Face capture quality scoring backend.
///
/// Implement this trait to plug a face model (ONNX, dlib, a platform
/// framework) into [`crate::vision::LocalVisionProvider`].
pub trait FaceQualityScorer: Send + Sync {
    /// Quality of the most prominent face, or `None` when no face is found.
    fn score(&self, image: &DynamicImage) -> anyhow::Result<Option<f32>>;
}
