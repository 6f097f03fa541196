// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Perspective correction onto the canonical card rectangle

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use tracing::{debug, warn};

use super::Quad;

/// Warp the region bounded by `quad` onto a `width` x `height` rectangle.
///
/// Returns `None` if the corners do not define an invertible projection.
pub fn rectify(image: &DynamicImage, quad: &Quad, width: u32, height: u32) -> Option<DynamicImage> {
    if width == 0 || height == 0 {
        return None;
    }

    let dest: [(f32, f32); 4] = [
        (0.0, 0.0),
        (width as f32, 0.0),
        (width as f32, height as f32),
        (0.0, height as f32),
    ];

    // from_control_points computes the mapping from `src` to `dest`
    let Some(projection) = Projection::from_control_points(quad.corners, dest) else {
        warn!(corners = ?quad.corners, "Card corners do not define a projection");
        return None;
    };

    let input = image.to_rgba8();
    let mut output = RgbaImage::new(width, height);
    warp_into(
        &input,
        &projection,
        Interpolation::Bilinear,
        Rgba([0, 0, 0, 255]),
        &mut output,
    );

    debug!(width, height, "Card perspective corrected");
    Some(DynamicImage::ImageRgba8(output))
}
