// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card rectangle detection and perspective correction
//!
//! Components:
//! - `detection` - Quadrilateral search over edge contours
//! - `rectify` - Projective warp onto the canonical card rectangle

pub mod detection;
pub mod rectify;

use serde::{Deserialize, Serialize};

pub use detection::{find_card_quad, Quad};
pub use rectify::rectify;

/// Tunables for card detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDetectionOptions {
    /// Output width of the rectified card
    pub canonical_width: u32,
    /// Output height of the rectified card
    pub canonical_height: u32,
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    /// Allowed deviation of each corner from 90 degrees
    pub quadrature_tolerance_degrees: f32,
    /// Smallest accepted quad, as a fraction of the image area
    pub min_area_fraction: f32,
}

impl Default for CardDetectionOptions {
    fn default() -> Self {
        Self {
            canonical_width: 640,
            canonical_height: 400,
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 2.0,
            quadrature_tolerance_degrees: 10.0,
            min_area_fraction: 0.1,
        }
    }
}
