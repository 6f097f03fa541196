// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Face quality API endpoint module
//!
//! Provides POST /face_quality for scoring face capture quality.

pub mod handler;
pub mod response;

pub use handler::face_quality_handler;
pub use response::FaceQualityResponse;
