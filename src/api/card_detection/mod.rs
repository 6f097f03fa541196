// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Card detection API endpoint module
//!
//! Provides POST /card_detection for detecting a card and correcting its
//! perspective.

pub mod handler;
pub mod response;

pub use handler::card_detection_handler;
pub use response::CardDetectionResponse;
