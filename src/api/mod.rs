// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod artifacts;
pub mod card_detection;
pub mod errors;
pub mod face_quality;
pub mod handlers;
pub mod ocr;
pub mod server;
pub mod upload;

pub use card_detection::{card_detection_handler, CardDetectionResponse};
pub use errors::{ApiError, ErrorResponse};
pub use face_quality::{face_quality_handler, FaceQualityResponse};
pub use handlers::HealthResponse;
pub use ocr::{ocr_handler, LanguageInfo, OcrQuery, OcrResponse};
pub use server::{create_router, start_server, AppState};
