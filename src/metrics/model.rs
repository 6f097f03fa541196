// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Processing record data model

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of processing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Ocr,
    FaceQuality,
    CardDetection,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Ocr,
        OperationKind::FaceQuality,
        OperationKind::CardDetection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Ocr => "ocr",
            OperationKind::FaceQuality => "face_quality",
            OperationKind::CardDetection => "card_detection",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record waiting to be stored
#[derive(Debug, Clone)]
pub struct NewProcessingRecord {
    pub filename: String,
    pub operation_kind: OperationKind,
    pub result: String,
    pub processing_time: f64,
}

impl NewProcessingRecord {
    /// Negative or non-finite times are clamped to zero
    pub fn new(
        filename: impl Into<String>,
        operation_kind: OperationKind,
        result: impl Into<String>,
        processing_time: f64,
    ) -> Self {
        let processing_time = if processing_time.is_finite() {
            processing_time.max(0.0)
        } else {
            0.0
        };
        Self {
            filename: filename.into(),
            operation_kind,
            result: result.into(),
            processing_time,
        }
    }
}

/// Stored processing record
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingRecord {
    pub id: i64,
    pub filename: String,
    pub operation_kind: OperationKind,
    pub result: String,
    pub processing_time: f64,
    pub created_at: DateTime<Utc>,
}

/// Processing time aggregates for one operation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OperationStats {
    pub count: u64,
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
}

/// Stats for every operation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpeedComparison {
    pub ocr: OperationStats,
    pub face_quality: OperationStats,
    pub card_detection: OperationStats,
}

impl SpeedComparison {
    pub(crate) fn set(&mut self, kind: OperationKind, stats: OperationStats) {
        match kind {
            OperationKind::Ocr => self.ocr = stats,
            OperationKind::FaceQuality => self.face_quality = stats,
            OperationKind::CardDetection => self.card_detection = stats,
        }
    }
}
