// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request processing pipeline
//!
//! Every processing endpoint runs the same steps through
//! [`RequestPipeline::run`]:
//!
//! 1. Validate that the upload is image-typed
//! 2. Decode and invoke the provider on the blocking pool, timing the call
//! 3. Derive throughput rates from the elapsed time
//! 4. Persist the artifact under the output directory
//! 5. Append a processing record
//!
//! Anything that fails after validation surfaces as a [`PipelineError`];
//! provider-level failures are absorbed by the operations themselves.

pub mod artifacts;
pub mod operations;
pub mod rates;

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use chrono::Utc;
use image::ImageFormat;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::ServiceConfig;
use crate::metrics::{MetricsError, MetricsRecorder, NewProcessingRecord};
use crate::vision::card::CardDetectionOptions;
use crate::vision::image_utils::{decode_image_bytes, encode_image, ImageError};
use crate::vision::provider::VisionProvider;

pub use artifacts::ArtifactNamer;
pub use operations::{
    CardDetectionOp, CardOutcome, FaceQualityOp, Invocation, OcrOutput, TextRecognitionOp,
    VisionOperation,
};
pub use rates::{round4, ProcessingRates};

/// Human-readable timestamp format used in responses
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("Failed to write artifact: {0}")]
    Artifact(#[source] ImageError),

    #[error("Failed to record processing result: {0}")]
    Persistence(#[from] MetricsError),

    #[error("Processing task failed: {0}")]
    Internal(String),
}

impl PipelineError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}

/// An uploaded file as received from the HTTP layer
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            data,
        }
    }

    /// The declared content type must be `image/*`
    pub fn validate(&self) -> Result<(), PipelineError> {
        match self.content_type.as_deref() {
            Some(content_type) if content_type.trim().to_ascii_lowercase().starts_with("image/") => {
                Ok(())
            }
            Some(content_type) => Err(PipelineError::Validation(format!(
                "File must be an image, got content type '{}'",
                content_type
            ))),
            None => Err(PipelineError::Validation(
                "File must be an image, no content type given".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Fields common to every processing response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingSummary {
    /// Wall time of decode plus provider call, in seconds
    pub processing_time: f64,
    pub fast_rate: f64,
    pub cooling_rate: f64,
    pub output_path: String,
    pub created_at: String,
    pub result_id: i64,
}

/// Successful pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome<T> {
    pub payload: T,
    /// Dimensions of the persisted artifact
    pub dimensions: Dimensions,
    pub summary: ProcessingSummary,
}

pub struct RequestPipeline {
    provider: Arc<dyn VisionProvider>,
    metrics: MetricsRecorder,
    namer: ArtifactNamer,
    artifact_format: ImageFormat,
    max_upload_bytes: usize,
    cooling_factor: f64,
    default_languages: Vec<String>,
    card_options: CardDetectionOptions,
}

impl RequestPipeline {
    pub fn new(
        config: &ServiceConfig,
        provider: Arc<dyn VisionProvider>,
        metrics: MetricsRecorder,
    ) -> Self {
        Self {
            provider,
            metrics,
            namer: ArtifactNamer::new(
                config.output_dir.clone(),
                config.artifact_format.extension(),
            ),
            artifact_format: config.artifact_format.image_format(),
            max_upload_bytes: config.max_upload_bytes,
            cooling_factor: config.rates.cooling_factor,
            default_languages: config.ocr.default_languages.clone(),
            card_options: config.card.clone(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn VisionProvider> {
        &self.provider
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn artifacts(&self) -> &ArtifactNamer {
        &self.namer
    }

    pub fn default_languages(&self) -> &[String] {
        &self.default_languages
    }

    /// Text recognition with the requested hints, or the configured pair
    pub fn text_recognition(&self, languages: Option<Vec<String>>) -> TextRecognitionOp {
        let languages = languages
            .filter(|langs| !langs.is_empty())
            .unwrap_or_else(|| self.default_languages.clone());
        TextRecognitionOp::new(languages)
    }

    pub fn card_detection(&self) -> CardDetectionOp {
        CardDetectionOp::new(self.card_options.clone())
    }

    /// Run one operation over an upload
    pub async fn run<O: VisionOperation>(
        &self,
        upload: ImageUpload,
        operation: O,
    ) -> Result<PipelineOutcome<O::Output>, PipelineError> {
        let kind = operation.kind();
        let filename = upload.filename.clone();

        let result = self.run_steps(upload, operation).await;
        match &result {
            Ok(outcome) => info!(
                %kind,
                filename = %filename,
                result_id = outcome.summary.result_id,
                processing_time = outcome.summary.processing_time,
                output_path = %outcome.summary.output_path,
                "Request processed"
            ),
            Err(e) if e.is_client_error() => warn!(%kind, filename = %filename, "Rejected upload: {}", e),
            Err(e) => error!(%kind, filename = %filename, "Processing failed: {}", e),
        }
        result
    }

    async fn run_steps<O: VisionOperation>(
        &self,
        upload: ImageUpload,
        operation: O,
    ) -> Result<PipelineOutcome<O::Output>, PipelineError> {
        upload.validate()?;

        let kind = operation.kind();
        let provider = self.provider.clone();
        let max_upload_bytes = self.max_upload_bytes;
        let data = upload.data;

        let (operation, invocation, elapsed) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let (image, info) =
                decode_image_bytes(&data, max_upload_bytes).map_err(PipelineError::Decode)?;
            debug!(
                %kind,
                width = info.width,
                height = info.height,
                size_bytes = info.size_bytes,
                "Decoded upload"
            );
            let invocation = operation.invoke(provider.as_ref(), image);
            let elapsed = start.elapsed().as_secs_f64();
            Ok::<_, PipelineError>((operation, invocation, elapsed))
        })
        .await
        .map_err(|e| PipelineError::Internal(e.to_string()))??;

        let rates = ProcessingRates::from_elapsed(elapsed, self.cooling_factor);

        let Invocation { payload, artifact } = invocation;
        let dimensions = Dimensions {
            width: artifact.width(),
            height: artifact.height(),
        };

        let artifact_path = self.namer.next_path(kind, Utc::now().timestamp());
        let format = self.artifact_format;
        let write_path = artifact_path.clone();
        tokio::task::spawn_blocking(move || encode_image(&artifact, &write_path, format))
            .await
            .map_err(|e| PipelineError::Internal(e.to_string()))?
            .map_err(PipelineError::Artifact)?;
        debug!(%kind, path = %artifact_path.display(), "Artifact written");

        let result_text = operation.record_result(&payload, &artifact_path);
        let appended = self
            .metrics
            .append(NewProcessingRecord::new(
                upload.filename,
                kind,
                result_text,
                elapsed,
            ))
            .await;
        let record = match appended {
            Ok(record) => record,
            Err(e) => {
                // No record will reference the artifact
                if let Err(remove_err) = tokio::fs::remove_file(&artifact_path).await {
                    warn!(
                        %kind,
                        path = %artifact_path.display(),
                        "Failed to remove unrecorded artifact: {}",
                        remove_err
                    );
                }
                return Err(e.into());
            }
        };

        Ok(PipelineOutcome {
            payload,
            dimensions,
            summary: ProcessingSummary {
                processing_time: record.processing_time,
                fast_rate: rates.fast_rate,
                cooling_rate: rates.cooling_rate,
                output_path: artifact_path.to_string_lossy().into_owned(),
                created_at: record.created_at.format(CREATED_AT_FORMAT).to_string(),
                result_id: record.id,
            },
        })
    }
}
