// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Defaults are overridden by an optional TOML file, then by CLI flags and
//! environment variables (see [`crate::cli`]).

use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vision::card::CardDetectionOptions;
use crate::vision::image_utils::MAX_IMAGE_SIZE;
use crate::vision::ocr::default_languages;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Image format used for persisted artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
}

impl ArtifactFormat {
    pub fn image_format(&self) -> ImageFormat {
        match self {
            ArtifactFormat::Png => ImageFormat::Png,
            ArtifactFormat::Jpg => ImageFormat::Jpeg,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Png => "png",
            ArtifactFormat::Jpg => "jpg",
        }
    }
}

/// Throughput metric settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Divisor factor applied to elapsed time for the cooling rate
    pub cooling_factor: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self { cooling_factor: 1.5 }
    }
}

/// Text recognition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language hints used when a request names none
    pub default_languages: Vec<String>,
    /// Directory holding the ocrs `.rten` models
    pub model_dir: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            default_languages: default_languages(),
            model_dir: std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .ok()
                .map(|home| Path::new(&home).join(".cache/ocrs")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub listen_addr: String,
    pub database_path: PathBuf,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub artifact_format: ArtifactFormat,
    pub rates: RateConfig,
    pub ocr: OcrConfig,
    pub card: CardDetectionOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            database_path: PathBuf::from("processing_results.db"),
            output_dir: PathBuf::from("output"),
            max_upload_bytes: MAX_IMAGE_SIZE,
            artifact_format: ArtifactFormat::default(),
            rates: RateConfig::default(),
            ocr: OcrConfig::default(),
            card: CardDetectionOptions::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rates.cooling_factor.is_finite() && self.rates.cooling_factor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rates.cooling_factor must be positive, got {}",
                self.rates.cooling_factor
            )));
        }
        if self.ocr.default_languages.is_empty() {
            return Err(ConfigError::Invalid(
                "ocr.default_languages must not be empty".to_string(),
            ));
        }
        if self.card.canonical_width == 0 || self.card.canonical_height == 0 {
            return Err(ConfigError::Invalid(
                "card canonical dimensions must be non-zero".to_string(),
            ));
        }
        if self.card.min_aspect_ratio > self.card.max_aspect_ratio {
            return Err(ConfigError::Invalid(format!(
                "card.min_aspect_ratio ({}) exceeds card.max_aspect_ratio ({})",
                self.card.min_aspect_ratio, self.card.max_aspect_ratio
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
