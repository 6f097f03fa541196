// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OCR query parameters and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::vision::ocr::{is_supported, parse_language_list};

/// Query string of `POST /ocr`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrQuery {
    /// Comma-separated language codes, highest priority first
    #[serde(default)]
    pub languages: Option<String>,
}

impl OcrQuery {
    /// Parsed language hints, or `None` to use the configured defaults
    pub fn language_hints(&self) -> Result<Option<Vec<String>>, ApiError> {
        let Some(raw) = self.languages.as_deref() else {
            return Ok(None);
        };

        let languages = parse_language_list(raw);
        if languages.is_empty() {
            return Ok(None);
        }

        let unsupported: Vec<&str> = languages
            .iter()
            .map(String::as_str)
            .filter(|code| !is_supported(code))
            .collect();
        if !unsupported.is_empty() {
            return Err(ApiError::ValidationError {
                field: "languages".to_string(),
                message: format!(
                    "unsupported language(s) {:?}, see GET /supported_languages",
                    unsupported
                ),
            });
        }

        Ok(Some(languages))
    }
}
