// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text recognition for the local vision provider
//!
//! Components:
//! - `model` - ocrs engine wrapper
//! - `languages` - Supported language hints and script detection

pub mod languages;
pub mod model;

pub use languages::{
    default_languages, detect_languages, is_supported, parse_language_list, supported_languages,
};
pub use model::OcrModel;
