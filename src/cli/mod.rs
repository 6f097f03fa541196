// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::ServiceConfig;

/// Fabstir Vision Node
#[derive(Parser, Debug, Default)]
#[command(name = "fabstir-vision-node")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "HTTP image analysis service: OCR, face quality and card detection", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "VISION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(long, env = "VISION_LISTEN_ADDR")]
    pub listen_addr: Option<String>,

    /// SQLite database holding processing records
    #[arg(long, env = "VISION_DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Directory where processed images are written
    #[arg(long, env = "VISION_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding text-detection.rten and text-recognition.rten
    #[arg(long, env = "VISION_OCR_MODEL_DIR")]
    pub ocr_model_dir: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then flags
    pub fn load_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ServiceConfig::default(),
        };

        if let Some(addr) = &self.listen_addr {
            config.listen_addr = addr.clone();
        }
        if let Some(path) = &self.database_path {
            config.database_path = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.ocr_model_dir {
            config.ocr.model_dir = Some(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
