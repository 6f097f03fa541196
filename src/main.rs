// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use fabstir_vision_node::{
    api::{start_server, AppState},
    cli::Cli,
    metrics::MetricsRecorder,
    pipeline::RequestPipeline,
    vision::{LocalVisionProvider, VisionModelConfig, VisionModelManager, VisionProvider},
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🚀 Starting Fabstir Vision Node...\n");
    println!("📦 BUILD VERSION: {}", fabstir_vision_node::version::VERSION);
    println!("📅 Build Date: {}", fabstir_vision_node::version::BUILD_DATE);
    println!(
        "✨ Features: {}",
        fabstir_vision_node::version::FEATURES.join(", ")
    );
    println!();
    tracing::info!("{}", fabstir_vision_node::version::get_version_string());

    let cli = Cli::parse();
    let config = cli.load_config()?;
    tracing::info!(?config, "Configuration loaded");

    // Metrics store and output directory
    let metrics = MetricsRecorder::open(&config.database_path).with_context(|| {
        format!(
            "failed to open metrics database {}",
            config.database_path.display()
        )
    })?;
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    println!("✅ Metrics store ready at {}", config.database_path.display());

    // Vision models (missing models degrade to empty OCR results)
    println!("🧠 Loading vision models...");
    let models = VisionModelManager::new(VisionModelConfig {
        ocr_model_dir: config.ocr.model_dir.clone(),
    })
    .await?;
    if models.has_ocr() {
        println!("✅ OCR models loaded");
    } else {
        println!("⚠️  OCR models not available, /ocr will return empty text");
    }

    let provider: Arc<dyn VisionProvider> =
        Arc::new(LocalVisionProvider::new(models.get_ocr_model()));
    let pipeline = RequestPipeline::new(&config, provider, metrics);
    let state = AppState::new(config, pipeline).with_models(models.list_models());

    println!("🌐 Listening on http://{}", state.config.listen_addr);
    start_server(state).await?;

    println!("👋 Fabstir Vision Node stopped");
    Ok(())
}
