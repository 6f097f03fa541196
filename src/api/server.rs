// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::artifacts::artifact_handler;
use super::card_detection::card_detection_handler;
use super::face_quality::face_quality_handler;
use super::handlers::{
    health_handler, processing_speed_comparison_handler, supported_languages_handler,
};
use super::ocr::ocr_handler;
use crate::config::ServiceConfig;
use crate::pipeline::RequestPipeline;
use crate::vision::VisionModelInfo;

/// Multipart framing on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RequestPipeline>,
    pub config: Arc<ServiceConfig>,
    pub models: Arc<Vec<VisionModelInfo>>,
}

impl AppState {
    pub fn new(config: ServiceConfig, pipeline: RequestPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
            models: Arc::new(Vec::new()),
        }
    }

    pub fn with_models(mut self, models: Vec<VisionModelInfo>) -> Self {
        self.models = Arc::new(models);
        self
    }
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Processing endpoints
        .route("/ocr", post(ocr_handler))
        .route("/face_quality", post(face_quality_handler))
        .route("/card_detection", post(card_detection_handler))
        // Queries
        .route("/supported_languages", get(supported_languages_handler))
        .route(
            "/processing_speed_comparison",
            get(processing_speed_comparison_handler),
        )
        // Artifacts
        .route("/output/:filename", get(artifact_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = state
        .config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address '{}'", state.config.listen_addr))?;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
