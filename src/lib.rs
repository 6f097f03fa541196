// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod metrics;
pub mod pipeline;
pub mod version;
pub mod vision;

pub use api::{create_router, start_server, AppState};
pub use config::ServiceConfig;
pub use metrics::{MetricsRecorder, OperationKind, OperationStats};
pub use pipeline::{ImageUpload, PipelineError, RequestPipeline};
pub use vision::{LocalVisionProvider, ProviderOutcome, VisionProvider};
