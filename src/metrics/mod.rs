// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Processing metrics
//!
//! Persists one record per processed request and aggregates processing
//! times per operation kind.

pub mod model;
pub mod store;

pub use model::{
    NewProcessingRecord, OperationKind, OperationStats, ProcessingRecord, SpeedComparison,
};
pub use store::{MetricsError, MetricsRecorder};
