// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Throughput metrics derived from elapsed processing time

use serde::Serialize;

/// Round to 4 decimal digits
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Inverse-time rates reported with every processed request
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProcessingRates {
    /// `1 / elapsed`
    pub fast_rate: f64,
    /// `1 / (elapsed * cooling_factor)`
    pub cooling_rate: f64,
}

impl ProcessingRates {
    /// Both rates are zero when `elapsed_secs` is zero (or not a usable time)
    pub fn from_elapsed(elapsed_secs: f64, cooling_factor: f64) -> Self {
        if !(elapsed_secs.is_finite() && elapsed_secs > 0.0) {
            return Self::default();
        }

        let scaled = elapsed_secs * cooling_factor;
        let cooling_rate = if scaled.is_finite() && scaled > 0.0 {
            round4(1.0 / scaled)
        } else {
            0.0
        };

        Self {
            fast_rate: round4(1.0 / elapsed_secs),
            cooling_rate,
        }
    }
}
