// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Output artifact naming

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::metrics::OperationKind;

/// Counters for seconds older than this are dropped; callers that read the
/// clock before taking the lock may arrive slightly out of order.
const RETAIN_SECS: i64 = 60;

/// Issues `{ts}_{kind}_processed.{ext}` paths under the output directory
///
/// The first artifact for a `(second, kind)` pair gets the plain name; later
/// ones in the same second get a `_{n}` suffix. Names are unique per process.
pub struct ArtifactNamer {
    output_dir: PathBuf,
    extension: String,
    issued: Mutex<HashMap<(i64, OperationKind), u32>>,
}

impl ArtifactNamer {
    pub fn new(output_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: extension.into(),
            issued: Mutex::new(HashMap::new()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Reserve the next path for `kind` at `unix_secs`
    pub fn next_path(&self, kind: OperationKind, unix_secs: i64) -> PathBuf {
        let sequence = {
            let mut issued = match self.issued.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            issued.retain(|(ts, _), _| *ts + RETAIN_SECS >= unix_secs);
            let counter = issued.entry((unix_secs, kind)).or_insert(0);
            let sequence = *counter;
            *counter += 1;
            sequence
        };

        self.output_dir
            .join(Self::file_name(unix_secs, kind, sequence, &self.extension))
    }

    fn file_name(unix_secs: i64, kind: OperationKind, sequence: u32, extension: &str) -> String {
        if sequence == 0 {
            format!("{}_{}_processed.{}", unix_secs, kind, extension)
        } else {
            format!("{}_{}_processed_{}.{}", unix_secs, kind, sequence, extension)
        }
    }
}
