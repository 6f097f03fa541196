// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Processing record storage and aggregation service

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::Connection;
use thiserror::Error;

use super::model::{
    NewProcessingRecord, OperationKind, OperationStats, ProcessingRecord, SpeedComparison,
};

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to prepare storage directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage connection lock poisoned")]
    LockPoisoned,

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, MetricsError>;

/// Underlying SQLite store (synchronous)
struct MetricsStore {
    conn: Mutex<Connection>,
}

impl MetricsStore {
    fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(db_path)?)
    }

    fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS processing_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                processing_type TEXT NOT NULL
                    CHECK (processing_type IN ('ocr', 'face_quality', 'card_detection')),
                result TEXT NOT NULL,
                processing_time REAL NOT NULL CHECK (processing_time >= 0),
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_processing_type ON processing_results(processing_type);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| MetricsError::LockPoisoned)
    }

    fn insert(&self, record: NewProcessingRecord) -> Result<ProcessingRecord> {
        let created_at = Utc::now();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO processing_results (filename, processing_type, result, processing_time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                record.filename,
                record.operation_kind.as_str(),
                record.result,
                record.processing_time,
                created_at.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(ProcessingRecord {
            id,
            filename: record.filename,
            operation_kind: record.operation_kind,
            result: record.result,
            processing_time: record.processing_time,
            created_at,
        })
    }

    fn stats_for(&self, kind: OperationKind) -> Result<OperationStats> {
        let conn = self.lock()?;
        let stats = conn.query_row(
            "SELECT COUNT(*), COALESCE(AVG(processing_time), 0.0), COALESCE(MIN(processing_time), 0.0), COALESCE(MAX(processing_time), 0.0)
             FROM processing_results WHERE processing_type = ?1",
            [kind.as_str()],
            |row| {
                Ok(OperationStats {
                    count: row.get(0)?,
                    avg_time: row.get(1)?,
                    min_time: row.get(2)?,
                    max_time: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }

    fn compare_all(&self) -> Result<SpeedComparison> {
        let mut comparison = SpeedComparison::default();
        for kind in OperationKind::ALL {
            comparison.set(kind, self.stats_for(kind)?);
        }
        Ok(comparison)
    }
}

/// Async processing metrics service (public API)
///
/// Appends are synchronous inserts on the blocking pool, so a successful
/// `append` means the record is durable and counted by later queries.
#[derive(Clone)]
pub struct MetricsRecorder {
    store: Arc<MetricsStore>,
}

impl MetricsRecorder {
    /// Open (or create) the SQLite database at `db_path`
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = MetricsStore::open(db_path.as_ref())?;
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// In-memory store, lost on drop
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            store: Arc::new(MetricsStore::open_in_memory()?),
        })
    }

    /// Store a record and return it with its assigned id and timestamp
    pub async fn append(&self, record: NewProcessingRecord) -> Result<ProcessingRecord> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.insert(record)).await?
    }

    /// Aggregates for one operation kind; all zero when there are no records
    pub async fn stats_for(&self, kind: OperationKind) -> Result<OperationStats> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.stats_for(kind)).await?
    }

    /// Aggregates for every operation kind
    pub async fn compare_all(&self) -> Result<SpeedComparison> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.compare_all()).await?
    }
}
