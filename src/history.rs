//! Scan history: the remembered list of past detection results.
//!
//! Modeled as a store behind an injectable backend so the persistence medium
//! stays swappable: one JSON file in production, memory in tests. Records
//! are kept newest-first; there is no schema version and no migration story,
//! losing the file just loses the list.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::DetectionResult;

/// Records shown per history page.
pub const PAGE_SIZE: usize = 6;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization error: {0}")]
    Serialization(String),
}

/// One remembered scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: String,
    pub date: String,
    /// Data-URL preview of the submitted photo.
    pub image: String,
    pub result: DetectionResult,
}

impl ScanRecord {
    /// Build a record for one scan. `index` keeps ids unique within a batch
    /// submitted in the same millisecond.
    pub fn new(image: String, result: DetectionResult, index: usize) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let date = chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        Self {
            id: format!("{millis}-{index}"),
            date,
            image,
            result,
        }
    }
}

/// Persistence seam for the scan history.
pub trait HistoryBackend: Send + Sync {
    fn load(&self) -> Result<Vec<ScanRecord>, HistoryError>;
    fn save(&self, records: &[ScanRecord]) -> Result<(), HistoryError>;
    fn clear(&self) -> Result<(), HistoryError>;
}

/// Single-JSON-file backend.
///
/// A missing file reads as an empty history; clearing removes the file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<ScanRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|e| HistoryError::Serialization(e.to_string()))
    }

    fn save(&self, records: &[ScanRecord]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string(records)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<Vec<ScanRecord>>,
}

impl HistoryBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<ScanRecord>, HistoryError> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn save(&self, records: &[ScanRecord]) -> Result<(), HistoryError> {
        *self.records.lock().unwrap() = records.to_vec();
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

/// One page of history plus enough shape for a pager.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub records: Vec<ScanRecord>,
    pub page: usize,
    pub total_pages: usize,
}

/// Scan history over an injectable backend.
pub struct ScanHistory {
    backend: Arc<dyn HistoryBackend>,
}

impl ScanHistory {
    pub fn new(backend: Arc<dyn HistoryBackend>) -> Self {
        Self { backend }
    }

    /// Current list, newest first.
    pub fn load(&self) -> Result<Vec<ScanRecord>, HistoryError> {
        self.backend.load()
    }

    /// Prepend a batch of records and persist. The batch keeps its own
    /// submission order at the front of the list.
    pub fn append(&self, batch: Vec<ScanRecord>) -> Result<Vec<ScanRecord>, HistoryError> {
        let mut records = batch;
        records.extend(self.backend.load()?);
        self.backend.save(&records)?;
        Ok(records)
    }

    /// Drop the record with the given id and persist.
    pub fn remove(&self, id: &str) -> Result<Vec<ScanRecord>, HistoryError> {
        let mut records = self.backend.load()?;
        records.retain(|r| r.id != id);
        self.backend.save(&records)?;
        Ok(records)
    }

    /// Forget everything.
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.backend.clear()
    }

    /// Zero-based page of `PAGE_SIZE` records. Out-of-range pages are empty.
    pub fn page(&self, page: usize) -> Result<HistoryPage, HistoryError> {
        let records = self.backend.load()?;
        let total_pages = records.len().div_ceil(PAGE_SIZE);
        let records = records
            .into_iter()
            .skip(page.saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect();
        Ok(HistoryPage {
            records,
            page,
            total_pages,
        })
    }
}
