//! History store backends
//!
//! - Local: JSON file under the user's data directory
//! - Memory: in-process store for tests and throwaway sessions

use super::{GameRecord, NewRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// File could not be read or written
    Io(String),
    /// File contents are not valid history JSON
    Format(String),
    /// No record with this id
    NotFound(u64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "History storage error: {e}"),
            Self::Format(e) => write!(f, "History file is corrupt: {e}"),
            Self::NotFound(id) => write!(f, "No history record with id {id}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence for completed games
pub trait HistoryStore: Send + Sync {
    /// Store a completed game, assigning its id and timestamp
    fn record(&self, record: NewRecord) -> StoreResult<GameRecord>;

    /// All records, newest first
    fn list(&self) -> StoreResult<Vec<GameRecord>>;

    /// Remove one record
    fn delete(&self, id: u64) -> StoreResult<()>;

    /// Backend name for display
    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryData {
    next_id: u64,
    records: Vec<GameRecord>,
}

impl HistoryData {
    fn insert(&mut self, record: NewRecord) -> GameRecord {
        self.next_id += 1;
        let stored = GameRecord::stamp(self.next_id, record);
        self.records.push(stored.clone());
        stored
    }

    fn newest_first(&self) -> Vec<GameRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }

    fn remove(&mut self, id: u64) -> StoreResult<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            Err(StoreError::NotFound(id))
        } else {
            Ok(())
        }
    }
}

// ==================== Local File Backend ====================

/// File-based history
pub struct LocalHistoryStore {
    path: PathBuf,
    cache: Mutex<Option<HistoryData>>,
}

impl LocalHistoryStore {
    pub const FILE_NAME: &'static str = "hitblow_history.json";

    /// Store at the default location in the user's local data directory
    #[must_use]
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::FILE_NAME);
        Self::at(path)
    }

    /// Store at an explicit path
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<HistoryData> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(ref data) = *cache {
            return Ok(data.clone());
        }

        let data = match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                serde_json::from_str(&json).map_err(|e| StoreError::Format(e.to_string()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HistoryData::default(),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        *cache = Some(data.clone());
        Ok(data)
    }

    fn save(&self, data: &HistoryData) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(data).map_err(|e| StoreError::Format(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io(e.to_string()))?;

        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(data.clone());
        Ok(())
    }
}

impl Default for LocalHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for LocalHistoryStore {
    fn record(&self, record: NewRecord) -> StoreResult<GameRecord> {
        let mut data = self.load()?;
        let stored = data.insert(record);
        self.save(&data)?;
        Ok(stored)
    }

    fn list(&self) -> StoreResult<Vec<GameRecord>> {
        Ok(self.load()?.newest_first())
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut data = self.load()?;
        data.remove(id)?;
        self.save(&data)
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

// ==================== In-Memory Backend ====================

/// History kept only for the lifetime of the process
#[derive(Default)]
pub struct MemoryHistoryStore {
    data: Mutex<HistoryData>,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn record(&self, record: NewRecord) -> StoreResult<GameRecord> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(data.insert(record))
    }

    fn list(&self) -> StoreResult<Vec<GameRecord>> {
        let data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(data.newest_first())
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.remove(id)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
