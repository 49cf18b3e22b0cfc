//! Persistence port.
//!
//! The dataset lives under a single key as one JSON array. The core never
//! reads or writes it directly; it goes through a [`RecordStore`], so the
//! file-backed store used by the CLI and the in-memory store used by tests
//! are interchangeable.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::booking::BookingRecord;

/// Key the dataset is stored under.
pub const STORAGE_KEY: &str = "event-pulse-events";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value storage for the serialized dataset.
pub trait RecordStore {
    /// Raw text stored under the key, or `None` when nothing is stored.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace whatever is stored under the key.
    fn save(&mut self, payload: &str) -> Result<(), StoreError>;

    /// Remove the stored entry. Clearing an absent entry is not an error.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Serialize `records` compactly and save them through `store`.
pub fn save_records<S: RecordStore + ?Sized>(
    store: &mut S,
    records: &[BookingRecord],
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(records)?;
    store.save(&payload)
}

/// Store backed by `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn write_atomic(&self, path: &Path, payload: &str) -> Result<(), io::Error> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", self.key));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path)
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn save(&mut self, payload: &str) -> Result<(), StoreError> {
        let path = self.path();
        self.write_atomic(&path, payload)
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), bytes = payload.len(), "saved dataset");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}

/// Volatile store keyed like the real one; useful for tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
            entries: HashMap::new(),
        }
    }

    /// A store that already holds `payload`.
    pub fn holding(payload: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(store.key.clone(), payload.into());
        store
    }

    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.entries.get(&self.key).map(String::as_str)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.peek().map(str::to_string))
    }

    fn save(&mut self, payload: &str) -> Result<(), StoreError> {
        self.entries.insert(self.key.clone(), payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.remove(&self.key);
        Ok(())
    }
}
