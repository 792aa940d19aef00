//! Key-value persistence surface.
//!
//! Models a browser's local storage: a flat namespace of string keys and
//! string values with a single writer. [`FileStore`] keeps one file per key
//! under a data directory; [`MemoryStore`] backs tests and ephemeral runs.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory name under the platform data dir for the default store.
const APP_DIR: &str = "tipsplit";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("failed to serialize store value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A namespaced string key-value store with single-writer discipline.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError>;

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError>;

    /// Removes the key entirely. Removing an absent key is not an error.
    fn remove(
        &mut self,
        key: &str,
    ) -> Result<(), StoreError>;
}

/// File-backed store: one `<key>.json` file per key under `dir`.
///
/// Writes go through a temp file plus rename so a crash mid-write never
/// leaves a half-written value behind.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store in the platform data directory
    /// (e.g. `~/.local/share/tipsplit`), creating it if missing.
    pub fn open_default() -> Result<Self, StoreError> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Self::open(base.join(APP_DIR))
    }

    /// Opens the store in an explicit directory, creating it if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(
        &self,
        key: &str,
    ) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let path = self.key_path(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&temp, value)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    fn remove(
        &mut self,
        key: &str,
    ) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and runs that should leave no trace.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(
        &mut self,
        key: &str,
    ) -> Result<(), StoreError> {
        self.map.remove(key);
        Ok(())
    }
}
