//! JSON-file backing for the session store.
//!
//! The file holds one flat object, `{"token": "...", "user": "..."}`, and is
//! rewritten in full on every change. A missing file reads as empty.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use session::{KeyValueStore, StorageError};

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Read(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Read(e.to_string()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(StorageError::Write(e.to_string())),
                _ => Ok(()),
            };
        }
        let rendered = serde_json::to_string_pretty(entries).map_err(|e| StorageError::Write(e.to_string()))?;
        std::fs::write(&self.path, rendered).map_err(|e| StorageError::Write(e.to_string()))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.save(&entries)
    }

    /// An unreadable file is deleted outright so later reads start empty.
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable session file");
                return std::fs::remove_file(&self.path).map_err(|e| {
                    tracing::warn!(path = %self.path.display(), error = %e, "could not delete session file");
                    StorageError::Write(e.to_string())
                });
            }
        };
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries)
    }
}
