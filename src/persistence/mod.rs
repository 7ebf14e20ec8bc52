//! Key-value persistence for chat widget state.
//!
//! The widget only needs a tiny `load`/`save` contract over string values.
//! [`MemorySessionStore`] keeps values for the life of the process;
//! [`FileSessionStore`] writes them to a single JSON object on disk.

use crate::error::{AppError, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub trait SessionStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| AppError::StorageError("Session store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| AppError::StorageError("Session store lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object mapping keys to string values.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Session file does not exist");
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AppError::StorageError(format!("Failed to read session file: {}", e))
        })?;

        match serde_json::from_str(&raw) {
            Ok(values) => Ok(values),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Invalid session file, starting empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::StorageError("Session file lock poisoned".to_string()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::StorageError("Session file lock poisoned".to_string()))?;

        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::StorageError(format!("Failed to create session directory: {}", e))
            })?;
        }

        let raw = serde_json::to_string_pretty(&values)
            .map_err(|e| AppError::StorageError(format!("Failed to encode session: {}", e)))?;
        fs::write(&self.path, raw).map_err(|e| {
            AppError::StorageError(format!("Failed to write session file: {}", e))
        })?;

        tracing::debug!(path = %self.path.display(), key, "Session value saved");
        Ok(())
    }
}
