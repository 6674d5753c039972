use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use crate::storage::error::StorageSystemError;
use crate::storage::provider::{KeyValueStore, StorageResult};

/// File-backed key-value store persisting to a single JSON document.
///
/// The whole map is read on construction and rewritten on every mutation.
/// That is deliberate: the stores this subsystem touches are small (an
/// enabled-set and per-plugin data slots), and rewriting keeps the on-disk
/// state consistent without a journal.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    values: Mutex<HashMap<String, Value>>,
}

impl LocalStore {
    /// Open the store at `path`, creating parent directories as needed.
    /// A missing file is treated as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageSystemError::io(e, "create_dir_all", parent.to_path_buf()))?;
            }
        }

        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| StorageSystemError::io(e, "read_to_string", path.clone()))?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    StorageSystemError::DeserializationError {
                        key: path.display().to_string(),
                        source: Box::new(e),
                    }
                })?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|_| StorageSystemError::OperationFailed {
                operation: "lock".to_string(),
                key: String::new(),
                message: "local store mutex poisoned".to_string(),
            })
    }

    fn flush(&self, values: &HashMap<String, Value>) -> StorageResult<()> {
        let contents =
            serde_json::to_string_pretty(values).map_err(|e| StorageSystemError::SerializationError {
                key: self.path.display().to_string(),
                source: Box::new(e),
            })?;
        fs::write(&self.path, contents)
            .map_err(|e| StorageSystemError::io(e, "write", self.path.clone()))
    }
}

impl KeyValueStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        let mut values = self.lock()?;
        values.insert(key.to_string(), value);
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut values = self.lock()?;
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}
