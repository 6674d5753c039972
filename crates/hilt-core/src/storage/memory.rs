use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::storage::error::StorageSystemError;
use crate::storage::provider::{KeyValueStore, StorageResult};

/// In-memory key-value store.
///
/// Used by tests and by hosts that do not persist state across sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|_| StorageSystemError::OperationFailed {
                operation: "lock".to_string(),
                key: String::new(),
                message: "memory store mutex poisoned".to_string(),
            })
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> StorageResult<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}
