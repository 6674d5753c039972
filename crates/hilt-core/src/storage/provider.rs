use std::fmt::Debug;

use serde_json::Value;

use crate::storage::error::StorageSystemError;

/// Result alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageSystemError>;

/// Trait for the host's persistent key-value stores.
///
/// The lifecycle subsystem owns the key layout (see
/// [`crate::kernel::constants`]); the host owns the storage format behind
/// this seam. Values are JSON so independently-authored plugins can persist
/// arbitrary data without a shared schema.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> StorageResult<()>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// List all keys currently present in the store.
    fn keys(&self) -> StorageResult<Vec<String>>;
}
