pub mod error;
pub mod local;
pub mod memory;
pub mod provider;

/// Re-export key types
pub use error::StorageSystemError;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use provider::{KeyValueStore, StorageResult};
