//! # Hilt Core Storage System Errors
//!
//! Defines error types specific to the Hilt storage system.
//!
//! This module includes [`StorageSystemError`], the primary enum encompassing
//! various errors that can occur while reading or writing the host's
//! persistent key-value stores: file I/O, serialization of stored values,
//! and provider-level failures.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization of value for key '{key}' failed: {source}")]
    SerializationError {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization of value for key '{key}' failed: {source}")]
    DeserializationError {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Storage operation '{operation}' failed for key '{key}': {message}")]
    OperationFailed {
        operation: String,
        key: String,
        message: String,
    },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
