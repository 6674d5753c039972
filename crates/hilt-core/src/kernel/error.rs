//! # Hilt Core Kernel Errors
//!
//! Defines error types specific to the Hilt kernel.
//!
//! This module includes [`Error`], the primary enum wrapping the typed
//! subsystem errors (plugin system, storage) alongside session-level
//! failures that can occur while bootstrapping or tearing down a host
//! session.
use std::result::Result as StdResult;

use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Top-level error type for the Hilt host
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Session bootstrap or teardown failure
    #[error("Session lifecycle error during {phase}: {message}")]
    SessionLifecycle { phase: String, message: String },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
