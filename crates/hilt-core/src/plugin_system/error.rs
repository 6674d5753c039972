//! # Hilt Core Plugin System Errors
//!
//! Defines error types specific to the Hilt plugin system.
//!
//! This module includes [`PluginSystemError`], the primary enum encompassing
//! errors that can occur during plugin lifecycle operations: metadata
//! validation failures, registrations missing their activation hook,
//! persisted data-version mismatches at load time, and failures surfaced by
//! the plugins' own hooks.
// crates/hilt-core/src/plugin_system/error.rs
use crate::storage::error::StorageSystemError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    /// Malformed metadata at registration time. Fatal to that registration;
    /// the plugin never reaches `Registered`.
    #[error("Plugin metadata validation failed: {detail}")]
    Validation { detail: String },

    /// Registration without an activation hook. Fatal, same effect as a
    /// validation failure.
    #[error("Plugin '{plugin_name}' registered without an enable hook")]
    Contract { plugin_name: String },

    /// Persisted data version differs from the plugin's declared version at
    /// load time. Fatal and non-recoverable: there is no migration path, so
    /// this must reach the caller that triggered the load rather than being
    /// coerced.
    #[error(
        "Data version mismatch for plugin '{plugin_name}': declared {declared}, persisted {persisted}"
    )]
    DataVersionMismatch {
        plugin_name: String,
        declared: u64,
        persisted: u64,
    },

    /// A plugin's enable or disable hook reported failure. Not intercepted
    /// by the lifecycle subsystem; propagates to the triggering caller.
    #[error("Plugin '{plugin_name}' hook '{hook}' failed: {message}")]
    HookFailed {
        plugin_name: String,
        hook: String,
        message: String,
    },

    /// `resolve_view` called more than once in a session.
    #[error("Host view is already bound for this session")]
    ViewAlreadyBound,

    /// Storage failure while reading or writing persisted lifecycle state.
    #[error("Plugin storage error: {0}")]
    Storage(#[from] StorageSystemError),

    #[error("Internal plugin system error: {0}")]
    InternalError(String),
}

impl PluginSystemError {
    /// Shorthand for plugin-side hook failures.
    pub fn hook_failed(
        plugin_name: impl Into<String>,
        hook: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        PluginSystemError::HookFailed {
            plugin_name: plugin_name.into(),
            hook: hook.into(),
            message: message.into(),
        }
    }
}
