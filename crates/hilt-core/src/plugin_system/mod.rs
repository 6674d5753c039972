//! # Hilt Core Plugin System
//!
//! Infrastructure for extending the host through independently-authored
//! plugins. It owns the entire per-plugin lifecycle: metadata validation,
//! dependency-gated activation, the enabled-set gate, data-version
//! consistency, and deactivation.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`metadata`]**: the plugin metadata schema ([`PluginMetadata`]) and
//!   the validator that fills defaults and rejects malformed registrations.
//! - **[`resolver`]**: the [`DependencyGraph`] waiter map that parks each
//!   registration until its declared dependencies (plus the implicit
//!   environment dependency) have resolved.
//! - **[`registry`]**: the table of [`PluginRecord`](registry::PluginRecord)s,
//!   one per name, owning metadata, status and the plugin's public value.
//! - **[`lifecycle`]**: the [`LifecycleController`] state machine driving
//!   register, gated wait, load or skip, unload and re-load.
//! - **[`capability`]**: the per-load [`PluginApi`] object granting scoped
//!   data access, inter-plugin lookup and the panic escape hatch.
//! - **[`manager`]**: the async [`PluginManager`] component facade hosts
//!   embed.
//! - **[`error`]**: typed plugin system errors
//!   ([`PluginSystemError`](error::PluginSystemError)).
pub mod capability;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod metadata;
pub mod registry;
pub mod resolver;

pub use capability::PluginApi;
pub use lifecycle::{EnabledSet, HostView, LifecycleController};
pub use manager::{DefaultPluginManager, PluginManager};
pub use metadata::{MetadataValidator, PluginMetadata};
pub use registry::{PluginHooks, PluginRecord, PluginRegistry, PluginStatus};
pub use resolver::{DependencyGraph, PluginValue};
// Test module declaration
#[cfg(test)]
mod tests;
