//! # Hilt Core Kernel
//!
//! The `kernel` module holds the session-level glue of the Hilt host:
//!
//! - **Session bootstrapping**: the [`HostSession`](bootstrap::HostSession)
//!   composition root wires stores, notifier and the plugin manager together
//!   exactly once per session.
//! - **Component lifecycle**: the [`SessionComponent`](component::SessionComponent)
//!   trait drives initialize/start/stop over the session's components.
//! - **Core constants**: well-known keys, the environment dependency
//!   sentinel, and the fixed core/default plugin sets live in `constants`.
//! - **Error handling**: the kernel-level [`Error`](error::Error) and
//!   `Result` alias wrap the typed subsystem errors.
pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;

pub use bootstrap::HostSession;
pub use component::SessionComponent;
pub use error::{Error, Result};
// Test module declaration
#[cfg(test)]
mod tests;
