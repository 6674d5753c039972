//! User-facing alerting seam.
//!
//! The lifecycle subsystem never talks to the host UI directly; it raises
//! notices through the [`Notifier`] trait and the host decides how to show
//! them. [`OnceNotice`] wraps the fire-at-most-once alerts the controller
//! needs (the process-wide "refresh required" fallback and per-capability
//! panic notices).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Notice severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Trait for host UI alert providers
pub trait Notifier: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &'static str;

    /// Surface a notice to the user. `source` identifies the plugin or
    /// subsystem the notice concerns.
    fn notify(&self, severity: Severity, source: &str, message: &str);
}

/// Notifier that routes notices through the logging facade.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn name(&self) -> &'static str {
        "console"
    }

    fn notify(&self, severity: Severity, source: &str, message: &str) {
        match severity {
            Severity::Info => log::info!("[{}] {}", source, message),
            Severity::Warning => log::warn!("[{}] {}", source, message),
            Severity::Error => log::error!("[{}] {}", source, message),
        }
    }
}

/// A boolean-guarded notice that fires at most once per instance.
///
/// The guard is evaluated per construction scope: the controller holds one
/// instance for the generic unload fallback (process-wide across all plugins
/// lacking a disable hook), and each capability object holds its own for
/// `panic()`.
#[derive(Debug, Default)]
pub struct OnceNotice {
    fired: AtomicBool,
}

impl OnceNotice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the notice through `notifier` unless it has already fired.
    /// Returns true if the notice was actually delivered.
    pub fn fire(&self, notifier: &dyn Notifier, severity: Severity, source: &str, message: &str) -> bool {
        if self.fired.swap(true, Ordering::SeqCst) {
            return false;
        }
        notifier.notify(severity, source, message);
        true
    }

    /// Whether the notice has fired.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
