use hilt_core::{Notifier, Severity};

/// A basic notifier for the command-line interface.
///
/// Lifecycle notices are printed to the console with their severity tag so
/// one-shot alerts (plugin panics, the unload refresh fallback) stay visible
/// without a graphical host.
#[derive(Debug)]
pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn name(&self) -> &'static str {
        "cli"
    }

    fn notify(&self, severity: Severity, source: &str, message: &str) {
        match severity {
            Severity::Info => println!("[{}] {}: {}", severity, source, message),
            _ => eprintln!("[{}] {}: {}", severity, source, message),
        }
    }
}
