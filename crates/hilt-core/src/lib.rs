pub mod kernel;
pub mod notify;
pub mod plugin_system;
pub mod storage;

// Re-export key public types for easier use by the binary and by hosts
pub use kernel::error::Error as KernelError;
pub use kernel::HostSession;
pub use notify::{ConsoleNotifier, Notifier, Severity};
pub use plugin_system::{
    LifecycleController, PluginApi, PluginHooks, PluginManager, PluginStatus, PluginValue,
};
pub use storage::KeyValueStore;
