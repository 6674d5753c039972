use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::kernel::component::SessionComponent;
use crate::kernel::error::Result;
use crate::notify::Notifier;
use crate::plugin_system::lifecycle::{HostView, LifecycleController};
use crate::plugin_system::registry::{PluginHooks, PluginStatus};
use crate::plugin_system::resolver::PluginValue;
use crate::storage::KeyValueStore;

/// Plugin system component interface for async hosts.
#[async_trait]
pub trait PluginManager: SessionComponent {
    /// Register a plugin from raw metadata and its hook pair
    async fn register(&self, raw: &Value, hooks: PluginHooks) -> Result<()>;

    /// Bind the host view, exactly once per session
    async fn resolve_view(&self, view: HostView) -> Result<()>;

    /// Enable a plugin (persists the setting, may re-load)
    async fn enable_plugin(&self, name: &str) -> Result<()>;

    /// Disable a plugin (persists the setting, may unload)
    async fn disable_plugin(&self, name: &str) -> Result<()>;

    /// Get a Loaded plugin's public value
    async fn get_plugin(&self, name: &str) -> Result<Option<PluginValue>>;

    /// Get all registered plugin names
    async fn plugin_names(&self) -> Result<Vec<String>>;

    /// Get a plugin's lifecycle status
    async fn status(&self, name: &str) -> Result<PluginStatus>;

    /// Check if a plugin is enabled
    async fn is_enabled(&self, name: &str) -> Result<bool>;
}

/// Default implementation of plugin manager
#[derive(Clone)]
pub struct DefaultPluginManager {
    name: &'static str,
    controller: LifecycleController,
}

impl DefaultPluginManager {
    /// Create a new default plugin manager over the host's stores.
    pub fn new(
        settings: Arc<dyn KeyValueStore>,
        data: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            name: "DefaultPluginManager",
            controller: LifecycleController::new(settings, data, notifier),
        }
    }

    /// Direct access to the underlying controller for synchronous callers.
    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }
}

impl Debug for DefaultPluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultPluginManager")
            .field("name", &self.name)
            .finish_non_exhaustive() // Controller state is omitted
    }
}

#[async_trait]
impl SessionComponent for DefaultPluginManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        log::debug!("Initializing plugin manager");
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        // Loading happens when the host binds its view; nothing to do here.
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        log::debug!("Stopping plugin manager; clearing session records");
        self.controller.shutdown()?;
        Ok(())
    }
}

#[async_trait]
impl PluginManager for DefaultPluginManager {
    async fn register(&self, raw: &Value, hooks: PluginHooks) -> Result<()> {
        self.controller.register(raw, hooks)?;
        Ok(())
    }

    async fn resolve_view(&self, view: HostView) -> Result<()> {
        self.controller.resolve_view(view)?;
        Ok(())
    }

    async fn enable_plugin(&self, name: &str) -> Result<()> {
        self.controller.enable_plugin(name)?;
        Ok(())
    }

    async fn disable_plugin(&self, name: &str) -> Result<()> {
        self.controller.disable_plugin(name)?;
        Ok(())
    }

    async fn get_plugin(&self, name: &str) -> Result<Option<PluginValue>> {
        Ok(self.controller.get_plugin(name))
    }

    async fn plugin_names(&self) -> Result<Vec<String>> {
        Ok(self.controller.plugin_names())
    }

    async fn status(&self, name: &str) -> Result<PluginStatus> {
        Ok(self.controller.status(name))
    }

    async fn is_enabled(&self, name: &str) -> Result<bool> {
        Ok(self.controller.is_enabled(name))
    }
}
