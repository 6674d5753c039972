use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::kernel::component::SessionComponent;
use crate::kernel::constants::{APP_NAME, APP_VERSION, DATA_FILE_NAME, SETTINGS_FILE_NAME};
use crate::kernel::error::Result;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::plugin_system::lifecycle::LifecycleController;
use crate::plugin_system::manager::DefaultPluginManager;
use crate::storage::{KeyValueStore, LocalStore, MemoryStore};

/// Composition root for one host session.
///
/// Constructed once at session start; owns the single live instances of the
/// settings store, the data store, the notifier and the plugin manager.
/// Torn down by [`HostSession::shutdown`], which clears all plugin records.
pub struct HostSession {
    manager: Arc<DefaultPluginManager>,
}

impl HostSession {
    /// Create a session persisting state under `data_dir`, or entirely
    /// in memory when `data_dir` is `None`.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let (settings, data): (Arc<dyn KeyValueStore>, Arc<dyn KeyValueStore>) = match data_dir {
            Some(dir) => (
                Arc::new(LocalStore::open(dir.join(SETTINGS_FILE_NAME))?),
                Arc::new(LocalStore::open(dir.join(DATA_FILE_NAME))?),
            ),
            None => (Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new())),
        };
        Ok(Self::with_stores(settings, data, Arc::new(ConsoleNotifier::new())))
    }

    /// Create a session over explicit store and notifier instances.
    pub fn with_stores(
        settings: Arc<dyn KeyValueStore>,
        data: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        info!("{} {} session starting", APP_NAME, APP_VERSION);
        Self {
            manager: Arc::new(DefaultPluginManager::new(settings, data, notifier)),
        }
    }

    /// The session's plugin manager component.
    pub fn manager(&self) -> Arc<DefaultPluginManager> {
        self.manager.clone()
    }

    /// Direct access to the lifecycle controller for synchronous callers.
    pub fn controller(&self) -> &LifecycleController {
        self.manager.controller()
    }

    /// Initialize and start all session components.
    pub async fn start(&self) -> Result<()> {
        self.manager.initialize().await?;
        self.manager.start().await
    }

    /// Stop all session components, clearing plugin records. Persisted
    /// state survives for the next session.
    pub async fn shutdown(&self) -> Result<()> {
        info!("{} session shutting down", APP_NAME);
        self.manager.stop().await
    }
}
