use std::sync::Arc;

use super::common::{host_view, meta, noop_hooks, RecordingNotifier};
use crate::kernel::component::SessionComponent;
use crate::plugin_system::manager::{DefaultPluginManager, PluginManager};
use crate::plugin_system::registry::PluginStatus;
use crate::storage::MemoryStore;

fn manager() -> DefaultPluginManager {
    DefaultPluginManager::new(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
        RecordingNotifier::new(),
    )
}

#[tokio::test]
async fn manager_drives_the_full_lifecycle() {
    let manager = manager();
    SessionComponent::initialize(&manager).await.unwrap();
    SessionComponent::start(&manager).await.unwrap();

    manager
        .register(&meta("Hello World js"), noop_hooks())
        .await
        .unwrap();
    assert_eq!(
        manager.status("Hello World js").await.unwrap(),
        PluginStatus::Registered
    );

    manager.resolve_view(host_view()).await.unwrap();
    assert_eq!(
        manager.status("Hello World js").await.unwrap(),
        PluginStatus::Loaded
    );
    assert!(manager.is_enabled("Hello World js").await.unwrap());
    assert!(manager.get_plugin("Hello World js").await.unwrap().is_some());
    assert_eq!(
        manager.plugin_names().await.unwrap(),
        vec!["Hello World js".to_string()]
    );
}

#[tokio::test]
async fn manager_toggles_plugins() {
    let manager = manager();
    manager
        .register(&meta("Hello World js"), noop_hooks())
        .await
        .unwrap();
    manager.resolve_view(host_view()).await.unwrap();

    manager.disable_plugin("Hello World js").await.unwrap();
    assert_eq!(
        manager.status("Hello World js").await.unwrap(),
        PluginStatus::Disabled
    );

    manager.enable_plugin("Hello World js").await.unwrap();
    assert_eq!(
        manager.status("Hello World js").await.unwrap(),
        PluginStatus::Loaded
    );
}

#[tokio::test]
async fn stop_clears_session_records() {
    let manager = manager();
    manager
        .register(&meta("Hello World js"), noop_hooks())
        .await
        .unwrap();
    manager.resolve_view(host_view()).await.unwrap();

    SessionComponent::stop(&manager).await.unwrap();
    assert!(manager.plugin_names().await.unwrap().is_empty());
    assert_eq!(
        manager.status("Hello World js").await.unwrap(),
        PluginStatus::Unregistered
    );
}
