use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use crate::kernel::bootstrap::HostSession;
use crate::kernel::constants::ENABLED_PLUGINS_KEY;
use crate::plugin_system::registry::{PluginHooks, PluginStatus};
use crate::plugin_system::resolver::PluginValue;

fn hooks() -> PluginHooks {
    PluginHooks::on_enable(|_api| Ok(Arc::new(()) as PluginValue))
}

fn view() -> PluginValue {
    Arc::new(String::from("host view"))
}

#[tokio::test]
async fn in_memory_session_runs_a_full_lifecycle() {
    let session = HostSession::new(None).unwrap();
    session.start().await.unwrap();

    session
        .controller()
        .register(&json!({ "name": "Hello World js" }), hooks())
        .unwrap();
    session.controller().resolve_view(view()).unwrap();
    assert_eq!(
        session.controller().status("Hello World js"),
        PluginStatus::Loaded
    );

    session.shutdown().await.unwrap();
    assert_eq!(
        session.controller().status("Hello World js"),
        PluginStatus::Unregistered
    );
}

#[tokio::test]
async fn sessions_share_persisted_state_through_the_data_dir() {
    let dir = tempdir().unwrap();

    {
        let session = HostSession::new(Some(dir.path().to_path_buf())).unwrap();
        session.start().await.unwrap();
        session
            .controller()
            .register(&json!({ "name": "Plugin P" }), hooks())
            .unwrap();
        session.controller().resolve_view(view()).unwrap();
        session.controller().enable_plugin("Plugin P").unwrap();
        session.shutdown().await.unwrap();
    }

    // A new session over the same directory sees the persisted enabled-set.
    let session = HostSession::new(Some(dir.path().to_path_buf())).unwrap();
    session.start().await.unwrap();
    session
        .controller()
        .register(&json!({ "name": "Plugin P" }), hooks())
        .unwrap();
    session.controller().resolve_view(view()).unwrap();
    assert_eq!(session.controller().status("Plugin P"), PluginStatus::Loaded);
}

#[tokio::test]
async fn default_enabled_set_is_written_to_the_settings_store() {
    let dir = tempdir().unwrap();

    let session = HostSession::new(Some(dir.path().to_path_buf())).unwrap();
    session.start().await.unwrap();
    session.controller().resolve_view(view()).unwrap();
    session.shutdown().await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    let settings: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        settings[ENABLED_PLUGINS_KEY],
        json!({ "Hello World js": true })
    );
}
