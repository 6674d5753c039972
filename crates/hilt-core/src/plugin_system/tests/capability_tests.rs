use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use serde_json::json;

use super::common::{harness_with_enabled, host_view, meta};
use crate::notify::Severity;
use crate::plugin_system::capability::PluginApi;
use crate::plugin_system::registry::{PluginHooks, PluginStatus};
use crate::plugin_system::resolver::PluginValue;

/// Load one plugin and capture the capability object its hook receives.
fn load_with_captured_api(
    h: &super::common::Harness,
    name: &str,
    disable_counter: Option<Arc<AtomicUsize>>,
) -> PluginApi {
    let captured = Arc::new(StdMutex::new(None::<PluginApi>));
    let captured_in_hook = captured.clone();
    let mut hooks = PluginHooks::on_enable(move |api| {
        *captured_in_hook.lock().unwrap() = Some(api.clone());
        Ok(Arc::new(()) as PluginValue)
    });
    if let Some(counter) = disable_counter {
        hooks = hooks.on_disable(move |_value| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }
    h.controller.register(&meta(name), hooks).unwrap();
    h.controller.resolve_view(host_view()).unwrap();
    let api = captured.lock().unwrap().take().expect("hook should have run");
    api
}

#[test]
fn capability_is_bound_to_its_plugin() {
    let h = harness_with_enabled(&["Plugin P"]);
    let api = load_with_captured_api(&h, "Plugin P", None);
    assert_eq!(api.plugin_name(), "Plugin P");
    assert_eq!(
        api.view().downcast_ref::<String>().map(String::as_str),
        Some("host view")
    );
}

#[test]
fn data_version_proxies_the_persisted_record() {
    let h = harness_with_enabled(&["Plugin P"]);
    let api = load_with_captured_api(&h, "Plugin P", None);

    // Initialized to the declared version (default 1) at first load.
    assert_eq!(api.get_data_version().unwrap(), Some(1));
    api.set_data_version(5).unwrap();
    assert_eq!(api.get_data_version().unwrap(), Some(5));
    assert_eq!(h.controller.data_version("Plugin P").unwrap(), Some(5));
}

#[test]
fn plugin_data_is_namespaced_by_plugin_name() {
    let h = harness_with_enabled(&["Plugin P", "Plugin Q"]);
    let api_p = load_with_captured_api(&h, "Plugin P", None);

    let captured_q = Arc::new(StdMutex::new(None::<PluginApi>));
    let captured_in_hook = captured_q.clone();
    h.controller
        .register(
            &meta("Plugin Q"),
            PluginHooks::on_enable(move |api| {
                *captured_in_hook.lock().unwrap() = Some(api.clone());
                Ok(Arc::new(()) as PluginValue)
            }),
        )
        .unwrap();
    let api_q = captured_q.lock().unwrap().take().expect("hook should have run");

    api_p.set_data("color", json!("red")).unwrap();
    api_q.set_data("color", json!("blue")).unwrap();

    // Same key, different namespaces.
    assert_eq!(api_p.get_data("color").unwrap(), Some(json!("red")));
    assert_eq!(api_q.get_data("color").unwrap(), Some(json!("blue")));
    assert_eq!(api_p.get_data("missing").unwrap(), None);
}

#[test]
fn get_plugin_sees_only_loaded_plugins() {
    let h = harness_with_enabled(&["Plugin P"]);
    let api = load_with_captured_api(&h, "Plugin P", None);

    assert!(api.get_plugin("Plugin P").is_some());
    assert!(api.get_plugin("Never Registered").is_none());

    h.controller.disable_plugin("Plugin P").unwrap();
    assert!(api.get_plugin("Plugin P").is_none());
}

#[test]
fn panic_disables_and_alerts_exactly_once() {
    let h = harness_with_enabled(&["Plugin P"]);
    let disables = Arc::new(AtomicUsize::new(0));
    let api = load_with_captured_api(&h, "Plugin P", Some(disables.clone()));
    assert_eq!(h.controller.status("Plugin P"), PluginStatus::Loaded);

    api.panic();
    assert_eq!(h.controller.status("Plugin P"), PluginStatus::Disabled);
    assert!(!h.controller.is_enabled("Plugin P"));
    assert_eq!(disables.load(Ordering::SeqCst), 1);

    let notices = h.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, Severity::Error);
    assert_eq!(notices[0].1, "Plugin P");

    // Second call: no second alert, no second disable.
    api.panic();
    assert_eq!(h.notifier.count(), 1);
    assert_eq!(disables.load(Ordering::SeqCst), 1);
    assert_eq!(h.controller.status("Plugin P"), PluginStatus::Disabled);
}

#[test]
fn panic_guard_is_per_capability_instance() {
    let h = harness_with_enabled(&["Plugin P"]);
    let api = load_with_captured_api(&h, "Plugin P", None);
    api.panic();

    // A fresh load constructs a fresh capability with its own guard.
    h.controller.enable_plugin("Plugin P").unwrap();
    assert_eq!(h.controller.status("Plugin P"), PluginStatus::Loaded);
}
