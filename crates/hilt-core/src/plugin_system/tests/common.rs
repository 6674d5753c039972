use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use serde_json::{json, Value};

use crate::kernel::constants::ENABLED_PLUGINS_KEY;
use crate::notify::{Notifier, Severity};
use crate::plugin_system::lifecycle::{HostView, LifecycleController};
use crate::plugin_system::registry::PluginHooks;
use crate::plugin_system::resolver::PluginValue;
use crate::storage::{KeyValueStore, MemoryStore};

/// Notifier capturing every notice for assertions.
pub struct RecordingNotifier {
    notices: StdMutex<Vec<(Severity, String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            notices: StdMutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    pub fn notices(&self) -> Vec<(Severity, String, String)> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn notify(&self, severity: Severity, source: &str, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((severity, source.to_string(), message.to_string()));
    }
}

/// Test harness: controller plus handles on its stores and notifier.
pub struct Harness {
    pub controller: LifecycleController,
    pub settings: Arc<MemoryStore>,
    pub data: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

/// Build a controller over fresh in-memory stores, with the given plugin
/// names pre-marked enabled in the persisted settings.
pub fn harness_with_enabled(enabled: &[&str]) -> Harness {
    let settings = Arc::new(MemoryStore::new());
    if !enabled.is_empty() {
        let map: HashMap<String, bool> = enabled.iter().map(|n| (n.to_string(), true)).collect();
        settings
            .set(ENABLED_PLUGINS_KEY, serde_json::to_value(map).unwrap())
            .unwrap();
    }
    let data = Arc::new(MemoryStore::new());
    let notifier = RecordingNotifier::new();
    let controller = LifecycleController::new(settings.clone(), data.clone(), notifier.clone());
    Harness {
        controller,
        settings,
        data,
        notifier,
    }
}

pub fn harness() -> Harness {
    harness_with_enabled(&[])
}

/// Minimal metadata: required name only, defaults for the rest.
pub fn meta(name: &str) -> Value {
    json!({ "name": name })
}

pub fn meta_with_deps(name: &str, deps: &[&str]) -> Value {
    json!({ "name": name, "dependencies": deps })
}

pub fn host_view() -> HostView {
    Arc::new(String::from("host view"))
}

/// Hooks whose enable function counts invocations and returns `()`.
pub fn counted_enable(counter: Arc<AtomicUsize>) -> PluginHooks {
    PluginHooks::on_enable(move |_api| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(()) as PluginValue)
    })
}

/// Hooks whose enable function just returns `()`.
pub fn noop_hooks() -> PluginHooks {
    PluginHooks::on_enable(|_api| Ok(Arc::new(()) as PluginValue))
}
