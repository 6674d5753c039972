use std::sync::Arc;

use serde_json::Value;

use crate::notify::{OnceNotice, Severity};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::lifecycle::{HostView, LifecycleController};
use crate::plugin_system::resolver::PluginValue;

struct ApiInner {
    plugin_name: String,
    view: HostView,
    controller: LifecycleController,
    /// Per capability instance, independent of the controller's
    /// process-wide unload notice.
    panic_notice: OnceNotice,
}

/// The narrow capability object handed to a plugin's activation hook.
///
/// Constructed once per load and bound to one plugin name, the host view
/// and the lifecycle controller. Everything a plugin may do to host state
/// goes through here: namespaced data access, the data-version record,
/// inter-plugin lookup, and the `panic` self-disable escape hatch. Cloning
/// shares the same instance, including its one-shot panic guard.
#[derive(Clone)]
pub struct PluginApi {
    inner: Arc<ApiInner>,
}

impl PluginApi {
    pub(crate) fn new(controller: LifecycleController, plugin_name: String, view: HostView) -> Self {
        Self {
            inner: Arc::new(ApiInner {
                plugin_name,
                view,
                controller,
                panic_notice: OnceNotice::new(),
            }),
        }
    }

    /// Name of the plugin this capability is bound to.
    pub fn plugin_name(&self) -> &str {
        &self.inner.plugin_name
    }

    /// The host view object.
    pub fn view(&self) -> HostView {
        self.inner.view.clone()
    }

    /// Persisted data version for this plugin.
    pub fn get_data_version(&self) -> Result<Option<u64>, PluginSystemError> {
        self.inner.controller.data_version(&self.inner.plugin_name)
    }

    /// Overwrite the persisted data version for this plugin.
    pub fn set_data_version(&self, version: u64) -> Result<(), PluginSystemError> {
        self.inner
            .controller
            .set_data_version(&self.inner.plugin_name, version)
    }

    /// Read from this plugin's namespaced slot in the host data store.
    pub fn get_data(&self, key: &str) -> Result<Option<Value>, PluginSystemError> {
        self.inner.controller.plugin_data(&self.inner.plugin_name, key)
    }

    /// Write into this plugin's namespaced slot in the host data store.
    /// The plugin name is the namespace key, so plugins cannot collide.
    pub fn set_data(&self, key: &str, value: Value) -> Result<(), PluginSystemError> {
        self.inner
            .controller
            .set_plugin_data(&self.inner.plugin_name, key, value)
    }

    /// Another plugin's current public value, absent unless it is Loaded.
    pub fn get_plugin(&self, name: &str) -> Option<PluginValue> {
        self.inner.controller.get_plugin(name)
    }

    /// Self-report an unrecoverable problem.
    ///
    /// Fires at most once per capability instance: the user is alerted and
    /// the plugin disables itself. A second call is a complete no-op, with
    /// no second alert and no second disable.
    pub fn panic(&self) {
        let notifier = self.inner.controller.notifier();
        let fired = self.inner.panic_notice.fire(
            notifier.as_ref(),
            Severity::Error,
            &self.inner.plugin_name,
            &format!(
                "The plugin '{}' has encountered a major problem and has been disabled.",
                self.inner.plugin_name
            ),
        );
        if !fired {
            return;
        }
        if let Err(e) = self.inner.controller.disable_plugin(&self.inner.plugin_name) {
            log::error!(
                "failed to disable panicking plugin '{}': {}",
                self.inner.plugin_name,
                e
            );
        }
    }
}
