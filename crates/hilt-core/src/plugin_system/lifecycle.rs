use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use serde_json::Value;

use crate::kernel::constants::{
    data_version_key, is_core_plugin, plugin_data_key, DEFAULT_ENABLED_PLUGINS,
    ENABLED_PLUGINS_KEY, ENVIRONMENT_DEP,
};
use crate::notify::{Notifier, OnceNotice, Severity};
use crate::plugin_system::capability::PluginApi;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::metadata::MetadataValidator;
use crate::plugin_system::registry::{PluginHooks, PluginRecord, PluginRegistry, PluginStatus};
use crate::plugin_system::resolver::{DependencyGraph, PluginValue};

/// The host view object bound by `resolve_view`. Opaque to the lifecycle
/// subsystem; it is handed through to plugins as the environment node's
/// resolution value.
pub type HostView = PluginValue;

/// Persisted mapping from plugin name to an explicit "enabled" marker.
///
/// A plugin is enabled iff it is a core plugin or marked true here; that
/// predicate is pure and re-derivable from persisted state alone.
#[derive(Debug, Clone, Default)]
pub struct EnabledSet {
    entries: HashMap<String, bool>,
}

impl EnabledSet {
    /// The fixed seed set used when no enabled-set has been persisted yet.
    pub fn seeded() -> Self {
        Self {
            entries: DEFAULT_ENABLED_PLUGINS
                .iter()
                .map(|(name, enabled)| (name.to_string(), *enabled))
                .collect(),
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.entries.get(name).copied().unwrap_or(false)
    }

    pub fn set(&mut self, name: &str, enabled: bool) {
        self.entries.insert(name.to_string(), enabled);
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entries: serde_json::from_value(value)?,
        })
    }

    fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.entries)
    }
}

struct ControllerShared {
    validator: MetadataValidator,
    registry: Mutex<PluginRegistry>,
    graph: Mutex<DependencyGraph>,
    enabled: Mutex<EnabledSet>,
    view: Mutex<Option<HostView>>,
    settings: Arc<dyn crate::storage::KeyValueStore>,
    data: Arc<dyn crate::storage::KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    /// Process-wide, across all plugins lacking a disable hook.
    unload_notice: OnceNotice,
}

/// Drives each plugin's state machine: register, dependency-gated wait,
/// load or skip, and later unload/re-load through the enable gate.
///
/// All mutation is serialized through short internal critical sections; no
/// lock is held while plugin hooks or the notifier run, so hooks may call
/// back into the controller (through their capability object) freely.
/// Cloning is cheap and shares the same session state.
#[derive(Clone)]
pub struct LifecycleController {
    shared: Arc<ControllerShared>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PluginSystemError> {
    mutex
        .lock()
        .map_err(|_| PluginSystemError::InternalError("lifecycle state lock poisoned".to_string()))
}

impl LifecycleController {
    /// Create a controller over the host's settings and data stores.
    pub fn new(
        settings: Arc<dyn crate::storage::KeyValueStore>,
        data: Arc<dyn crate::storage::KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            shared: Arc::new(ControllerShared {
                validator: MetadataValidator::new(),
                registry: Mutex::new(PluginRegistry::new()),
                graph: Mutex::new(DependencyGraph::new()),
                enabled: Mutex::new(EnabledSet::default()),
                view: Mutex::new(None),
                settings,
                data,
                notifier,
                unload_notice: OnceNotice::new(),
            }),
        }
    }

    /// Register a plugin.
    ///
    /// Validates `raw` against the metadata schema, requires an enable hook,
    /// stores the record at `Registered` and submits the plugin's name to
    /// the dependency graph with its declared dependencies plus the implicit
    /// environment dependency. If every dependency is already resolved the
    /// load attempt runs before this call returns.
    ///
    /// Re-registering an existing name replaces the record without unloading
    /// the old value; the old record's disable hook never runs.
    pub fn register(&self, raw: &Value, hooks: PluginHooks) -> Result<(), PluginSystemError> {
        let metadata = self.shared.validator.validate(raw)?;
        let name = metadata.name.clone();
        let enable = hooks.enable.ok_or_else(|| PluginSystemError::Contract {
            plugin_name: name.clone(),
        })?;

        let mut effective_dependencies = metadata.dependencies.clone();
        effective_dependencies.push(ENVIRONMENT_DEP.to_string());

        let record = PluginRecord {
            metadata,
            raw_metadata: raw.clone(),
            status: PluginStatus::Registered,
            value: None,
            enable,
            disable: hooks.disable,
            effective_dependencies: effective_dependencies.clone(),
        };

        let replaced = lock(&self.shared.registry)?.insert(record);
        if replaced {
            warn!(
                "plugin '{}' re-registered; previous record replaced without unloading",
                name
            );
        }

        let ready = lock(&self.shared.graph)?.add(&name, effective_dependencies);
        info!("plugin '{}' registered", name);

        if ready {
            self.drain(vec![name])?;
        }
        Ok(())
    }

    /// Bind the host view, called exactly once per session.
    ///
    /// Loads the persisted enabled-set (seeding defaults when absent),
    /// resolves the environment dependency with `view` and attempts to load
    /// every registration whose dependencies are now satisfied.
    pub fn resolve_view(&self, view: HostView) -> Result<(), PluginSystemError> {
        {
            let mut slot = lock(&self.shared.view)?;
            if slot.is_some() {
                return Err(PluginSystemError::ViewAlreadyBound);
            }
            *slot = Some(view.clone());
        }

        self.load_enabled_set()?;

        let ready = lock(&self.shared.graph)?.resolve(ENVIRONMENT_DEP, view);
        debug!("host view bound; {} registration(s) ready", ready.len());
        self.drain(ready)
    }

    /// Mark a plugin enabled, persist the change, and if it is currently
    /// `Disabled` re-enter the load path (re-checking the data-version
    /// invariant).
    pub fn enable_plugin(&self, name: &str) -> Result<(), PluginSystemError> {
        {
            let mut enabled = lock(&self.shared.enabled)?;
            enabled.set(name, true);
            self.persist_enabled_set(&enabled)?;
        }
        info!("plugin '{}' marked enabled", name);

        let status = lock(&self.shared.registry)?.status(name);
        if status == PluginStatus::Disabled {
            let ready = self.load(name)?;
            self.drain(ready)?;
        }
        Ok(())
    }

    /// Mark a plugin disabled, persist the change, and unload it if it is
    /// currently `Loaded`. Core plugins are exempt: their status never
    /// changes and nothing is persisted.
    pub fn disable_plugin(&self, name: &str) -> Result<(), PluginSystemError> {
        if is_core_plugin(name) {
            warn!("plugin '{}' is a core plugin and cannot be disabled", name);
            return Ok(());
        }

        {
            let mut enabled = lock(&self.shared.enabled)?;
            enabled.set(name, false);
            self.persist_enabled_set(&enabled)?;
        }
        info!("plugin '{}' marked disabled", name);

        let status = lock(&self.shared.registry)?.status(name);
        if status == PluginStatus::Loaded && !self.is_enabled(name) {
            self.unload(name)?;
        }
        Ok(())
    }

    /// Whether `name` is enabled: in the core set or explicitly marked in
    /// the enabled-set. Pure; no side effects.
    pub fn is_enabled(&self, name: &str) -> bool {
        is_core_plugin(name)
            || self
                .shared
                .enabled
                .lock()
                .map(|e| e.is_enabled(name))
                .unwrap_or(false)
    }

    /// Public value of a `Loaded` plugin, if any.
    pub fn get_plugin(&self, name: &str) -> Option<PluginValue> {
        self.shared.registry.lock().ok()?.value(name)
    }

    /// All registered plugin names.
    pub fn plugin_names(&self) -> Vec<String> {
        self.shared
            .registry
            .lock()
            .map(|r| r.names())
            .unwrap_or_default()
    }

    /// Lifecycle status for `name`; names never registered are
    /// `Unregistered`.
    pub fn status(&self, name: &str) -> PluginStatus {
        self.shared
            .registry
            .lock()
            .map(|r| r.status(name))
            .unwrap_or(PluginStatus::Unregistered)
    }

    /// Persisted data version for a plugin, if one has been recorded.
    pub fn data_version(&self, name: &str) -> Result<Option<u64>, PluginSystemError> {
        match self.shared.data.get(&data_version_key(name))? {
            None => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                PluginSystemError::InternalError(format!(
                    "persisted data version for '{}' is not an integer",
                    name
                ))
            }),
        }
    }

    /// Overwrite the persisted data version for a plugin.
    pub fn set_data_version(&self, name: &str, version: u64) -> Result<(), PluginSystemError> {
        self.shared
            .data
            .set(&data_version_key(name), Value::from(version))?;
        Ok(())
    }

    /// Read a value from a plugin's namespaced data slot.
    pub fn plugin_data(&self, name: &str, key: &str) -> Result<Option<Value>, PluginSystemError> {
        Ok(self.shared.data.get(&plugin_data_key(name, key))?)
    }

    /// Write a value into a plugin's namespaced data slot.
    pub fn set_plugin_data(
        &self,
        name: &str,
        key: &str,
        value: Value,
    ) -> Result<(), PluginSystemError> {
        self.shared.data.set(&plugin_data_key(name, key), value)?;
        Ok(())
    }

    /// Registration names still parked on unresolved dependencies.
    pub fn pending_registrations(&self) -> Vec<String> {
        self.shared
            .graph
            .lock()
            .map(|g| g.pending_names())
            .unwrap_or_default()
    }

    /// Tear down session state: every record, graph node and in-memory
    /// enabled marker is dropped. Persisted state is left untouched.
    pub fn shutdown(&self) -> Result<(), PluginSystemError> {
        lock(&self.shared.registry)?.clear();
        lock(&self.shared.graph)?.clear();
        *lock(&self.shared.enabled)? = EnabledSet::default();
        *lock(&self.shared.view)? = None;
        Ok(())
    }

    pub(crate) fn notifier(&self) -> Arc<dyn Notifier> {
        self.shared.notifier.clone()
    }

    /// Run load attempts for `ready` nodes and any nodes their resolutions
    /// unblock, in resolution order. The first load failure aborts the
    /// drain and propagates to the caller that triggered it.
    fn drain(&self, ready: Vec<String>) -> Result<(), PluginSystemError> {
        let mut queue: VecDeque<String> = ready.into();
        while let Some(name) = queue.pop_front() {
            if name == ENVIRONMENT_DEP {
                continue;
            }
            queue.extend(self.load(&name)?);
        }
        Ok(())
    }

    /// Attempt activation for a plugin whose dependencies have all resolved.
    ///
    /// Returns the names of registrations unblocked by this plugin's own
    /// resolution. The data-version gate runs before the `Loading`
    /// transition, so a mismatch leaves the status exactly as it was before
    /// the attempt. Failures from the plugin's own enable hook are not
    /// intercepted.
    fn load(&self, name: &str) -> Result<Vec<String>, PluginSystemError> {
        let (enable, declared_data_version) = {
            let registry = lock(&self.shared.registry)?;
            let record = registry.get(name).ok_or_else(|| {
                PluginSystemError::InternalError(format!(
                    "plugin '{}' disappeared before load",
                    name
                ))
            })?;
            (record.enable.clone(), record.metadata.data_version)
        };

        if !self.is_enabled(name) {
            if let Some(record) = lock(&self.shared.registry)?.get_mut(name) {
                record.status = PluginStatus::Disabled;
                record.value = None;
            }
            debug!("plugin '{}' is not enabled; skipping activation", name);
            return Ok(Vec::new());
        }

        match self.data_version(name)? {
            None => self.set_data_version(name, declared_data_version)?,
            Some(persisted) if persisted == declared_data_version => {}
            Some(persisted) => {
                return Err(PluginSystemError::DataVersionMismatch {
                    plugin_name: name.to_string(),
                    declared: declared_data_version,
                    persisted,
                });
            }
        }

        let view = lock(&self.shared.view)?
            .clone()
            .ok_or_else(|| {
                PluginSystemError::InternalError("load attempted before host view bound".to_string())
            })?;

        if let Some(record) = lock(&self.shared.registry)?.get_mut(name) {
            record.status = PluginStatus::Loading;
        }
        debug!("loading plugin '{}'", name);

        // No locks held past this point: the hook may call back into the
        // controller through its capability object.
        let api = PluginApi::new(self.clone(), name.to_string(), view);
        let value = (enable)(api)?;

        if let Some(record) = lock(&self.shared.registry)?.get_mut(name) {
            record.value = Some(value.clone());
            record.status = PluginStatus::Loaded;
        }
        info!("plugin '{}' loaded", name);

        Ok(lock(&self.shared.graph)?.resolve(name, value))
    }

    /// Deactivate a `Loaded` plugin: run its disable hook with the current
    /// value, or fall back to the process-wide one-shot refresh notice,
    /// then clear the value and set `Disabled`.
    fn unload(&self, name: &str) -> Result<(), PluginSystemError> {
        let (disable, value) = {
            let registry = lock(&self.shared.registry)?;
            let record = registry.get(name).ok_or_else(|| {
                PluginSystemError::InternalError(format!(
                    "plugin '{}' disappeared before unload",
                    name
                ))
            })?;
            (record.disable.clone(), record.value.clone())
        };

        match (disable, value) {
            (Some(hook), Some(value)) => (hook)(&value)?,
            _ => {
                self.shared.unload_notice.fire(
                    self.shared.notifier.as_ref(),
                    Severity::Warning,
                    "plugins",
                    "A refresh is required to fully unload disabled plugins.",
                );
            }
        }

        if let Some(record) = lock(&self.shared.registry)?.get_mut(name) {
            record.value = None;
            record.status = PluginStatus::Disabled;
        }
        info!("plugin '{}' unloaded", name);
        Ok(())
    }

    fn load_enabled_set(&self) -> Result<(), PluginSystemError> {
        let loaded = match self.shared.settings.get(ENABLED_PLUGINS_KEY)? {
            Some(value) => EnabledSet::from_value(value).map_err(|e| {
                PluginSystemError::InternalError(format!(
                    "persisted enabled-set is malformed: {}",
                    e
                ))
            })?,
            None => {
                debug!("no persisted enabled-set; seeding defaults");
                let seeded = EnabledSet::seeded();
                self.persist_enabled_set(&seeded)?;
                seeded
            }
        };
        *lock(&self.shared.enabled)? = loaded;
        Ok(())
    }

    fn persist_enabled_set(&self, enabled: &EnabledSet) -> Result<(), PluginSystemError> {
        let value = enabled.to_value().map_err(|e| {
            PluginSystemError::InternalError(format!("enabled-set serialization failed: {}", e))
        })?;
        self.shared.settings.set(ENABLED_PLUGINS_KEY, value)?;
        Ok(())
    }
}
