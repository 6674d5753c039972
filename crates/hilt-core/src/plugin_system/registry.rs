use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::plugin_system::capability::PluginApi;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::metadata::PluginMetadata;
use crate::plugin_system::resolver::PluginValue;

/// Activation hook. Invoked with the plugin's scoped capability object; its
/// return value becomes the plugin's public value while Loaded.
pub type EnableFn =
    Arc<dyn Fn(PluginApi) -> Result<PluginValue, PluginSystemError> + Send + Sync>;

/// Deactivation hook. Invoked with the plugin's current public value.
pub type DisableFn = Arc<dyn Fn(&PluginValue) -> Result<(), PluginSystemError> + Send + Sync>;

/// Hook pair supplied at registration.
///
/// The enable hook is mandatory; registering without one is a contract
/// error. The disable hook is optional: plugins lacking one can only be
/// fully unloaded by a host refresh, which the controller announces through
/// a one-shot notice.
#[derive(Clone, Default)]
pub struct PluginHooks {
    pub enable: Option<EnableFn>,
    pub disable: Option<DisableFn>,
}

impl PluginHooks {
    /// Hooks with only an enable function.
    pub fn on_enable<F>(enable: F) -> Self
    where
        F: Fn(PluginApi) -> Result<PluginValue, PluginSystemError> + Send + Sync + 'static,
    {
        Self {
            enable: Some(Arc::new(enable)),
            disable: None,
        }
    }

    /// Add a disable function.
    pub fn on_disable<F>(mut self, disable: F) -> Self
    where
        F: Fn(&PluginValue) -> Result<(), PluginSystemError> + Send + Sync + 'static,
    {
        self.disable = Some(Arc::new(disable));
        self
    }
}

impl fmt::Debug for PluginHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHooks")
            .field("enable", &self.enable.is_some())
            .field("disable", &self.disable.is_some())
            .finish()
    }
}

/// Lifecycle state of a plugin.
///
/// `Unregistered` is implicit: it is the answer for any name absent from
/// the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStatus {
    /// Not present in the registry
    Unregistered,
    /// Validated; dependency resolution pending
    Registered,
    /// Dependencies resolved; activation attempt in progress
    Loading,
    /// Activation hook returned successfully
    Loaded,
    /// Never enabled, or explicitly disabled after having been Loaded
    Disabled,
}

impl fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PluginStatus::Unregistered => "Unregistered",
            PluginStatus::Registered => "Registered",
            PluginStatus::Loading => "Loading",
            PluginStatus::Loaded => "Loaded",
            PluginStatus::Disabled => "Disabled",
        };
        write!(f, "{}", s)
    }
}

/// One registered plugin: immutable validated metadata plus mutable runtime
/// state, owned exclusively by the registry and accessed by name.
pub struct PluginRecord {
    /// Validated metadata, immutable once stored
    pub metadata: PluginMetadata,
    /// Snapshot of the original unvalidated metadata, kept for reference
    pub raw_metadata: Value,
    /// Current lifecycle state
    pub status: PluginStatus,
    /// Public value returned by the enable hook. Present iff status is
    /// Loaded.
    pub value: Option<PluginValue>,
    /// Activation hook
    pub enable: EnableFn,
    /// Optional deactivation hook
    pub disable: Option<DisableFn>,
    /// Declared dependencies plus the implicit environment dependency
    pub effective_dependencies: Vec<String>,
}

impl fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRecord")
            .field("metadata", &self.metadata)
            .field("status", &self.status)
            .field("value", &self.value.is_some())
            .field("effective_dependencies", &self.effective_dependencies)
            .finish_non_exhaustive()
    }
}

/// Registry owning the table of plugin records.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Registered plugins keyed by name
    records: HashMap<String, PluginRecord>,
}

impl PluginRegistry {
    /// Create a new empty plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record under the same name.
    ///
    /// Replacement does not unload the previous record's value. Returns true
    /// if a record was replaced.
    pub fn insert(&mut self, record: PluginRecord) -> bool {
        self.records
            .insert(record.metadata.name.clone(), record)
            .is_some()
    }

    /// Check if a plugin is registered by name.
    pub fn is_registered(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Get a record by name.
    pub fn get(&self, name: &str) -> Option<&PluginRecord> {
        self.records.get(name)
    }

    /// Get a mutable record by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut PluginRecord> {
        self.records.get_mut(name)
    }

    /// Lifecycle status for `name`; absent names are `Unregistered`.
    pub fn status(&self, name: &str) -> PluginStatus {
        self.records
            .get(name)
            .map(|r| r.status)
            .unwrap_or(PluginStatus::Unregistered)
    }

    /// Public value of a Loaded plugin.
    pub fn value(&self, name: &str) -> Option<PluginValue> {
        self.records
            .get(name)
            .filter(|r| r.status == PluginStatus::Loaded)
            .and_then(|r| r.value.clone())
    }

    /// All registered plugin names, sorted for stable enumeration.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered plugins.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
