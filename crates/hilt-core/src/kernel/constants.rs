/// Application name
pub const APP_NAME: &str = "Hilt";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Sentinel dependency node representing host-view readiness. Every plugin
/// registration implicitly waits on it. The `@` keeps it outside the valid
/// plugin-name space, so no registration can ever collide with it.
pub const ENVIRONMENT_DEP: &str = "@env";

/// Settings key holding the persisted enabled-set (plugin name -> bool).
pub const ENABLED_PLUGINS_KEY: &str = "enabledPlugins";

/// Plugins enabled out of the box when no enabled-set has been persisted yet.
pub const DEFAULT_ENABLED_PLUGINS: &[(&str, bool)] = &[("Hello World js", true)];

/// Always-enabled plugins, exempt from the enabled-set gate and from
/// `disable_plugin`.
pub const CORE_PLUGINS: &[&str] = &["Settings"];

/// Default settings store file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default plugin data store file name
pub const DATA_FILE_NAME: &str = "plugin-data.json";

/// Key prefix for per-plugin persisted state. The plugin name is the
/// namespace component, preventing cross-plugin collisions.
pub const PLUGIN_KEY_PREFIX: &str = "plugin";

/// Build the data-store key for a plugin's data version record.
pub fn data_version_key(plugin_name: &str) -> String {
    format!("{}:{}:dataVersion", PLUGIN_KEY_PREFIX, plugin_name)
}

/// Build the data-store key for one of a plugin's namespaced data slots.
pub fn plugin_data_key(plugin_name: &str, key: &str) -> String {
    format!("{}:{}:data:{}", PLUGIN_KEY_PREFIX, plugin_name, key)
}

/// Whether `name` belongs to the fixed core-plugin set.
pub fn is_core_plugin(name: &str) -> bool {
    CORE_PLUGINS.contains(&name)
}
