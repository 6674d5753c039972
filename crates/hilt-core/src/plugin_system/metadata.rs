use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::plugin_system::error::PluginSystemError;

/// Pattern every plugin name must satisfy. The name doubles as the unique
/// registry key and as the namespace prefix for persisted plugin data.
pub const NAME_PATTERN: &str = "^[A-Za-z0-9_ ]{3,20}$";

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a compile-time constant; a failure here is a programmer
    // error, not an input error.
    Regex::new(NAME_PATTERN).expect("invalid plugin name pattern")
});

fn default_version() -> u64 {
    1
}

fn default_data_version() -> u64 {
    1
}

/// Validated plugin metadata. Immutable once produced by
/// [`MetadataValidator::validate`]; the registry additionally snapshots the
/// raw pre-validation value for reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique plugin name, pattern `^[A-Za-z0-9_ ]{3,20}$`
    pub name: String,

    /// Plugin version
    #[serde(default = "default_version")]
    pub version: u64,

    /// Plugin author
    #[serde(default)]
    pub author: Option<String>,

    /// Plugin description
    #[serde(default)]
    pub description: Option<String>,

    /// Declared dependencies on other plugins, in order
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Integer tag guarding the shape of the plugin's persisted data.
    /// A mismatch against the persisted record is fatal at load time.
    #[serde(default = "default_data_version", rename = "dataVersion")]
    pub data_version: u64,
}

/// Validates raw plugin metadata against the fixed schema and fills defaults.
#[derive(Debug, Default)]
pub struct MetadataValidator;

impl MetadataValidator {
    pub fn new() -> Self {
        Self
    }

    /// Run `raw` against the fixed schema.
    ///
    /// Fails with a [`PluginSystemError::Validation`] carrying the violation
    /// detail if `name` is missing or violates its pattern, or any field has
    /// the wrong type. On success every absent optional field is filled with
    /// its default. No side effects beyond the returned value.
    pub fn validate(&self, raw: &Value) -> Result<PluginMetadata, PluginSystemError> {
        let obj = raw.as_object().ok_or_else(|| PluginSystemError::Validation {
            detail: "metadata must be an object".to_string(),
        })?;

        // Check the name up front so the error names the actual violation
        // instead of a generic deserialization failure.
        let name = match obj.get("name") {
            None => {
                return Err(PluginSystemError::Validation {
                    detail: "missing required field 'name'".to_string(),
                })
            }
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(PluginSystemError::Validation {
                    detail: format!("field 'name' must be a string, got {}", json_type_name(other)),
                })
            }
        };
        if !NAME_REGEX.is_match(name) {
            return Err(PluginSystemError::Validation {
                detail: format!("name '{}' does not match pattern {}", name, NAME_PATTERN),
            });
        }

        let metadata: PluginMetadata =
            serde_json::from_value(raw.clone()).map_err(|e| PluginSystemError::Validation {
                detail: e.to_string(),
            })?;

        if metadata.version < 1 {
            return Err(PluginSystemError::Validation {
                detail: format!("field 'version' must be >= 1, got {}", metadata.version),
            });
        }
        if metadata.data_version < 1 {
            return Err(PluginSystemError::Validation {
                detail: format!("field 'dataVersion' must be >= 1, got {}", metadata.data_version),
            });
        }

        Ok(metadata)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
