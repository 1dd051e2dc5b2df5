//! The attribute tree fed to template rendering

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Attribute tree loaded from a config file.
///
/// Top-level keys map directly to template placeholder names. The tree is
/// read-only once loaded; rendering never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub JsonValue);

impl Values {
    /// Create an empty attribute tree
    pub fn new() -> Self {
        Self(JsonValue::Object(serde_json::Map::new()))
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml).map(Self)
    }

    /// Look up a value by dotted path (e.g. `"image.tag"`)
    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        let mut current = &self.0;
        for key in path.split('.') {
            current = current.as_object()?.get(key)?;
        }
        Some(current)
    }

    /// Number of top-level keys; zero for any non-mapping document
    pub fn top_level_keys(&self) -> usize {
        match &self.0 {
            JsonValue::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// True when the tree would render every placeholder blank
    pub fn is_empty(&self) -> bool {
        self.top_level_keys() == 0
    }

    /// Borrow the inner JSON value
    pub fn inner(&self) -> &JsonValue {
        &self.0
    }

    /// Consume into the inner JSON value
    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}
