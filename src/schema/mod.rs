//! Blueprint lookup.
//!
//! The extractor consults a blueprint only to confirm that the field being
//! indexed exists. A missing blueprint or field routes the transform to the
//! schema-agnostic fallback; a failing lookup does the same via the error
//! boundary.
//!
//! # Example
//!
//! ```
//! use bardtext::schema::{BlueprintRegistry, SchemaLookup};
//!
//! let registry = BlueprintRegistry::from_json_str(
//!     r#"{"collections/pages/page": {"fields": [{"handle": "content", "type": "bard"}]}}"#,
//! )?;
//! let blueprint = registry.find("collections/pages/page")?.unwrap();
//! assert!(blueprint.field("content").is_some());
//! # Ok::<(), bardtext::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;

/// Source of blueprints, keyed by blueprint path.
pub trait SchemaLookup: Send + Sync {
    /// Find the blueprint stored under `path`.
    ///
    /// `Ok(None)` means "no such blueprint"; `Err` means the lookup itself
    /// failed.
    fn find(&self, path: &str) -> Result<Option<Arc<Blueprint>>>;
}

impl<F> SchemaLookup for F
where
    F: Fn(&str) -> Result<Option<Arc<Blueprint>>> + Send + Sync,
{
    fn find(&self, path: &str) -> Result<Option<Arc<Blueprint>>> {
        self(path)
    }
}

/// Lookup that never finds anything; every transform takes the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaLookup for NoSchema {
    fn find(&self, _path: &str) -> Result<Option<Arc<Blueprint>>> {
        Ok(None)
    }
}

/// Field layout of one content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl Blueprint {
    /// Create an empty blueprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by handle.
    pub fn field(&self, handle: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.handle == handle)
    }
}

/// Declared field of a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field handle (name)
    pub handle: String,

    /// Fieldtype, e.g. `bard`, `text`, `replicator`
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,

    /// Fieldtype configuration, kept as-is
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

fn default_field_type() -> String {
    "text".to_string()
}

impl FieldDescriptor {
    /// Create a field descriptor.
    pub fn new(handle: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            field_type: field_type.into(),
            config: serde_json::Map::new(),
        }
    }
}

/// In-memory blueprint store.
#[derive(Debug, Clone, Default)]
pub struct BlueprintRegistry {
    blueprints: HashMap<String, Arc<Blueprint>>,
}

impl BlueprintRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON object mapping paths to blueprints.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Blueprint> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for (path, blueprint) in raw {
            registry.register(path, blueprint);
        }
        Ok(registry)
    }

    /// Load a registry from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Register a blueprint under a path, replacing any previous one.
    pub fn register(&mut self, path: impl Into<String>, blueprint: Blueprint) {
        self.blueprints.insert(path.into(), Arc::new(blueprint));
    }

    /// Builder-style register.
    pub fn with_blueprint(mut self, path: impl Into<String>, blueprint: Blueprint) -> Self {
        self.register(path, blueprint);
        self
    }

    /// Check whether a path is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.blueprints.contains_key(path)
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.blueprints.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Number of registered blueprints.
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

impl SchemaLookup for BlueprintRegistry {
    fn find(&self, path: &str) -> Result<Option<Arc<Blueprint>>> {
        Ok(self.blueprints.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const REGISTRY_JSON: &str = r#"{
        "collections/pages/page": {
            "fields": [
                {"handle": "title"},
                {"handle": "content", "type": "bard", "config": {"sets": ["quote"]}}
            ]
        },
        "collections/blog/post": {}
    }"#;

    #[test]
    fn test_registry_from_json() {
        let registry = BlueprintRegistry::from_json_str(REGISTRY_JSON).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.paths(),
            vec!["collections/blog/post", "collections/pages/page"]
        );

        let page = registry.find("collections/pages/page").unwrap().unwrap();
        assert_eq!(page.field("title").unwrap().field_type, "text");
        let content = page.field("content").unwrap();
        assert_eq!(content.field_type, "bard");
        assert!(content.config.contains_key("sets"));
        assert!(page.field("missing").is_none());

        let post = registry.find("collections/blog/post").unwrap().unwrap();
        assert!(post.fields.is_empty());
    }

    #[test]
    fn test_registry_missing_path() {
        let registry = BlueprintRegistry::new()
            .with_blueprint("a", Blueprint::new().with_field(FieldDescriptor::new("body", "bard")));
        assert!(registry.contains("a"));
        assert!(registry.find("b").unwrap().is_none());
    }

    #[test]
    fn test_registry_invalid_json() {
        let result = BlueprintRegistry::from_json_str("[1, 2]");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_registry_missing_file() {
        let result = BlueprintRegistry::from_path("/definitely/not/here.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_closure_lookup() {
        let failing = |_: &str| -> Result<Option<Arc<Blueprint>>> {
            Err(Error::SchemaLookup("store offline".into()))
        };
        assert!(failing.find("anything").is_err());
        assert!(NoSchema.find("anything").unwrap().is_none());
    }
}
