//! Generic field payloads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::fmt;

use crate::error::{Error, Result};

/// A field value as handed over by the authoring system.
///
/// Every shape the extractor understands is a variant here, so consumers
/// match exhaustively instead of probing for capabilities.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value
    #[default]
    Null,

    /// Boolean flag
    Bool(bool),

    /// Numeric scalar
    Number(Number),

    /// Plain string
    String(String),

    /// Ordered sequence (also the shape of a nested document)
    List(Vec<Value>),

    /// Ordered key/value mapping (a node, a set, or a converted object)
    Mapping(Mapping),

    /// Wrapped scalar exposing its raw value (e.g. a lazily parsed field)
    Lazy(Box<Value>),

    /// Object with nothing but a string form
    Opaque(String),
}

impl Value {
    /// Wrap a value in a lazy holder.
    pub fn lazy(inner: impl Into<Value>) -> Self {
        Value::Lazy(Box::new(inner.into()))
    }

    /// Create an opaque value from anything displayable.
    pub fn opaque(display: impl fmt::Display) -> Self {
        Value::Opaque(display.to_string())
    }

    /// Parse a JSON document into a value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Whether the value counts as empty and is skipped during extraction.
    ///
    /// Holders and opaque objects are never empty, even when what they wrap is.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Mapping(map) => map.is_empty(),
            Value::Lazy(_) | Value::Opaque(_) => false,
        }
    }

    /// Short name of the variant, used in log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Mapping(_) => "mapping",
            Value::Lazy(_) => "lazy",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Borrow the string if this is a plain string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the mapping if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the items if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Iterate the children of a list or the values of a mapping.
    ///
    /// Returns `None` for anything that is not iterable.
    pub fn children(&self) -> Option<Box<dyn Iterator<Item = &Value> + '_>> {
        match self {
            Value::List(items) => Some(Box::new(items.iter())),
            Value::Mapping(map) => Some(Box::new(map.values())),
            _ => None,
        }
    }

    /// Whether a list looks like a nested document: its first element is a
    /// mapping carrying a `type` key.
    pub fn looks_like_document(&self) -> bool {
        match self {
            Value::List(items) => items
                .first()
                .and_then(Value::as_mapping)
                .is_some_and(|first| first.contains_key("type")),
            _ => false,
        }
    }

    /// Coerce a text payload into a string.
    ///
    /// Lazy holders are unwrapped, scalars are stringified, and structured
    /// values are rejected.
    pub fn coerce_text(&self) -> Result<String> {
        match self {
            Value::Null => Ok(String::new()),
            Value::Bool(true) => Ok("1".to_string()),
            Value::Bool(false) => Ok(String::new()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::Lazy(inner) => inner.coerce_text(),
            Value::Opaque(s) => Ok(s.clone()),
            Value::List(_) | Value::Mapping(_) => Err(Error::MalformedText(format!(
                "expected string, found {}",
                self.type_name()
            ))),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(Mapping::from_json_object(map)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

/// Insertion-ordered string-keyed mapping.
///
/// Field order is output order, so a hash map won't do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a mutable value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Check whether a key is present (even if its value is null).
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON object keys are already unique, so entries are taken as-is.
    fn from_json_object(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            entries: map
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        }
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) | Value::Opaque(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Mapping(map) => map.serialize(serializer),
            Value::Lazy(inner) => inner.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Map::deserialize(deserializer).map(Mapping::from_json_object)
    }
}
