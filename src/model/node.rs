//! Typed views over document nodes and their inline marks.

use serde::{Deserialize, Serialize};

use super::{Mapping, Value};

/// Node type carried by plain text runs.
pub const TEXT_NODE_TYPE: &str = "text";

/// Mark type carried by hyperlinks.
pub const LINK_MARK_TYPE: &str = "link";

/// One element of a document, classified by shape.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A text run (`type == "text"`)
    Text(TextNode<'a>),

    /// Any other typed or untyped mapping
    Set(SetNode<'a>),

    /// Not a mapping at all; skipped by every walker
    Opaque,
}

impl<'a> Node<'a> {
    /// Classify a raw value as a node.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Mapping(map) => Self::from_mapping(map),
            _ => Node::Opaque,
        }
    }

    /// Classify a mapping as either a text run or a set block.
    pub fn from_mapping(map: &'a Mapping) -> Self {
        match map.get_str("type") {
            Some(TEXT_NODE_TYPE) => Node::Text(TextNode { raw: map }),
            _ => Node::Set(SetNode { raw: map }),
        }
    }
}

/// View over a text run node.
#[derive(Debug, Clone, Copy)]
pub struct TextNode<'a> {
    raw: &'a Mapping,
}

impl<'a> TextNode<'a> {
    /// The raw `text` payload, if present.
    pub fn text(&self) -> Option<&'a Value> {
        self.raw.get("text")
    }

    /// Typed marks of this run; entries that are not mappings are dropped.
    pub fn marks(&self) -> Vec<Mark> {
        self.raw
            .get("marks")
            .and_then(Value::as_list)
            .map(|marks| marks.iter().filter_map(Mark::from_value).collect())
            .unwrap_or_default()
    }

    /// The underlying mapping.
    pub fn raw(&self) -> &'a Mapping {
        self.raw
    }
}

/// View over a set block node.
#[derive(Debug, Clone, Copy)]
pub struct SetNode<'a> {
    raw: &'a Mapping,
}

impl<'a> SetNode<'a> {
    /// The set type, if the node carries one.
    pub fn set_type(&self) -> Option<&'a str> {
        self.raw.get_str("type")
    }

    /// All fields of the set, structural keys included.
    pub fn fields(&self) -> &'a Mapping {
        self.raw
    }
}

/// Inline annotation on a text run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Mark type (`"link"`, `"bold"`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Link target; only meaningful for link marks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Every other attribute, as authored.
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub attrs: Mapping,
}

impl Mark {
    /// Create a mark of the given type with no attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Create a link mark.
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            kind: LINK_MARK_TYPE.to_string(),
            href: Some(href.into()),
            attrs: Mapping::new(),
        }
    }

    /// Read a mark from a raw mapping value.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_mapping()?;
        let kind = map.get_str("type").unwrap_or_default().to_string();
        let mut mark = Mark::new(kind);

        if let Some(attrs) = map.get("attrs").and_then(Value::as_mapping) {
            for (key, attr) in attrs.iter() {
                match (key, attr) {
                    ("href", Value::String(href)) => mark.href = Some(href.clone()),
                    ("href", _) => {}
                    (_, other) => mark.attrs.insert(key, other.clone()),
                }
            }
        }

        Some(mark)
    }

    /// Check if this is a link mark.
    pub fn is_link(&self) -> bool {
        self.kind == LINK_MARK_TYPE
    }
}
