//! Extraction options and configuration.

use std::collections::BTreeSet;

/// Default bound on set traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default cap on output length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 90_000;

/// Caller-facing options for a transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Maximum depth of nested set fields to descend into
    pub max_depth: usize,

    /// Maximum length of the cleaned output, in characters
    pub max_length: usize,

    /// Extract top-level nodes in parallel
    pub parallel: bool,
}

impl TransformOptions {
    /// Create new transform options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the traversal depth bound.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the output length cap.
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    /// Enable or disable parallel node extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Read options from a loosely typed key/value map.
    ///
    /// Recognizes `max_depth` and `max_length`. Values that are not
    /// non-negative integers (or strings holding one) keep their defaults;
    /// unknown keys are ignored.
    pub fn from_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut options = Self::default();
        if let Some(depth) = map.get("max_depth").and_then(read_usize) {
            options.max_depth = depth;
        }
        if let Some(length) = map.get("max_length").and_then(read_usize) {
            options.max_length = length;
        }
        options
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
            parallel: false,
        }
    }
}

fn read_usize(value: &serde_json::Value) -> Option<usize> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Set types recognized for a transform. Always contains `"text"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTypes(BTreeSet<String>);

impl SetTypes {
    /// Build the set from user-declared extra types.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut types: BTreeSet<String> = extra.into_iter().map(Into::into).collect();
        types.insert("text".to_string());
        Self(types)
    }

    /// Check whether a set type was declared.
    pub fn contains(&self, set_type: &str) -> bool {
        self.0.contains(set_type)
    }

    /// Iterate the declared types in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; `"text"` is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SetTypes {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

/// Immutable per-call extraction state.
///
/// Each recursion level receives a fresh copy from [`ExtractionOptions::descend`];
/// nothing is shared or mutated across levels.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionOptions<'a> {
    set_types: &'a SetTypes,
    max_depth: usize,
    max_length: usize,
    current_depth: usize,
    parallel: bool,
}

impl<'a> ExtractionOptions<'a> {
    /// Create top-level extraction options (depth 0).
    pub fn new(set_types: &'a SetTypes, options: &TransformOptions) -> Self {
        Self {
            set_types,
            max_depth: options.max_depth,
            max_length: options.max_length,
            current_depth: 0,
            parallel: options.parallel,
        }
    }

    /// Options for the next level down.
    pub fn descend(self) -> Self {
        Self {
            current_depth: self.current_depth + 1,
            ..self
        }
    }

    /// Whether the depth bound has been reached at this level.
    pub fn depth_exhausted(&self) -> bool {
        self.current_depth >= self.max_depth
    }

    /// Declared set types.
    pub fn set_types(&self) -> &'a SetTypes {
        self.set_types
    }

    /// Traversal depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Output length cap.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Depth of the level these options belong to.
    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// Whether top-level nodes may be extracted in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}
