//! # bardtext
//!
//! Flatten rich-text Bard documents into clean, indexable plain text.
//!
//! A Bard document is an ordered list of nodes: text runs carrying inline
//! marks, and typed "sets" whose fields may hold further documents. This
//! library walks such a document and produces a single cleaned string for
//! a search index. It never fails: if the blueprint lookup misses or any
//! step of the schema-aware walk errors, the same input is flattened again
//! without a schema.
//!
//! ## Quick Start
//!
//! ```
//! use bardtext::schema::{Blueprint, BlueprintRegistry, FieldDescriptor};
//! use bardtext::{Transformer, Value};
//!
//! let registry = BlueprintRegistry::new().with_blueprint(
//!     "collections/pages/page",
//!     Blueprint::new().with_field(FieldDescriptor::new("content", "bard")),
//! );
//!
//! let document = Value::from_json_str(
//!     r#"[
//!         {"type": "text", "text": "Hello **world**"},
//!         {"type": "quote", "id": "q1", "quote": "Brevity is wit"}
//!     ]"#,
//! )?;
//!
//! let text = Transformer::new(registry).transform(
//!     &document,
//!     "collections/pages/page",
//!     "content",
//!     &["quote"],
//! );
//! assert_eq!(text, "Hello world Brevity is wit");
//! # Ok::<(), bardtext::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Depth-bounded walk**: nested sets are followed up to `max_depth`
//! - **Link redaction**: internal `statamic://` links in nested runs are cleared
//! - **Cleanup pipeline**: markup, entities and whitespace normalized for indexing
//! - **Graceful fallback**: schema misses and errors degrade to raw extraction
//! - **Parallel processing**: optional Rayon fan-out over top-level nodes

pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{
    ExtractionEvent, ExtractionListener, ExtractionOptions, Extractor, LogListener, NullListener,
    SetTypes, TransformOptions,
};
pub use model::{Mapping, Mark, Node, Value};
pub use render::{clean_text, HtmlRenderer, MarkdownRenderer, PassthroughRenderer, TextCleaner};
pub use schema::{Blueprint, BlueprintRegistry, FieldDescriptor, NoSchema, SchemaLookup};

use std::sync::{Arc, OnceLock};

/// Which path produced a transform's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionPath {
    /// The input was empty; nothing was looked up.
    Empty,

    /// The blueprint field was found and the schema-aware walk succeeded.
    Schema,

    /// The raw fallback produced the text.
    Fallback(FallbackReason),
}

/// Why the raw fallback was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The blueprint or the field does not exist.
    SchemaUnavailable,

    /// The lookup or the schema-aware walk failed with this error.
    ExtractionFailure(String),
}

/// Text produced by a transform, with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// The flattened, cleaned text
    pub text: String,

    /// How the text was produced
    pub path: ExtractionPath,
}

impl Transformed {
    /// Check if the raw fallback produced the text.
    pub fn is_fallback(&self) -> bool {
        matches!(self.path, ExtractionPath::Fallback(_))
    }
}

/// Flatten a document using the default renderer and the `log` listener.
///
/// # Example
///
/// ```
/// use bardtext::{transform, NoSchema, TransformOptions, Value};
///
/// let document = Value::from_json_str(r#"["plain", "strings"]"#).unwrap();
/// let text = transform(&document, &NoSchema, "pages/page", "content", &[], &TransformOptions::default());
/// assert_eq!(text, "plain strings");
/// ```
pub fn transform(
    document: &Value,
    schema: &dyn SchemaLookup,
    blueprint_path: &str,
    field: &str,
    extra_set_types: &[&str],
    options: &TransformOptions,
) -> String {
    transform_detailed(document, schema, blueprint_path, field, extra_set_types, options).text
}

/// Like [`transform`], but reads options from a loosely typed map
/// (`max_depth`, `max_length`).
pub fn transform_with_map(
    document: &Value,
    schema: &dyn SchemaLookup,
    blueprint_path: &str,
    field: &str,
    extra_set_types: &[&str],
    options: &serde_json::Map<String, serde_json::Value>,
) -> String {
    transform(
        document,
        schema,
        blueprint_path,
        field,
        extra_set_types,
        &TransformOptions::from_map(options),
    )
}

/// Like [`transform`], but also reports which path produced the text.
pub fn transform_detailed(
    document: &Value,
    schema: &dyn SchemaLookup,
    blueprint_path: &str,
    field: &str,
    extra_set_types: &[&str],
    options: &TransformOptions,
) -> Transformed {
    let shared = shared_defaults();
    run(
        Collaborators {
            schema,
            renderer: &shared.renderer,
            cleaner: &shared.cleaner,
            listener: &LogListener,
        },
        document,
        blueprint_path,
        field,
        extra_set_types,
        options,
    )
}

/// Flatten a document with default options.
#[deprecated(since = "0.2.0", note = "Use transform() or Transformer instead")]
pub fn transform_legacy(
    document: &Value,
    schema: &dyn SchemaLookup,
    blueprint_path: &str,
    field: &str,
    extra_set_types: &[&str],
) -> String {
    transform(
        document,
        schema,
        blueprint_path,
        field,
        extra_set_types,
        &TransformOptions::default(),
    )
}

/// Builder holding the collaborators and default options for transforms.
///
/// # Example
///
/// ```
/// use bardtext::{NoSchema, PassthroughRenderer, Transformer, TransformOptions, Value};
///
/// let transformer = Transformer::new(NoSchema)
///     .with_renderer(PassthroughRenderer)
///     .with_options(TransformOptions::new().with_max_length(5));
///
/// let text = transformer.transform(&Value::from("Hello world"), "pages/page", "content", &[]);
/// assert_eq!(text, "Hello");
/// ```
pub struct Transformer {
    schema: Arc<dyn SchemaLookup>,
    renderer: Arc<dyn MarkdownRenderer>,
    listener: Arc<dyn ExtractionListener>,
    cleaner: TextCleaner,
    options: TransformOptions,
}

impl Transformer {
    /// Create a transformer around a schema lookup.
    pub fn new(schema: impl SchemaLookup + 'static) -> Self {
        Self {
            schema: Arc::new(schema),
            renderer: Arc::new(HtmlRenderer::new()),
            listener: Arc::new(LogListener),
            cleaner: TextCleaner::new(),
            options: TransformOptions::default(),
        }
    }

    /// Create a transformer around a shared schema lookup.
    pub fn with_shared_schema(schema: Arc<dyn SchemaLookup>) -> Self {
        Self {
            schema,
            ..Self::new(NoSchema)
        }
    }

    /// Set the markdown renderer.
    pub fn with_renderer(mut self, renderer: impl MarkdownRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Set the event listener.
    pub fn with_listener(mut self, listener: Arc<dyn ExtractionListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Set the default options.
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the traversal depth bound.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_max_depth(depth);
        self
    }

    /// Set the output length cap.
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.options = self.options.with_max_length(length);
        self
    }

    /// Extract top-level nodes in parallel.
    pub fn parallel(mut self) -> Self {
        self.options = self.options.with_parallel(true);
        self
    }

    /// Default options of this transformer.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Flatten a document with this transformer's options.
    pub fn transform(
        &self,
        document: &Value,
        blueprint_path: &str,
        field: &str,
        extra_set_types: &[&str],
    ) -> String {
        self.transform_detailed(document, blueprint_path, field, extra_set_types, &self.options)
            .text
    }

    /// Flatten a document with explicit options.
    pub fn transform_with_options(
        &self,
        document: &Value,
        blueprint_path: &str,
        field: &str,
        extra_set_types: &[&str],
        options: &TransformOptions,
    ) -> String {
        self.transform_detailed(document, blueprint_path, field, extra_set_types, options)
            .text
    }

    /// Flatten a document with options read from a loosely typed map.
    pub fn transform_with_map(
        &self,
        document: &Value,
        blueprint_path: &str,
        field: &str,
        extra_set_types: &[&str],
        options: &serde_json::Map<String, serde_json::Value>,
    ) -> String {
        let mut options = TransformOptions::from_map(options);
        options.parallel = self.options.parallel;
        self.transform_with_options(document, blueprint_path, field, extra_set_types, &options)
    }

    /// Flatten a document and report which path produced the text.
    pub fn transform_detailed(
        &self,
        document: &Value,
        blueprint_path: &str,
        field: &str,
        extra_set_types: &[&str],
        options: &TransformOptions,
    ) -> Transformed {
        run(
            Collaborators {
                schema: self.schema.as_ref(),
                renderer: self.renderer.as_ref(),
                cleaner: &self.cleaner,
                listener: self.listener.as_ref(),
            },
            document,
            blueprint_path,
            field,
            extra_set_types,
            options,
        )
    }
}

struct SharedDefaults {
    renderer: HtmlRenderer,
    cleaner: TextCleaner,
}

fn shared_defaults() -> &'static SharedDefaults {
    static DEFAULTS: OnceLock<SharedDefaults> = OnceLock::new();
    DEFAULTS.get_or_init(|| SharedDefaults {
        renderer: HtmlRenderer::new(),
        cleaner: TextCleaner::new(),
    })
}

#[derive(Clone, Copy)]
struct Collaborators<'a> {
    schema: &'a dyn SchemaLookup,
    renderer: &'a dyn MarkdownRenderer,
    cleaner: &'a TextCleaner,
    listener: &'a dyn ExtractionListener,
}

fn run(
    collaborators: Collaborators<'_>,
    document: &Value,
    blueprint_path: &str,
    field: &str,
    extra_set_types: &[&str],
    transform_options: &TransformOptions,
) -> Transformed {
    if document.is_empty() {
        return Transformed {
            text: String::new(),
            path: ExtractionPath::Empty,
        };
    }

    let set_types = SetTypes::new(extra_set_types.iter().copied());
    let options = ExtractionOptions::new(&set_types, transform_options);
    let extractor = Extractor::new(
        collaborators.renderer,
        collaborators.cleaner,
        collaborators.listener,
    );

    match extract_with_schema(
        &extractor,
        collaborators,
        document,
        blueprint_path,
        field,
        options,
    ) {
        Ok(Some(text)) => Transformed {
            text,
            path: ExtractionPath::Schema,
        },
        Ok(None) => {
            collaborators
                .listener
                .on_event(&ExtractionEvent::SchemaUnavailable {
                    path: blueprint_path.to_string(),
                    field: field.to_string(),
                });
            Transformed {
                text: extractor.process_raw_content(document, options),
                path: ExtractionPath::Fallback(FallbackReason::SchemaUnavailable),
            }
        }
        Err(err) => {
            let reason = err.to_string();
            collaborators
                .listener
                .on_event(&ExtractionEvent::FallbackTaken {
                    reason: reason.clone(),
                });
            Transformed {
                text: extractor.process_raw_content(document, options),
                path: ExtractionPath::Fallback(FallbackReason::ExtractionFailure(reason)),
            }
        }
    }
}

/// `Ok(None)` when the blueprint or field is missing.
fn extract_with_schema(
    extractor: &Extractor<'_>,
    collaborators: Collaborators<'_>,
    document: &Value,
    blueprint_path: &str,
    field: &str,
    options: ExtractionOptions<'_>,
) -> Result<Option<String>> {
    let blueprint = collaborators.schema.find(blueprint_path)?;
    if !blueprint.is_some_and(|blueprint| blueprint.field(field).is_some()) {
        return Ok(None);
    }

    collaborators
        .listener
        .on_event(&ExtractionEvent::SchemaResolved {
            path: blueprint_path.to_string(),
            field: field.to_string(),
        });

    let fragments = extractor.extract_content(document, options)?;
    Ok(Some(extractor.clean(&fragments.join(" "), options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> BlueprintRegistry {
        BlueprintRegistry::new().with_blueprint(
            "pages/page",
            Blueprint::new().with_field(FieldDescriptor::new("content", "bard")),
        )
    }

    #[test]
    fn test_transformer_builder() {
        let transformer = Transformer::new(registry())
            .with_max_depth(5)
            .with_max_length(10)
            .parallel();

        assert_eq!(transformer.options().max_depth, 5);
        assert_eq!(transformer.options().max_length, 10);
        assert!(transformer.options().parallel);
    }

    #[test]
    fn test_transformer_builder_default_options() {
        let transformer = Transformer::new(NoSchema);
        assert_eq!(transformer.options(), &TransformOptions::default());
    }

    #[test]
    fn test_empty_document_paths() {
        let transformer = Transformer::new(registry());
        for empty in [json!(null), json!(""), json!([]), json!({})] {
            let result = transformer.transform_detailed(
                &Value::from(empty),
                "pages/page",
                "content",
                &[],
                &TransformOptions::default(),
            );
            assert_eq!(result.text, "");
            assert_eq!(result.path, ExtractionPath::Empty);
        }
    }

    #[test]
    fn test_schema_path_taken() {
        let document = Value::from(json!([{"type": "text", "text": "Body"}]));
        let result = Transformer::new(registry()).transform_detailed(
            &document,
            "pages/page",
            "content",
            &[],
            &TransformOptions::default(),
        );
        assert_eq!(result.text, "Body");
        assert_eq!(result.path, ExtractionPath::Schema);
        assert!(!result.is_fallback());
    }

    #[test]
    fn test_missing_field_falls_back() {
        let document = Value::from(json!(["raw", "strings"]));
        let result = Transformer::new(registry()).transform_detailed(
            &document,
            "pages/page",
            "summary",
            &[],
            &TransformOptions::default(),
        );
        assert_eq!(result.text, "raw strings");
        assert_eq!(
            result.path,
            ExtractionPath::Fallback(FallbackReason::SchemaUnavailable)
        );
    }

    #[test]
    fn test_map_options() {
        let options = json!({"max_length": 3});
        let text = Transformer::new(NoSchema).transform_with_map(
            &Value::from("abcdef"),
            "pages/page",
            "content",
            &[],
            options.as_object().unwrap(),
        );
        assert_eq!(text, "abc");
    }

    #[test]
    #[allow(deprecated)]
    fn test_legacy_alias() {
        let document = Value::from(json!([{"type": "text", "text": "Legacy"}]));
        assert_eq!(
            transform_legacy(&document, &registry(), "pages/page", "content", &[]),
            "Legacy"
        );
    }
}
