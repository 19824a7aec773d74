//! Schema-agnostic fallback extraction.

use crate::model::Value;

use super::{join_fragments, ExtractionEvent, ExtractionOptions, Extractor};

impl Extractor<'_> {
    /// Flatten input without consulting a schema. Never fails.
    ///
    /// Strings are cleaned directly; lists and mappings have each child
    /// reduced to text, joined and cleaned. Anything else yields `""`.
    /// A child whose extraction fails is dropped rather than failing the
    /// whole result.
    pub fn process_raw_content(&self, input: &Value, options: ExtractionOptions<'_>) -> String {
        if let Value::String(s) = input {
            return self.clean(s, options);
        }

        let Some(children) = input.children() else {
            return String::new();
        };

        let fragments = children.map(|child| {
            self.extract_text_from_value(child, options)
                .unwrap_or_else(|err| {
                    self.emit(ExtractionEvent::FragmentDropped {
                        reason: err.to_string(),
                    });
                    String::new()
                })
        });

        self.clean(&join_fragments(fragments), options)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FailingRenderer, RecordingListener};
    use super::super::{NullListener, SetTypes, TransformOptions};
    use super::*;
    use crate::render::{MarkdownRenderer, PassthroughRenderer, TextCleaner};
    use serde_json::json;

    fn process(renderer: &dyn MarkdownRenderer, input: Value) -> String {
        let cleaner = TextCleaner::new();
        let types = SetTypes::default();
        let transform = TransformOptions::default();
        Extractor::new(renderer, &cleaner, &NullListener)
            .process_raw_content(&input, ExtractionOptions::new(&types, &transform))
    }

    #[test]
    fn test_string_input() {
        assert_eq!(
            process(&PassthroughRenderer, Value::from("  <p>Raw  text</p> ")),
            "Raw text"
        );
    }

    #[test]
    fn test_list_of_strings() {
        let input = Value::from(json!(["First part", "", "second part ."]));
        assert_eq!(process(&PassthroughRenderer, input), "First part second part.");
    }

    #[test]
    fn test_list_of_nodes() {
        let input = Value::from(json!([
            {"type": "text", "text": "Body *copy*"},
            {"type": "quote", "quote": "Quoted"}
        ]));
        // Each node is a plain mapping here, so its `type` value is text too.
        assert_eq!(
            process(&PassthroughRenderer, input),
            "text Body *copy* quote Quoted"
        );
    }

    #[test]
    fn test_mapping_input() {
        let input = Value::from(json!({"title": "Heading", "body": "Words"}));
        assert_eq!(process(&PassthroughRenderer, input), "Heading Words");
    }

    #[test]
    fn test_scalars_yield_nothing() {
        assert_eq!(process(&PassthroughRenderer, Value::Null), "");
        assert_eq!(process(&PassthroughRenderer, Value::from(json!(12))), "");
        assert_eq!(process(&PassthroughRenderer, Value::opaque("object")), "");
    }

    #[test]
    fn test_failing_fragment_dropped() {
        let cleaner = TextCleaner::new();
        let types = SetTypes::default();
        let transform = TransformOptions::default();
        let listener = RecordingListener::default();
        let input = Value::from(json!([
            "survivor",
            [{"type": "text", "text": "needs rendering"}]
        ]));
        let text = Extractor::new(&FailingRenderer, &cleaner, &listener)
            .process_raw_content(&input, ExtractionOptions::new(&types, &transform));
        assert_eq!(text, "survivor");
        assert_eq!(
            listener.events(),
            vec![ExtractionEvent::FragmentDropped {
                reason: "Rendering error: renderer unavailable".into()
            }]
        );
    }
}
