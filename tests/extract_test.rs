//! Integration tests for the extraction engine and the data model.

use bardtext::extract::{is_internal_link, sanitize_marks, STRUCTURAL_KEYS};
use bardtext::{
    Extractor, ExtractionOptions, Mapping, Mark, Node, NullListener, PassthroughRenderer,
    SetTypes, TextCleaner, TransformOptions, Value,
};
use serde_json::json;

fn with_extractor<T>(max_depth: usize, f: impl FnOnce(&Extractor<'_>, ExtractionOptions<'_>) -> T) -> T {
    let cleaner = TextCleaner::new();
    let types = SetTypes::default();
    let transform = TransformOptions::new().with_max_depth(max_depth);
    let extractor = Extractor::new(&PassthroughRenderer, &cleaner, &NullListener);
    f(&extractor, ExtractionOptions::new(&types, &transform))
}

#[test]
fn test_options_descend_is_immutable() {
    let types = SetTypes::new(["quote"]);
    let transform = TransformOptions::default();
    let root = ExtractionOptions::new(&types, &transform);
    let child = root.descend();

    assert_eq!(root.current_depth(), 0);
    assert_eq!(child.current_depth(), 1);
    assert_eq!(child.max_depth(), root.max_depth());
    assert!(child.set_types().contains("text"));
    assert!(child.set_types().contains("quote"));
}

#[test]
fn test_set_types_always_include_text() {
    let types = SetTypes::new(Vec::<String>::new());
    assert_eq!(types.iter().collect::<Vec<_>>(), vec!["text"]);

    let types = SetTypes::new(["text", "quote"]);
    assert_eq!(types.len(), 2);
}

#[test]
fn test_value_reduction_shapes() {
    let value = Value::from(json!({
        "title": "Heading",
        "tags": ["one", "", "two"],
        "count": 3,
        "published": true,
        "missing": null
    }));
    let text = with_extractor(3, |extractor, options| {
        extractor.extract_text_from_value(&value, options).unwrap()
    });
    assert_eq!(text, "Heading one two");
}

#[test]
fn test_lazy_and_opaque_values() {
    let value = Value::List(vec![
        Value::lazy("  held   text "),
        Value::opaque("<Asset id=9>"),
    ]);
    let text = with_extractor(3, |extractor, options| {
        extractor.extract_text_from_value(&value, options).unwrap()
    });
    // Opaque objects contribute their string form without cleaning.
    assert_eq!(text, "held text <Asset id=9>");
}

#[test]
fn test_set_skips_structural_and_empty_fields() {
    let fields = Mapping::new()
        .with("type", "quote")
        .with("id", "q-1")
        .with("enabled", true)
        .with("quote", "Kept")
        .with("cite", "")
        .with("extra", Value::List(Vec::new()));
    let text = with_extractor(3, |extractor, options| {
        extractor.extract_from_set(&fields, options).unwrap()
    });
    assert_eq!(text, "Kept");
    assert_eq!(STRUCTURAL_KEYS, ["type", "id", "enabled"]);
}

#[test]
fn test_bard_array_mixes_runs_and_sets() {
    let nodes = Value::from(json!([
        {"type": "text", "text": "Intro"},
        "ignored",
        {"type": "quote", "quote": "Inner"},
        {"type": "text", "text": ""}
    ]));
    let text = with_extractor(3, |extractor, options| {
        extractor
            .extract_from_bard_array(nodes.as_list().unwrap(), options)
            .unwrap()
    });
    assert_eq!(text, "Intro Inner");
}

#[test]
fn test_raw_content_never_fails() {
    let input = Value::from(json!({
        "first": [{"type": "text", "text": {"structured": true}}],
        "second": "survives"
    }));
    let text = with_extractor(3, |extractor, options| {
        extractor.process_raw_content(&input, options)
    });
    assert_eq!(text, "survives");
}

#[test]
fn test_node_classification() {
    let text = Value::from(json!({"type": "text", "text": "run"}));
    let set = Value::from(json!({"type": "quote", "quote": "q"}));
    let untyped = Value::from(json!({"quote": "q"}));
    let scalar = Value::from("plain");

    assert!(matches!(Node::classify(&text), Node::Text(_)));
    match Node::classify(&set) {
        Node::Set(set) => assert_eq!(set.set_type(), Some("quote")),
        _ => panic!("expected set node"),
    }
    match Node::classify(&untyped) {
        Node::Set(set) => assert_eq!(set.set_type(), None),
        _ => panic!("expected set node"),
    }
    assert!(matches!(Node::classify(&scalar), Node::Opaque));
}

#[test]
fn test_mark_sanitizing() {
    let internal = Mark::link("statamic://asset::main::photo.jpg");
    let external = Mark::link("https://example.com");
    let bold = Mark::new("bold");

    assert!(is_internal_link(&internal));
    assert!(!is_internal_link(&external));
    assert!(!is_internal_link(&bold));

    let (marks, count) = sanitize_marks(vec![bold.clone(), internal, external.clone()]);
    assert_eq!(count, 1);
    assert_eq!(marks[0], bold);
    assert_eq!(marks[1].href, None);
    assert_eq!(marks[2], external);
}

#[test]
fn test_value_emptiness() {
    assert!(Value::Null.is_empty());
    assert!(Value::from(json!(0)).is_empty());
    assert!(Value::from(json!(0.0)).is_empty());
    assert!(Value::from(false).is_empty());
    assert!(Value::from("").is_empty());
    assert!(!Value::from("0").is_empty());
    assert!(!Value::lazy("").is_empty());
    assert!(!Value::from(json!([null])).is_empty());
}

#[test]
fn test_value_preserves_key_order() {
    let value = Value::from_json_str(r#"{"zeta": "z", "alpha": "a", "mid": "m"}"#).unwrap();
    let keys: Vec<&str> = value
        .as_mapping()
        .unwrap()
        .iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}
