use data_chain::{NavError, Node};
use serde_json::{json, Value};

fn fixture() -> Value {
    json!({
        "data": {
            "maps": {
                "map_string_1": "map_string_1",
                "map_string_2": "map_string_2",
                "map_string_3": "map_string_3",
            },
            "arrays": ["array_string_1", "array_string_2", "array_string_3"],
            "mixed": [{"name": "first"}, {"name": "second"}],
        }
    })
}

#[test]
fn test_field_returns_matching_values() {
    let doc = fixture();
    let maps = Node::new(&doc, false).field("data").field("maps");

    for key in ["map_string_1", "map_string_2", "map_string_3"] {
        assert_eq!(maps.field(key).as_string(), key);
    }
}

#[test]
fn test_index_within_bounds() {
    let doc = fixture();
    let arrays = Node::new(&doc, false).field("data").field("arrays");

    assert_eq!(arrays.count(), 3);
    for i in 0..arrays.count() {
        assert_eq!(
            arrays.index(i).as_string(),
            format!("array_string_{}", i + 1)
        );
    }
}

#[test]
fn test_index_at_count_is_out_of_range() {
    let doc = fixture();
    let root = Node::new(&doc, true);
    let arrays = root.field("data").field("arrays");

    let past_end = arrays.index(arrays.count());
    assert!(!past_end.exists());
    assert_eq!(root.error().unwrap(), "index out of range: `3`");
}

#[test]
fn test_index_on_non_array_names_kind() {
    let doc = fixture();
    let root = Node::new(&doc, true);
    root.field("data").field("maps").index(0);
    assert_eq!(root.error().unwrap(), "not an array: `object`");
}

#[test]
fn test_count_on_non_array() {
    let doc = fixture();
    let root = Node::new(&doc, true);
    assert_eq!(root.field("data").field("maps").count(), 0);
    assert_eq!(root.error().unwrap(), "not an array");
}

#[test]
fn test_safe_chain_survives_missing_key() {
    let doc = fixture();
    let root = Node::new(&doc, true);

    // Chain through a missing top-level key and keep going.
    let leaf = root.field("nope").field("deeper").index(4);
    assert!(!leaf.exists());
    assert_eq!(leaf.as_i64(), 0);

    let message = root.error().unwrap();
    assert!(message.contains("key `nope` does not exist"), "{message}");
    assert!(
        message.contains("map with key `deeper` does not exist"),
        "{message}"
    );
    assert!(message.contains("not an array: `undefined`"), "{message}");

    // Resetting the slot allows reuse.
    root.reset();
    assert_eq!(root.error(), None);
    root.field("data").field("maps").field("absent");
    assert_eq!(root.error().unwrap(), "key `absent` does not exist");
}

#[test]
fn test_typed_errors_in_order() {
    let doc = fixture();
    let root = Node::new(&doc, true);
    root.field("nope");
    root.field("data").field("arrays").index(9);

    assert_eq!(
        root.errors(),
        vec![
            NavError::MissingKey("nope".to_string()),
            NavError::IndexOutOfRange(9),
        ]
    );
}

#[test]
fn test_non_safe_missing_key_is_silent() {
    let doc = fixture();
    let root = Node::new(&doc, false);
    let missing = root.field("nope");

    assert_eq!(missing.count(), 0);
    assert_eq!(missing.as_i64(), 0);
    assert_eq!(missing.as_f64(), 0.0);
    assert!(!missing.as_bool());
    assert_eq!(root.error(), None);
    assert!(root.errors().is_empty());
}

#[test]
fn test_non_safe_out_of_range_returns_placeholder() {
    // Out-of-range access always yields an absent placeholder, even with no
    // error slot attached.
    let doc = fixture();
    let arrays = Node::new(&doc, false).field("data").field("arrays");
    let past_end = arrays.index(99);

    assert!(!past_end.exists());
    assert_ne!(past_end.count(), arrays.count());
}

#[test]
fn test_items_round_trip_matches_index() {
    let doc = fixture();
    let arrays = Node::new(&doc, false).field("data").field("arrays");

    let items = arrays.items();
    assert_eq!(items.len(), arrays.count());
    for (i, item) in items.iter().enumerate() {
        assert_eq!(item.as_string(), arrays.index(i).as_string());
    }
}

#[test]
fn test_items_on_non_array_is_empty() {
    let doc = fixture();
    let maps = Node::new(&doc, false).field("data").field("maps");
    assert!(maps.items().is_empty());
}

#[test]
fn test_entries() {
    let doc = fixture();
    let maps = Node::new(&doc, false).field("data").field("maps");

    let entries = maps.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries["map_string_2"].as_string(), "map_string_2");

    let arrays = Node::new(&doc, false).field("data").field("arrays");
    assert!(arrays.entries().is_empty());
}

#[test]
fn test_nested_array_of_maps() {
    let doc = fixture();
    let mixed = Node::new(&doc, false).field("data").field("mixed");
    assert_eq!(mixed.index(0).field("name").as_string(), "first");
    assert_eq!(mixed.index(1).field("name").as_string(), "second");
}

#[test]
fn test_kind_and_value() {
    let doc = fixture();
    let root = Node::new(&doc, false);

    assert_eq!(root.kind(), "object");
    assert_eq!(root.field("data").field("arrays").kind(), "array");
    assert_eq!(root.field("data").field("arrays").index(0).kind(), "string");
    assert_eq!(root.field("nope").kind(), "undefined");

    assert_eq!(
        root.field("data").field("arrays").value(),
        Some(&json!(["array_string_1", "array_string_2", "array_string_3"]))
    );
    assert_eq!(root.field("nope").value(), None);
}
