//! JSON boundary integration tests

use pathtree::{Node, PathTree, json};
use serde_json::json;

use crate::helpers::setup_order;

#[test]
fn test_to_json_value_shape() {
    let order = setup_order();
    assert_eq!(
        order.to_json_value(),
        json!({
            "id": 1001,
            "buyer": {"name": "Alice", "vip": true},
            "total": 25.5,
            "item": [{"sku": "A-1", "qty": 2}, {"sku": "B-2", "qty": 2}]
        })
    );
}

#[test]
fn test_json_bytes_round_trip() {
    let order = setup_order();
    let bytes = order.to_json().unwrap();
    assert_eq!(PathTree::from_json(&bytes).unwrap(), order);
}

#[test]
fn test_serialized_keys_are_sorted() {
    let tree = PathTree::new().with("b", 1).with("a", 2);
    assert_eq!(tree.to_json().unwrap(), br#"{"a":2,"b":1}"#);
}

#[test]
fn test_dotted_member_names_stay_literal() {
    let tree = json::from_json_value(json!({"a.b": 1})).unwrap();
    assert_eq!(tree.keys().next().map(String::as_str), Some("a.b"));
    assert!(tree.get_tree("a").is_none());
}

#[test]
fn test_parse_json_replaces_colliding_keys() {
    let mut tree = PathTree::new().with("a", 1).with("keep", true);
    tree.parse_json(br#"{"a": 2, "b": null, "c": [1, 2.5, "x"]}"#).unwrap();

    assert_eq!(tree.get_int("a"), Some(2));
    assert!(!tree.has("b"));
    assert_eq!(tree.get_bool("keep"), Some(true));
    assert_eq!(
        tree.get_array("c"),
        Some(&[Node::Int(1), Node::Float(2.5), Node::from("x")][..])
    );
}

#[test]
fn test_invalid_json_is_serialization_error() {
    let err = PathTree::from_json("{not json").unwrap_err();
    assert!(err.is_serialization_error());
    assert_eq!(err.module(), "json");
}

#[test]
fn test_non_object_json_is_shape_error() {
    let err = PathTree::from_json("[1, 2]").unwrap_err();
    assert!(err.is_shape_error());
    assert_eq!(err.module(), "tree");
}

#[test]
fn test_serde_deserialize_directly() {
    let tree: PathTree = serde_json::from_str(r#"{"n": {"x": [true, null]}}"#).unwrap();
    assert_eq!(tree.get_array("n.x"), Some(&[Node::Bool(true)][..]));
}
