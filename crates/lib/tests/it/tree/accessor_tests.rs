//! Typed getters, defaults and conditional writes

use pathtree::{Node, PathTree};

use crate::helpers::setup_order;

#[test]
fn test_typed_getters() {
    let order = setup_order();

    assert_eq!(order.get_int("id"), Some(1001));
    assert_eq!(order.get_str("buyer.name"), Some("Alice"));
    assert_eq!(order.get_bool("buyer.vip"), Some(true));
    assert_eq!(order.get_number("total"), Some(25.5));
    assert_eq!(order.get_number("id"), Some(1001.0));
    assert_eq!(order.get_as::<String>("buyer.name"), Some("Alice".to_string()));
    assert_eq!(order.get_as::<&PathTree>("buyer").map(PathTree::len), Some(2));
}

#[test]
fn test_type_mismatch_is_absent() {
    let order = setup_order();

    assert_eq!(order.get_int("buyer.name"), None);
    assert_eq!(order.get_str("id"), None);
    assert_eq!(order.get_bool("total"), None);
    assert_eq!(order.get_tree("id"), None);
    assert_eq!(order.get_array("buyer"), None);
    assert_eq!(order.get_as::<i64>("buyer.name"), None);
}

#[test]
fn test_defaulting_getters() {
    let order = setup_order();

    assert_eq!(order.get_int_or("missing", 7), 7);
    assert_eq!(order.get_int_or("id", 7), 1001);
    assert_eq!(order.get_str_or("buyer.name", "nobody"), "Alice");
    assert_eq!(order.get_str_or("buyer.nick", "nobody"), "nobody");
    assert_eq!(order.get_number_or("buyer.name", 1.5), 1.5);
    assert!(!order.get_bool_or("missing", false));

    let fallback = Node::from("n/a");
    assert_eq!(order.get_or("missing", &fallback), &fallback);
}

#[test]
fn test_tree_array_requires_all_trees() {
    let order = setup_order();
    assert_eq!(order.get_tree_array("item").map(|items| items.len()), Some(2));

    let mixed = PathTree::new().with(
        "list",
        Node::Array(vec![PathTree::new().into(), Node::Int(1)]),
    );
    assert!(mixed.get_tree_array("list").is_none());
}

#[test]
fn test_str_array_requires_all_text() {
    let tree = PathTree::new()
        .with("tags", Node::from_iter(["red", "", "blue"]))
        .with("mixed", Node::Array(vec![Node::from("a"), Node::Int(1)]));

    assert_eq!(tree.get_str_array("tags"), Some(vec!["red", "", "blue"]));
    assert!(tree.get_str_array("mixed").is_none());
    assert!(tree.get_str_array("missing").is_none());
    assert_eq!(tree.get_str_array("missing").unwrap_or_default().len(), 0);
}

#[test]
fn test_bytes_getter() {
    let tree = PathTree::new().with("raw", vec![1u8, 2, 3]);
    assert_eq!(tree.get_bytes("raw"), Some(&[1u8, 2, 3][..]));
}

#[test]
fn test_get_mut_edits_in_place() {
    let mut order = setup_order();
    if let Some(Node::Int(id)) = order.get_mut("id") {
        *id += 1;
    }
    assert_eq!(order.get_int("id"), Some(1002));

    order.get_tree_mut("buyer").unwrap().set("name", "Bob");
    assert_eq!(order.get_str("buyer.name"), Some("Bob"));
}

#[test]
fn test_set_if_absent() {
    let mut tree = PathTree::new().with("a", 1);
    tree.set_if_absent("a", 2).set_if_absent("b", 3);
    assert_eq!(tree.get_int("a"), Some(1));
    assert_eq!(tree.get_int("b"), Some(3));
}

#[test]
fn test_replace_only_when_present() {
    let mut tree = PathTree::new().with("a", 1);
    tree.replace("a", 2).replace("b", 3);
    assert_eq!(tree.get_int("a"), Some(2));
    assert!(!tree.has("b"));
}

#[test]
fn test_replace_from_source() {
    let source = PathTree::new().with("a.x", "new").with("b", "only-in-source");
    let mut tree = PathTree::new().with("a.x", "old").with("c", 1);

    tree.replace_from("a.x", &source)
        .replace_from("b", &source)
        .replace_from("c", &source);

    assert_eq!(tree.get_str("a.x"), Some("new"));
    assert!(!tree.has("b"));
    assert_eq!(tree.get_int("c"), Some(1));
}

#[test]
fn test_first_missing() {
    let order = setup_order();
    assert_eq!(order.first_missing(["id", "buyer.name"]), None);
    assert_eq!(order.first_missing(["id", "buyer.email", "nope"]), Some(1));
}
