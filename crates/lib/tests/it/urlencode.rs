//! Query-string boundary integration tests

use pathtree::{Node, PathTree};

#[test]
fn test_key_order_is_independent_of_insertion() {
    let forward = PathTree::from_flat([("a", 1), ("b", 2), ("c", 3)]);
    let backward = PathTree::from_flat([("c", 3), ("b", 2), ("a", 1)]);

    assert_eq!(forward.to_encode_url(), "a=1&b=2&c=3");
    assert_eq!(backward.to_encode_url(), forward.to_encode_url());
}

#[test]
fn test_multi_valued_entries() {
    let tree = PathTree::new()
        .with("id", Node::from_iter([3, 1]))
        .with("q", "café & co");
    assert_eq!(tree.to_encode_url(), "id=3&id=1&q=caf%C3%A9+%26+co");
}

#[test]
fn test_query_round_trip_keeps_text() {
    let tree = PathTree::new()
        .with("name", "Alice Smith")
        .with("tag", Node::from_iter(["x", "y"]));
    let decoded = PathTree::from_encode_url(&tree.to_encode_url());
    assert_eq!(decoded, tree);
}
