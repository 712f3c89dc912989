//! Merge, join, append and projection

use pathtree::{Node, PathTree, merge_all};

#[test]
fn test_merge_replace_later_source_wins() {
    let a = PathTree::new().with("k", "a").with("only_a", 1);
    let b = PathTree::new().with("k", "b").with("only_b", 2);

    let mut target = PathTree::new();
    target.merge(true, [&a, &b]);

    assert_eq!(target.get_str("k"), Some("b"));
    assert_eq!(target.get_int("only_a"), Some(1));
    assert_eq!(target.get_int("only_b"), Some(2));
}

#[test]
fn test_merge_keep_first_value() {
    let a = PathTree::new().with("k", "a");
    let b = PathTree::new().with("k", "b").with("extra", true);

    let mut target = PathTree::new();
    target.merge(false, [&a, &b]);

    assert_eq!(target.get_str("k"), Some("a"));
    assert_eq!(target.get_bool("extra"), Some(true));
}

#[test]
fn test_merge_replaces_nested_trees_whole() {
    let mut target = PathTree::new().with("cfg.a", 1).with("cfg.b", 2);
    let source = PathTree::new().with("cfg.c", 3);

    target.replace_join(&source);
    assert!(!target.has("cfg.a"));
    assert_eq!(target.get_int("cfg.c"), Some(3));

    let mut kept = PathTree::new().with("cfg.a", 1);
    kept.join(&source);
    assert_eq!(kept.get_int("cfg.a"), Some(1));
    assert!(!kept.has("cfg.c"));
}

#[test]
fn test_merge_copies_rather_than_aliases() {
    let source = PathTree::new().with("cfg.a", 1);
    let mut target = PathTree::new();
    target.join(&source);

    target.set("cfg.a", 99);
    assert_eq!(source.get_int("cfg.a"), Some(1));
}

#[test]
fn test_merge_all_builds_fresh_tree() {
    let a = PathTree::new().with("k", 1);
    let b = PathTree::new().with("k", 2).with("j", 3);

    let merged = merge_all([&a, &b]);
    assert_eq!(merged.get_int("k"), Some(2));
    assert_eq!(merged.get_int("j"), Some(3));
    assert_eq!(a.get_int("k"), Some(1));
}

#[test]
fn test_append_accumulates_values() {
    let mut target = PathTree::new().with("tag", "a").with("only_target", 0);

    target.append(&PathTree::new().with("tag", "b").with("new", 1));
    assert_eq!(
        target.get_array("tag"),
        Some(&[Node::from("a"), Node::from("b")][..])
    );
    assert_eq!(target.get_int("new"), Some(1));

    target.append(&PathTree::new().with("tag", "c"));
    assert_eq!(target.get_array("tag").map(<[Node]>::len), Some(3));
    assert_eq!(target.get_int("only_target"), Some(0));
}

#[test]
fn test_only_projects_listed_paths() {
    let tree = PathTree::new()
        .with("a.x", 1)
        .with("a.y", 2)
        .with("b", 3);

    let projected = tree.only(["a.x", "b", "missing"]);
    assert_eq!(projected, PathTree::new().with("a.x", 1).with("b", 3));
}

#[test]
fn test_except_removes_listed_paths() {
    let tree = PathTree::new()
        .with("a.x", 1)
        .with("a.y", 2)
        .with("b", 3);

    let rest = tree.except(["a.x", "b", "missing"]);
    assert_eq!(rest, PathTree::new().with("a.y", 2));
    assert_eq!(tree.len(), 2);
}
