//! Encoder output shape

use pathtree::{
    Node, PathTree, RootTag, XmlOptions,
    xml::{DECLARATION, XmlError},
};

use crate::helpers::bare_options;

fn encode_str(tree: &PathTree, options: &XmlOptions) -> String {
    String::from_utf8(tree.to_xml(options).unwrap()).unwrap()
}

#[test]
fn test_declaration_and_root() {
    let tree = PathTree::new().with("a", 1);

    let with_decl = encode_str(&tree, &XmlOptions::default());
    assert_eq!(with_decl, format!("{DECLARATION}<xml><a>1</a></xml>"));

    let root = encode_str(&tree, &bare_options().with_root(RootTag::Root));
    assert_eq!(root, "<root><a>1</a></root>");
}

#[test]
fn test_scalars() {
    let tree = PathTree::new()
        .with("f", 2.0)
        .with("g", 2.25)
        .with("b", false)
        .with("n", -3)
        .with("s", "a < b");

    assert_eq!(
        encode_str(&tree, &bare_options()),
        "<xml><b>false</b><f>2</f><g>2.25</g><n>-3</n><s><![CDATA[a < b]]></s></xml>"
    );
}

#[test]
fn test_nested_trees_and_sorted_keys() {
    let tree = PathTree::new().with("z.y", 1).with("z.a", 2).with("m", 3);
    assert_eq!(
        encode_str(&tree, &bare_options()),
        "<xml><m>3</m><z><a>2</a><y>1</y></z></xml>"
    );
}

#[test]
fn test_multi_element_array_is_repeated_siblings() {
    let tree = PathTree::new().with("item", Node::from_iter([1, 2, 3]));
    assert_eq!(
        encode_str(&tree, &bare_options()),
        "<xml><item>1</item><item>2</item><item>3</item></xml>"
    );
}

#[test]
fn test_single_element_array_gets_marker() {
    let tree = PathTree::new().with("item", Node::from_iter([5]));
    assert_eq!(
        encode_str(&tree, &bare_options()),
        "<xml><item>5</item><item></item></xml>"
    );
}

#[test]
fn test_bytes_are_base64() {
    let tree = PathTree::new().with("raw", b"hi".as_slice());
    assert_eq!(encode_str(&tree, &bare_options()), "<xml><raw>aGk=</raw></xml>");
}

#[test]
fn test_empty_tree_is_rejected() {
    let err = PathTree::new().to_xml(&XmlOptions::default()).unwrap_err();
    assert!(err.is_encode_error());
    assert_eq!(err.module(), "xml");
}

#[test]
fn test_keys_that_are_not_element_names_are_rejected() {
    for key in ["1x", "order.line item", "a<b"] {
        let tree = PathTree::new().with(key, 1);
        let err = tree.to_xml(&bare_options()).unwrap_err();
        assert!(err.is_encode_error(), "{key}");
        assert!(matches!(err, pathtree::Error::Xml(XmlError::InvalidName { .. })));
    }

    let literal = PathTree::from_json(r#"{"a b": 1}"#).unwrap();
    assert!(literal.to_xml(&bare_options()).is_err());
}
