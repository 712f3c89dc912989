use pathtree::{Node, PathTree, XmlOptions};

/// Options that omit the declaration so encoded output is easy to compare
pub fn bare_options() -> XmlOptions {
    XmlOptions::default().with_declaration(false)
}

/// Create a small order tree with a nested buyer and a list of line items
pub fn setup_order() -> PathTree {
    let mut order = PathTree::new();
    order
        .set("id", 1001)
        .set("buyer.name", "Alice")
        .set("buyer.vip", true)
        .set("total", 25.5);

    let items: Vec<Node> = ["A-1", "B-2"]
        .into_iter()
        .map(|sku| PathTree::new().with("sku", sku).with("qty", 2).into())
        .collect();
    order.set("item", Node::Array(items));
    order
}

/// Encode with bare options and decode the result back
pub fn xml_round_trip(tree: &PathTree) -> PathTree {
    let options = bare_options();
    let bytes = tree.to_xml(&options).expect("encode failed");
    PathTree::from_xml(&bytes, &options).expect("decode failed")
}

/// Decode a markup string with default options
pub fn decode_str(markup: &str) -> PathTree {
    PathTree::from_xml(markup, &XmlOptions::default()).expect("decode failed")
}
