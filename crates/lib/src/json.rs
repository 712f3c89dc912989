//! JSON boundary for [`PathTree`].
//!
//! A tree maps onto a JSON object member for member. `null` has no node
//! equivalent, so null members and null array elements are dropped on the way
//! in. Bytes have no JSON equivalent either and are written as base64 text;
//! they come back as plain text.

use std::fmt;

use base64ct::{Base64, Encoding};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::{
    Result,
    tree::{Node, PathTree, TreeError},
};

/// Converts a node into a JSON value.
///
/// Non-finite floats become `null`.
pub fn node_to_json_value(node: &Node) -> Value {
    match node {
        Node::Text(s) => Value::String(s.clone()),
        Node::Int(n) => Value::Number((*n).into()),
        Node::Float(x) => Number::from_f64(*x).map_or(Value::Null, Value::Number),
        Node::Bool(b) => Value::Bool(*b),
        Node::Bytes(bytes) => Value::String(Base64::encode_string(bytes)),
        Node::Tree(tree) => to_json_value(tree),
        Node::Array(items) => Value::Array(items.iter().map(node_to_json_value).collect()),
    }
}

/// Converts a tree into a JSON object.
pub fn to_json_value(tree: &PathTree) -> Value {
    let members: Map<String, Value> = tree
        .iter()
        .map(|(key, node)| (key.clone(), node_to_json_value(node)))
        .collect();
    Value::Object(members)
}

/// Converts a JSON value into a node. Returns `None` for `null`.
pub fn node_from_json_value(value: Value) -> Option<Node> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Node::Bool(b)),
        Value::Number(n) => Some(number_to_node(&n)),
        Value::String(s) => Some(Node::Text(s)),
        Value::Array(items) => Some(Node::Array(
            items.into_iter().filter_map(node_from_json_value).collect(),
        )),
        Value::Object(members) => Some(Node::Tree(tree_from_members(members))),
    }
}

fn number_to_node(n: &Number) -> Node {
    if let Some(i) = n.as_i64() {
        Node::Int(i)
    } else if let Some(u) = n.as_u64() {
        Node::from(u)
    } else {
        Node::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn tree_from_members(members: Map<String, Value>) -> PathTree {
    let mut tree = PathTree::new();
    for (key, value) in members {
        if let Some(node) = node_from_json_value(value) {
            tree.insert_key(key, node);
        }
    }
    tree
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Populates a new tree from a JSON value, which must be an object.
///
/// Member names are used verbatim; a dotted name stays a single key.
pub fn from_json_value(value: Value) -> std::result::Result<PathTree, TreeError> {
    match value {
        Value::Object(members) => Ok(tree_from_members(members)),
        other => Err(TreeError::NotAnObject {
            found: json_kind(&other).to_string(),
        }),
    }
}

impl PathTree {
    /// Converts this tree into a JSON object value.
    pub fn to_json_value(&self) -> Value {
        to_json_value(self)
    }

    /// Serializes this tree as compact JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decodes a JSON object into a new tree.
    pub fn from_json(input: impl AsRef<[u8]>) -> Result<PathTree> {
        let value: Value = serde_json::from_slice(input.as_ref())?;
        Ok(from_json_value(value)?)
    }

    /// Decodes a JSON object and merges it into this tree, overwriting
    /// colliding top-level keys.
    pub fn parse_json(&mut self, input: impl AsRef<[u8]>) -> Result<&mut Self> {
        let decoded = PathTree::from_json(input)?;
        debug!(keys = decoded.len(), "Parsed JSON into tree");
        Ok(self.replace_join(&decoded))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Text(s) => serializer.serialize_str(s),
            Node::Int(n) => serializer.serialize_i64(*n),
            Node::Float(x) => serializer.serialize_f64(*x),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Bytes(bytes) => serializer.serialize_str(&Base64::encode_string(bytes)),
            Node::Tree(tree) => tree.serialize(serializer),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for PathTree {
    /// Members are written in lexicographic key order.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, node) in entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a scalar, an array or an object")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Node, E> {
        Ok(Node::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Node, E> {
        Ok(Node::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Node, E> {
        Ok(Node::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Node, E> {
        Ok(Node::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Node, E> {
        Ok(Node::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Node, E> {
        Ok(Node::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<Node, E> {
        Ok(Node::Bytes(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Option<Node>>()? {
            items.extend(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Node, A::Error> {
        TreeVisitor.visit_map(map).map(Node::Tree)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = PathTree;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<PathTree, A::Error> {
        let mut tree = PathTree::new();
        while let Some((key, value)) = map.next_entry::<String, Option<Node>>()? {
            if let Some(node) = value {
                tree.insert_key(key, node);
            }
        }
        Ok(tree)
    }
}

impl<'de> Deserialize<'de> for PathTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TreeVisitor)
    }
}
