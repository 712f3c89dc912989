//! The tagged value stored under every key of a [`PathTree`].
//!
//! A [`Node`] is either a scalar leaf (text, integer, float, boolean or raw
//! bytes) or a branch: a nested [`PathTree`] or an ordered array of nodes.
//! Every consumer matches on the variant, so there is no "untyped" value that
//! can fail a cast at runtime.

use std::fmt;

use super::{PathTree, TreeError};

/// Values that can be stored in a [`PathTree`].
///
/// ## Leaf values
/// - [`Node::Text`] - UTF-8 text
/// - [`Node::Int`] - 64-bit signed integers
/// - [`Node::Float`] - 64-bit floats
/// - [`Node::Bool`] - booleans
/// - [`Node::Bytes`] - raw byte sequences
///
/// ## Branch values
/// - [`Node::Tree`] - a nested tree
/// - [`Node::Array`] - an ordered sequence of nodes
///
/// `Node` compares directly against primitives:
///
/// ```
/// # use pathtree::Node;
/// assert!(Node::from("hello") == "hello");
/// assert!(Node::from(42) == 42);
/// assert!(Node::from(true) == true);
/// assert!(!(Node::from("42") == 42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Text string value
    Text(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Nested tree
    Tree(PathTree),
    /// Ordered collection of nodes
    Array(Vec<Node>),
}

impl Node {
    /// Returns true if this is a leaf value
    pub fn is_scalar(&self) -> bool {
        !self.is_branch()
    }

    /// Returns true if this node can contain other nodes
    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Tree(_) | Node::Array(_))
    }

    /// Returns true if this is a nested tree
    pub fn is_tree(&self) -> bool {
        matches!(self, Node::Tree(_))
    }

    /// Returns true if this is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Returns the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Int(_) => "int",
            Node::Float(_) => "float",
            Node::Bool(_) => "bool",
            Node::Bytes(_) => "bytes",
            Node::Tree(_) => "tree",
            Node::Array(_) => "array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            Node::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Node::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&PathTree> {
        match self {
            Node::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_tree_mut(&mut self) -> Option<&mut PathTree> {
        match self {
            Node::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the node, wrapping it in a one-element array unless it
    /// already is an array.
    pub fn into_array(self) -> Vec<Node> {
        match self {
            Node::Array(items) => items,
            other => vec![other],
        }
    }
}

impl fmt::Display for Node {
    /// Scalars render as their bare text; branches render as JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text(s) => write!(f, "{s}"),
            Node::Int(n) => write!(f, "{n}"),
            Node::Float(x) => write!(f, "{x}"),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Bytes(_) | Node::Tree(_) | Node::Array(_) => {
                write!(f, "{}", crate::json::node_to_json_value(self))
            }
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(value as i64)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::Int(value as i64)
    }
}

impl From<u64> for Node {
    /// Values beyond `i64::MAX` fall back to a float.
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Node::Int)
            .unwrap_or(Node::Float(value as f64))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Float(value as f64)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<Vec<u8>> for Node {
    fn from(value: Vec<u8>) -> Self {
        Node::Bytes(value)
    }
}

impl From<&[u8]> for Node {
    fn from(value: &[u8]) -> Self {
        Node::Bytes(value.to_vec())
    }
}

impl From<PathTree> for Node {
    fn from(value: PathTree) -> Self {
        Node::Tree(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Array(value)
    }
}

impl<T: Into<Node>> FromIterator<T> for Node {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Node::Array(iter.into_iter().map(Into::into).collect())
    }
}

fn mismatch(expected: &'static str, actual: &Node) -> TreeError {
    TreeError::TypeMismatch {
        expected,
        actual: actual.type_name(),
    }
}

impl TryFrom<&Node> for String {
    type Error = TreeError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl<'a> TryFrom<&'a Node> for &'a str {
    type Error = TreeError;

    fn try_from(value: &'a Node) -> Result<Self, Self::Error> {
        value.as_str().ok_or_else(|| mismatch("text", value))
    }
}

impl TryFrom<&Node> for i64 {
    type Error = TreeError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        value.as_int().ok_or_else(|| mismatch("int", value))
    }
}

impl TryFrom<&Node> for f64 {
    type Error = TreeError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        value.as_number().ok_or_else(|| mismatch("number", value))
    }
}

impl TryFrom<&Node> for bool {
    type Error = TreeError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl<'a> TryFrom<&'a Node> for &'a [u8] {
    type Error = TreeError;

    fn try_from(value: &'a Node) -> Result<Self, Self::Error> {
        value.as_bytes().ok_or_else(|| mismatch("bytes", value))
    }
}

impl<'a> TryFrom<&'a Node> for &'a PathTree {
    type Error = TreeError;

    fn try_from(value: &'a Node) -> Result<Self, Self::Error> {
        value.as_tree().ok_or_else(|| mismatch("tree", value))
    }
}

impl TryFrom<&Node> for PathTree {
    type Error = TreeError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        value.as_tree().cloned().ok_or_else(|| mismatch("tree", value))
    }
}

impl<'a> TryFrom<&'a Node> for &'a [Node] {
    type Error = TreeError;

    fn try_from(value: &'a Node) -> Result<Self, Self::Error> {
        value.as_array().ok_or_else(|| mismatch("array", value))
    }
}

impl TryFrom<&Node> for Vec<Node> {
    type Error = TreeError;

    fn try_from(value: &Node) -> Result<Self, Self::Error> {
        value
            .as_array()
            .map(<[Node]>::to_vec)
            .ok_or_else(|| mismatch("array", value))
    }
}

impl PartialEq<str> for Node {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Node {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Node {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Node {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Node {
    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some(*other as i64)
    }
}

impl PartialEq<f64> for Node {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Node::Float(f) if f == other)
    }
}

impl PartialEq<bool> for Node {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<Node> for &str {
    fn eq(&self, other: &Node) -> bool {
        other == *self
    }
}

impl PartialEq<Node> for String {
    fn eq(&self, other: &Node) -> bool {
        other == self
    }
}

impl PartialEq<Node> for i64 {
    fn eq(&self, other: &Node) -> bool {
        other == self
    }
}

impl PartialEq<Node> for bool {
    fn eq(&self, other: &Node) -> bool {
        other == self
    }
}
