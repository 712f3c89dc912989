//! URL query-string boundary for [`PathTree`].
//!
//! Only the top level of a tree is flattened into `key=value` pairs. Keys are
//! written in lexicographic order and both keys and values are
//! form-urlencoded, so a space becomes `+` and reserved characters are
//! percent-escaped.

use tracing::warn;
use url::form_urlencoded;

use crate::tree::{Node, PathTree};

/// Returns the query-string form of a scalar, or `None` for values that have
/// no flat representation.
fn scalar_text(node: &Node) -> Option<String> {
    match node {
        Node::Text(_) | Node::Int(_) | Node::Float(_) | Node::Bool(_) => Some(node.to_string()),
        Node::Bytes(_) | Node::Tree(_) | Node::Array(_) => None,
    }
}

/// Encodes the top-level entries of a tree as a query string.
///
/// Arrays of scalars emit one pair per element. Nested trees, bytes and
/// non-scalar array elements are skipped.
///
/// ```
/// # use pathtree::{Node, PathTree};
/// let tree = PathTree::new()
///     .with("q", "rust lang")
///     .with("page", 2)
///     .with("tag", Node::from_iter(["a", "b"]));
/// assert_eq!(pathtree::urlencode::url_encode(&tree), "page=2&q=rust+lang&tag=a&tag=b");
/// ```
pub fn url_encode(tree: &PathTree) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    let mut entries: Vec<_> = tree.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    for (key, node) in entries {
        match node {
            Node::Array(items) => {
                for item in items {
                    match scalar_text(item) {
                        Some(text) => {
                            serializer.append_pair(key, &text);
                        }
                        None => {
                            warn!(key, kind = item.type_name(), "Skipping non-scalar array element")
                        }
                    }
                }
            }
            other => match scalar_text(other) {
                Some(text) => {
                    serializer.append_pair(key, &text);
                }
                None => {
                    warn!(key, kind = other.type_name(), "Skipping value with no query form")
                }
            },
        }
    }

    serializer.finish()
}

/// Decodes a query string into a tree.
///
/// Repeated keys accumulate into an array in order of appearance. Values stay
/// text; keys are used verbatim.
pub fn url_decode(query: &str) -> PathTree {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut tree = PathTree::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let incoming = Node::Text(value.into_owned());
        match tree.get_key_mut(&key) {
            Some(Node::Array(items)) => items.push(incoming),
            Some(existing) => {
                let previous = std::mem::replace(existing, Node::Array(Vec::new()));
                *existing = Node::Array(vec![previous, incoming]);
            }
            None => tree.insert_key(key.into_owned(), incoming),
        }
    }

    tree
}

impl PathTree {
    /// Encodes the top-level entries as a query string. See [`url_encode`].
    pub fn to_encode_url(&self) -> String {
        url_encode(self)
    }

    /// Decodes a query string into a new tree. See [`url_decode`].
    pub fn from_encode_url(query: &str) -> PathTree {
        url_decode(query)
    }
}
