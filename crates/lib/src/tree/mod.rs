//! The path-addressable dynamic tree.
//!
//! [`PathTree`] is a schema-less mapping from string keys to [`Node`]s where
//! a dotted path such as `"order.items.sku"` walks through nested trees. It is
//! the in-memory shape that the XML, JSON, URL and record adapters all read
//! from and write into.
//!
//! # Addressing rules
//!
//! - A path is split on `.`; empty components are dropped.
//! - Every intermediate component must name a [`Node::Tree`], or a
//!   [`Node::Array`] whose **last** element is a tree. Arrays are always
//!   entered through their most recent element.
//! - Reads never fail: a missing key, an empty path or a scalar in the middle
//!   of a path all read as `None`.
//! - Writes create missing intermediate trees. A scalar found where a tree is
//!   needed is replaced by an empty tree.
//!
//! # Ownership
//!
//! The tree owns every node exclusively. Values are moved in on `set`, and
//! operations that copy from another tree (`merge`, `append`, `only`) clone
//! what they take, so no two slots ever share a node. `Clone` is a deep copy.
//!
//! ```
//! use pathtree::{Node, PathTree};
//!
//! let mut tree = PathTree::new();
//! tree.set("user.profile.name", "Alice").set("user.age", 30);
//!
//! assert_eq!(tree.get_str("user.profile.name"), Some("Alice"));
//! assert_eq!(tree.get_int("user.age"), Some(30));
//! assert_eq!(tree.get("user.profile.missing"), None);
//!
//! // Arrays are entered through their last element
//! tree.set("list", Node::Array(vec![PathTree::new().into(), PathTree::new().into()]));
//! tree.set("list.name", "x");
//! assert_eq!(tree.get_str("list.name"), Some("x"));
//! ```

use std::{collections::HashMap, fmt, ops::ControlFlow};

use tracing::trace;

pub mod errors;
pub mod node;
pub mod path;

pub use errors::TreeError;
pub use node::Node;
pub use path::{Path, PathBuf};

/// Behavior switches for a [`PathTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Treat `.` in keys as path navigation. When disabled every key is used
    /// verbatim as a single top-level key.
    pub split_keys: bool,
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split_keys(mut self, split_keys: bool) -> Self {
        self.split_keys = split_keys;
        self
    }
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { split_keys: true }
    }
}

/// A nested, dotted-path-addressable map of [`Node`]s.
///
/// Key order is not preserved; use [`PathTree::sorted_keys`] where a stable
/// order matters. A `PathTree` has no internal synchronization. Hand a
/// [`Clone`] to another thread instead of sharing one tree.
#[derive(Debug, Clone, Default)]
pub struct PathTree {
    children: HashMap<String, Node>,
    options: TreeOptions,
}

/// Enters a node on the way down a path. Arrays are entered through their
/// last element.
fn descend(node: &Node) -> Option<&PathTree> {
    match node {
        Node::Tree(tree) => Some(tree),
        Node::Array(items) => items.last()?.as_tree(),
        _ => None,
    }
}

fn descend_mut(node: &mut Node) -> Option<&mut PathTree> {
    match node {
        Node::Tree(tree) => Some(tree),
        Node::Array(items) => items.last_mut()?.as_tree_mut(),
        _ => None,
    }
}

impl PathTree {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty tree with the given options
    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            children: HashMap::new(),
            options,
        }
    }

    /// Builds a tree from flat `(key, value)` pairs, setting each key as a path.
    pub fn from_flat<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<Node>,
    {
        let mut tree = Self::new();
        for (key, value) in entries {
            tree.set(key.as_ref(), value);
        }
        tree
    }

    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// Returns the number of top-level keys
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Splits a path according to the key-splitting option.
    fn segments<'p>(&self, path: &'p Path) -> Vec<&'p str> {
        if self.options.split_keys {
            path.components().collect()
        } else if path.as_str().is_empty() {
            Vec::new()
        } else {
            vec![path.as_str()]
        }
    }

    /// Gets the node at a path.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Node> {
        let segments = self.segments(path.as_ref());
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = descend(current.children.get(*segment)?)?;
        }
        current.children.get(*last)
    }

    /// Gets a mutable reference to the node at a path.
    pub fn get_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut Node> {
        let segments = self.segments(path.as_ref());
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = descend_mut(current.children.get_mut(*segment)?)?;
        }
        current.children.get_mut(*last)
    }

    /// Gets a value with conversion through `TryFrom<&Node>`.
    ///
    /// Returns `None` both when the path is absent and when the node holds a
    /// different variant.
    ///
    /// ```
    /// # use pathtree::PathTree;
    /// let tree = PathTree::new().with("name", "Alice").with("age", 30);
    /// assert_eq!(tree.get_as::<&str>("name"), Some("Alice"));
    /// assert_eq!(tree.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, path: impl AsRef<Path>) -> Option<T>
    where
        T: TryFrom<&'a Node, Error = TreeError>,
    {
        T::try_from(self.get(path)?).ok()
    }

    /// Returns the node at a path, or `default` when absent.
    pub fn get_or<'a>(&'a self, path: impl AsRef<Path>, default: &'a Node) -> &'a Node {
        self.get(path).unwrap_or(default)
    }

    pub fn get_str(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.get(path)?.as_str()
    }

    pub fn get_str_or<'a>(&'a self, path: impl AsRef<Path>, default: &'a str) -> &'a str {
        self.get_str(path).unwrap_or(default)
    }

    pub fn get_int(&self, path: impl AsRef<Path>) -> Option<i64> {
        self.get(path)?.as_int()
    }

    pub fn get_int_or(&self, path: impl AsRef<Path>, default: i64) -> i64 {
        self.get_int(path).unwrap_or(default)
    }

    /// Gets a number, widening integers to `f64`.
    pub fn get_number(&self, path: impl AsRef<Path>) -> Option<f64> {
        self.get(path)?.as_number()
    }

    pub fn get_number_or(&self, path: impl AsRef<Path>, default: f64) -> f64 {
        self.get_number(path).unwrap_or(default)
    }

    pub fn get_bool(&self, path: impl AsRef<Path>) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    pub fn get_bool_or(&self, path: impl AsRef<Path>, default: bool) -> bool {
        self.get_bool(path).unwrap_or(default)
    }

    pub fn get_bytes(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.get(path)?.as_bytes()
    }

    pub fn get_tree(&self, path: impl AsRef<Path>) -> Option<&PathTree> {
        self.get(path)?.as_tree()
    }

    pub fn get_tree_mut(&mut self, path: impl AsRef<Path>) -> Option<&mut PathTree> {
        self.get_mut(path)?.as_tree_mut()
    }

    pub fn get_array(&self, path: impl AsRef<Path>) -> Option<&[Node]> {
        self.get(path)?.as_array()
    }

    /// Gets an array whose elements are all trees.
    pub fn get_tree_array(&self, path: impl AsRef<Path>) -> Option<Vec<&PathTree>> {
        self.get_array(path)?.iter().map(Node::as_tree).collect()
    }

    /// Gets an array whose elements are all text.
    pub fn get_str_array(&self, path: impl AsRef<Path>) -> Option<Vec<&str>> {
        self.get_array(path)?.iter().map(Node::as_str).collect()
    }

    /// Returns true if a node exists at the path.
    pub fn has(&self, path: impl AsRef<Path>) -> bool {
        self.get(path).is_some()
    }

    /// Returns the index of the first path that is absent, or `None` if all
    /// are present.
    pub fn first_missing<P: AsRef<Path>>(
        &self,
        paths: impl IntoIterator<Item = P>,
    ) -> Option<usize> {
        paths.into_iter().position(|path| !self.has(path))
    }

    /// Sets a value at a path, creating intermediate trees as needed.
    ///
    /// An empty path is ignored. Arrays met along the way are entered through
    /// their last element; an empty array gets one empty tree pushed first.
    pub fn set(&mut self, path: impl AsRef<Path>, value: impl Into<Node>) -> &mut Self {
        let path = path.as_ref();
        let segments = self.segments(path);
        let Some((last, parents)) = segments.split_last() else {
            return self;
        };

        let mut current: &mut PathTree = self;
        for segment in parents {
            current = current.child_tree_mut(segment);
        }
        current.children.insert(last.to_string(), value.into());
        self
    }

    /// Returns the tree stored under `key`, creating or converting the slot
    /// as needed.
    fn child_tree_mut(&mut self, key: &str) -> &mut PathTree {
        let options = self.options;
        let slot = self
            .children
            .entry(key.to_string())
            .or_insert_with(|| Node::Tree(PathTree::with_options(options)));

        let target = match slot {
            Node::Array(items) => {
                if items.is_empty() {
                    items.push(Node::Tree(PathTree::with_options(options)));
                }
                let last = items.len() - 1;
                &mut items[last]
            }
            other => other,
        };

        if !target.is_tree() {
            trace!(key, found = target.type_name(), "Replacing scalar with tree");
            *target = Node::Tree(PathTree::with_options(options));
        }

        match target {
            Node::Tree(tree) => tree,
            _ => unreachable!("slot holds a tree after conversion"),
        }
    }

    /// Inserts under a single literal key, bypassing path splitting.
    ///
    /// Empty keys are ignored.
    pub(crate) fn insert_key(&mut self, key: impl Into<String>, value: Node) {
        let key = key.into();
        if !key.is_empty() {
            self.children.insert(key, value);
        }
    }

    /// Looks up a single literal key, bypassing path splitting.
    pub(crate) fn get_key_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.get_mut(key)
    }

    /// Builder method to set a value and return self
    pub fn with(mut self, path: impl AsRef<Path>, value: impl Into<Node>) -> Self {
        self.set(path, value);
        self
    }

    /// Sets the value only if nothing exists at the path yet.
    pub fn set_if_absent(&mut self, path: impl AsRef<Path>, value: impl Into<Node>) -> &mut Self {
        let path = path.as_ref();
        if !self.has(path) {
            self.set(path, value);
        }
        self
    }

    /// Sets the value only if something already exists at the path.
    pub fn replace(&mut self, path: impl AsRef<Path>, value: impl Into<Node>) -> &mut Self {
        let path = path.as_ref();
        if self.has(path) {
            self.set(path, value);
        }
        self
    }

    /// Copies the value at `path` from `source` when both trees hold it.
    pub fn replace_from(&mut self, path: impl AsRef<Path>, source: &PathTree) -> &mut Self {
        let path = path.as_ref();
        if let Some(value) = source.get(path)
            && self.has(path)
        {
            self.set(path, value.clone());
        }
        self
    }

    /// Removes the node at a path and returns it.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<Node> {
        let segments = self.segments(path.as_ref());
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = descend_mut(current.children.get_mut(*segment)?)?;
        }
        current.children.remove(*last)
    }

    /// Deletes the node at a path.
    ///
    /// Returns `true` only if the final key existed and was removed. Failed
    /// navigation leaves the tree untouched.
    pub fn delete(&mut self, path: impl AsRef<Path>) -> bool {
        self.remove(path).is_some()
    }

    /// Copies top-level keys from each source in turn.
    ///
    /// A key is written when `replace` is set or when this tree does not hold
    /// it yet, so with `replace` later sources win. Colliding keys are
    /// overwritten whole; nested trees are not merged recursively.
    pub fn merge<'a>(
        &mut self,
        replace: bool,
        sources: impl IntoIterator<Item = &'a PathTree>,
    ) -> &mut Self {
        for source in sources {
            for (key, value) in &source.children {
                if replace || !self.has(key) {
                    self.set(key, value.clone());
                }
            }
        }
        self
    }

    /// Merges `source` without overwriting existing keys.
    pub fn join(&mut self, source: &PathTree) -> &mut Self {
        self.merge(false, [source])
    }

    /// Merges `source`, overwriting existing keys.
    pub fn replace_join(&mut self, source: &PathTree) -> &mut Self {
        self.merge(true, [source])
    }

    /// Accumulates the top-level keys of `source` into multi-valued arrays.
    ///
    /// A key held by both trees becomes `[existing, incoming]`, or the
    /// incoming value is pushed if the existing value is already an array.
    /// Keys only in `source` are set as-is.
    pub fn append(&mut self, source: &PathTree) -> &mut Self {
        for (key, value) in &source.children {
            match self.get_mut(key) {
                Some(Node::Array(items)) => items.push(value.clone()),
                Some(existing) => {
                    let previous = std::mem::replace(existing, Node::Array(Vec::new()));
                    *existing = Node::Array(vec![previous, value.clone()]);
                }
                None => {
                    self.set(key, value.clone());
                }
            }
        }
        self
    }

    /// Projects the tree onto the listed paths.
    ///
    /// Paths that are absent here are skipped.
    pub fn only<P: AsRef<Path>>(&self, paths: impl IntoIterator<Item = P>) -> PathTree {
        let mut projected = PathTree::with_options(self.options);
        for path in paths {
            let path = path.as_ref();
            if let Some(value) = self.get(path) {
                projected.set(path, value.clone());
            }
        }
        projected
    }

    /// Returns a copy of the tree without the listed paths.
    #[doc(alias = "expect")]
    pub fn except<P: AsRef<Path>>(&self, paths: impl IntoIterator<Item = P>) -> PathTree {
        let mut remaining = self.clone();
        for path in paths {
            remaining.delete(path);
        }
        remaining
    }

    /// Visits the top-level entries until the visitor breaks.
    ///
    /// The order is unspecified and nested trees are not descended into.
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Node) -> ControlFlow<()>,
    {
        for (key, value) in &self.children {
            if visit(key, value).is_break() {
                return;
            }
        }
    }

    /// Returns an iterator over the top-level entries
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.children.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Node)> {
        self.children.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.children.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// Returns the top-level keys in lexicographic order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.children.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.children.clear();
    }
}

/// Builds a fresh tree from `sources`, later sources winning on collisions.
pub fn merge_all<'a>(sources: impl IntoIterator<Item = &'a PathTree>) -> PathTree {
    let mut target = PathTree::new();
    target.merge(true, sources);
    target
}

impl PartialEq for PathTree {
    /// Trees compare by content; options are not part of equality.
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl fmt::Display for PathTree {
    /// Formats the tree as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::json::to_json_value(self))
    }
}

impl<K: AsRef<str>, V: Into<Node>> FromIterator<(K, V)> for PathTree {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_flat(iter)
    }
}

impl<K: AsRef<str>, V: Into<Node>> Extend<(K, V)> for PathTree {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key.as_ref(), value);
        }
    }
}

impl<'a> IntoIterator for &'a PathTree {
    type Item = (&'a String, &'a Node);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl IntoIterator for PathTree {
    type Item = (String, Node);
    type IntoIter = std::collections::hash_map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}
