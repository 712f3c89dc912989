//!
//! Pathtree: a schema-less, dotted-path-addressable tree with an XML codec.
//!
//! ## Core Concepts
//!
//! * **Trees (`tree::PathTree`)**: A nested map from string keys to nodes, addressed with
//!   dotted paths such as `"order.items.sku"`. Arrays met along a path are entered through
//!   their most recent element.
//! * **Nodes (`tree::Node`)**: The closed set of values a tree can hold: text, integers,
//!   floats, booleans, bytes, nested trees and arrays.
//! * **XML codec (`xml`)**: Encodes a tree as markup and decodes markup back, folding
//!   adjacent repeated sibling elements into arrays without any schema.
//! * **Adapters**: Conversions at the edges of the tree for JSON (`json`), serde-driven
//!   records (`record`) and URL query strings (`urlencode`).
//!
//! ```
//! use pathtree::{PathTree, XmlOptions};
//!
//! let mut tree = PathTree::new();
//! tree.set("order.id", 7).set("order.note", "fragile");
//!
//! let bytes = tree.to_xml(&XmlOptions::default())?;
//! let decoded = PathTree::from_xml(&bytes, &XmlOptions::default())?;
//! assert_eq!(decoded, tree);
//! # Ok::<(), pathtree::Error>(())
//! ```

pub mod json;
pub mod record;
pub mod tree;
pub mod urlencode;
pub mod xml;

/// Re-export the core types for easier access.
pub use tree::{Node, PathTree, TreeOptions, merge_all};
pub use xml::{RootTag, XmlOptions};

/// Result type used throughout the Pathtree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Pathtree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON or record (de)serialization failures
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structured tree errors from the tree module
    #[error(transparent)]
    Tree(tree::TreeError),

    /// Structured codec errors from the xml module
    #[error(transparent)]
    Xml(xml::XmlError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Json(_) => "json",
            Error::Tree(_) => "tree",
            Error::Xml(_) => "xml",
        }
    }

    /// Check if this error came from decoding markup.
    pub fn is_decode_error(&self) -> bool {
        match self {
            Error::Xml(xml_err) => xml_err.is_decode_error(),
            _ => false,
        }
    }

    /// Check if this error came from encoding markup.
    pub fn is_encode_error(&self) -> bool {
        match self {
            Error::Xml(xml_err) => xml_err.is_encode_error(),
            _ => false,
        }
    }

    /// Check if this error indicates a value of the wrong type.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error indicates input of the wrong shape.
    pub fn is_shape_error(&self) -> bool {
        match self {
            Error::Tree(tree_err) => tree_err.is_shape_error(),
            _ => false,
        }
    }

    /// Check if this error is JSON serialization related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Json(_))
    }
}
