//! XML codec for [`PathTree`].
//!
//! Markup has no array type, so the codec agrees on a convention with itself:
//!
//! - an array is written as the same tag repeated once per element
//! - a one-element array gets an extra empty sibling so it is not read back
//!   as a scalar
//! - on decode, a tag that opens directly after a closed sibling of the same
//!   name continues an array
//!
//! ```
//! use pathtree::{Node, PathTree, XmlOptions};
//!
//! let tree = PathTree::new().with("item", Node::Array(vec![Node::Int(5)]));
//! let options = XmlOptions::default().with_declaration(false);
//!
//! let bytes = tree.to_xml(&options)?;
//! assert_eq!(bytes, b"<xml><item>5</item><item></item></xml>");
//! assert_eq!(PathTree::from_xml(&bytes, &options)?, tree);
//! # Ok::<(), pathtree::Error>(())
//! ```
//!
//! Repeats separated by a different sibling are not folded: the later
//! element overwrites the earlier one.

mod decode;
mod encode;
pub mod errors;
mod fold;

pub use decode::decode;
pub use encode::encode;
pub use errors::XmlError;

use crate::{PathTree, Result};

/// The declaration written ahead of the root element.
pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Name of the element wrapping the top-level keys on encode.
///
/// Both names are transparent on decode regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootTag {
    #[default]
    Xml,
    Root,
}

impl RootTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootTag::Xml => "xml",
            RootTag::Root => "root",
        }
    }
}

/// Encoding and decoding switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Write [`DECLARATION`] before the root element
    pub declaration: bool,
    /// Wrapping element for encoded output
    pub root: RootTag,
    /// Coerce element text to integers, floats and booleans on decode
    pub coerce: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            declaration: true,
            root: RootTag::Xml,
            coerce: true,
        }
    }
}

impl XmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    pub fn with_root(mut self, root: RootTag) -> Self {
        self.root = root;
        self
    }

    pub fn with_coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }
}

impl PathTree {
    /// Encodes this tree as markup.
    pub fn to_xml(&self, options: &XmlOptions) -> Result<Vec<u8>> {
        Ok(encode(self, options)?)
    }

    /// Decodes markup into a new tree.
    pub fn from_xml(input: impl AsRef<[u8]>, options: &XmlOptions) -> Result<PathTree> {
        Ok(decode(input.as_ref(), options)?)
    }

    /// Decodes markup with default options and joins it into this tree.
    ///
    /// Keys already present are kept. On error this tree is left unchanged.
    pub fn parse_xml(&mut self, input: impl AsRef<[u8]>) -> Result<&mut Self> {
        let decoded = decode(input.as_ref(), &XmlOptions::default())?;
        Ok(self.join(&decoded))
    }
}
