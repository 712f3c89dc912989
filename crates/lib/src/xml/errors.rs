//! Error types for the XML codec.

use thiserror::Error;

/// Structured error types for encoding and decoding markup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum XmlError {
    /// Encoding was asked to emit a tree with no keys
    #[error("Cannot encode an empty tree")]
    EmptyTree,

    /// The tokenizer rejected the input
    #[error("Malformed markup: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// A token was well-formed but its content could not be decoded
    #[error("Undecodable markup content: {reason}")]
    Malformed { reason: String },

    /// The input ended while elements were still open
    #[error("Markup ended with {open} unclosed element(s)")]
    UnclosedElements { open: usize },

    /// A key cannot be written as an element name
    #[error("Key {name:?} is not a valid element name")]
    InvalidName { name: String },

    /// The token writer failed while encoding
    #[error("Failed to write markup: {reason}")]
    Write { reason: String },
}

impl XmlError {
    /// Check if this error was raised while decoding
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            XmlError::Syntax(_) | XmlError::Malformed { .. } | XmlError::UnclosedElements { .. }
        )
    }

    /// Check if this error was raised while encoding
    pub fn is_encode_error(&self) -> bool {
        matches!(
            self,
            XmlError::EmptyTree | XmlError::InvalidName { .. } | XmlError::Write { .. }
        )
    }
}

impl From<XmlError> for crate::Error {
    fn from(err: XmlError) -> Self {
        crate::Error::Xml(err)
    }
}
