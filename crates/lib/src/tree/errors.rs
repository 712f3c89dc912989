//! Error types for tree operations.
//!
//! Path lookups never fail: a missing key or an unnavigable segment is
//! reported as `None`. The errors here cover conversions at the edges of the
//! tree, such as extracting a typed value or importing foreign data whose
//! shape cannot become a tree.

use thiserror::Error;

/// Structured error types for tree conversions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TreeError {
    /// A node held a different variant than the one requested
    #[error("Tree type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Input that must become a tree was not a key/value mapping
    #[error("Expected an object at the top level, found {found}")]
    NotAnObject { found: String },
}

impl TreeError {
    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, TreeError::TypeMismatch { .. })
    }

    /// Check if this error was caused by input of the wrong shape
    pub fn is_shape_error(&self) -> bool {
        matches!(self, TreeError::NotAnObject { .. })
    }
}

impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}
