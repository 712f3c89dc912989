//! Dotted paths for addressing nested trees.
//!
//! A path such as `"user.profile.name"` names a route through nested
//! [`PathTree`](super::PathTree) nodes. Empty components are skipped, so
//! `".a..b."` and `"a.b"` address the same node, and `""` or `"..."` is the
//! empty path. The empty path never names a key.
//!
//! ```rust
//! use pathtree::tree::{Path, PathBuf};
//!
//! let borrowed: &Path = "user..profile.name".as_ref();
//! assert_eq!(borrowed.components().collect::<Vec<_>>(), ["user", "profile", "name"]);
//!
//! let owned = PathBuf::new().join("user").join(".profile.");
//! assert_eq!(owned.as_str(), "user.profile");
//! ```

use std::{fmt, ops::Deref};

/// Separator between path components.
pub const SEPARATOR: char = '.';

/// A borrowed dotted path, used behind a reference like `str`.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

impl Path {
    /// Wraps a string slice as a path.
    pub fn new(s: &str) -> &Path {
        // SAFETY: Path is a repr(transparent) wrapper around str
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Iterates over the non-empty components.
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.inner.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.components().next().is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

/// An owned dotted path with no empty components.
///
/// Built one step at a time with [`PathBuf::join`], as the markup decoder does
/// while descending into elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathBuf {
    inner: String,
}

impl PathBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new path with the components of `tail` appended.
    pub fn join(&self, tail: impl AsRef<str>) -> PathBuf {
        let mut inner = self.inner.clone();
        for component in Path::new(tail.as_ref()).components() {
            if !inner.is_empty() {
                inner.push(SEPARATOR);
            }
            inner.push_str(component);
        }
        PathBuf { inner }
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for str {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<Path> for String {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}
