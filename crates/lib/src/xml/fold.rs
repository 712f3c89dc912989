//! Array folding for repeated sibling elements.
//!
//! Markup has no array type; a list is written as the same tag repeated.
//! Every open element keeps one [`FoldState`] describing its children, and
//! the decoder drives it with two events:
//!
//! - a child opens: [`FoldState::opens_run`] tells whether it repeats the
//!   sibling that closed immediately before it. If so the decoder lifts the
//!   value already stored for that path out of the tree and hands it to
//!   [`FoldState::start_run`].
//! - a child closes: [`FoldState::close`] records it as the most recently
//!   closed sibling and, when a run is active for its path, returns the
//!   folded array for the decoder to write back.
//!
//! Only a close followed directly by an open of the same path starts or
//! continues a run. A repeat separated by a different sibling is treated
//! as a fresh element and overwrites the earlier value.

use tracing::debug;

use crate::tree::Node;

/// Folding state among the children of one open element.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum FoldState {
    /// No child has closed yet
    #[default]
    Idle,
    /// The child at this path closed last
    JustClosed(String),
    /// A repeat of this path is open; `stash` holds the earlier values
    Accumulating { path: String, stash: Vec<Node> },
}

impl FoldState {
    /// Returns true if a child opening at `path` repeats the one that just closed.
    pub(crate) fn opens_run(&self, path: &str) -> bool {
        matches!(self, FoldState::JustClosed(closed) if closed == path)
    }

    /// Begins accumulating at `path`, seeded with the value stored there so far.
    pub(crate) fn start_run(&mut self, path: &str, existing: Option<Node>) {
        let stash = existing.map(Node::into_array).unwrap_or_default();
        debug!(path, seeded = stash.len(), "Folding repeated elements into array");
        *self = FoldState::Accumulating {
            path: path.to_string(),
            stash,
        };
    }

    /// Returns true if a run is active for `path`.
    pub(crate) fn is_accumulating(&self, path: &str) -> bool {
        matches!(self, FoldState::Accumulating { path: active, .. } if active == path)
    }

    /// Records that the child at `path` closed with `value`.
    ///
    /// When a run was active for `path` the value is appended and the whole
    /// array is returned. A `None` value closes the run without adding an
    /// element, which is how an empty marker sibling is absorbed.
    pub(crate) fn close(&mut self, path: &str, value: Option<Node>) -> Option<Vec<Node>> {
        match std::mem::take(self) {
            FoldState::Accumulating {
                path: active,
                mut stash,
            } if active == path => {
                stash.extend(value);
                *self = FoldState::JustClosed(active);
                Some(stash)
            }
            _ => {
                *self = FoldState::JustClosed(path.to_string());
                None
            }
        }
    }
}
