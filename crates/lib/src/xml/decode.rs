//! Markup to [`PathTree`] decoding.
//!
//! The decoder is a single pass over the token stream. It keeps one
//! [`Frame`] per open element, plus a frame for the document level, and
//! writes into the tree through ordinary path operations as elements close:
//!
//! - a leaf element (no child elements) stores its text under its path,
//!   coerced to a typed scalar when enabled
//! - an element with children stores nothing itself; its children already
//!   wrote beneath its path
//! - adjacent repeats of the same child are folded into an array by the
//!   parent frame's [`FoldState`]
//!
//! Elements named `xml` or `root` (any case) are transparent at any depth.
//! Their text belongs to the nearest enclosing element, so
//! `<a><root>5</root></a>` stores `a = 5`. Attributes, comments, processing
//! instructions and the declaration are ignored.

use quick_xml::{Reader, escape::resolve_xml_entity, events::Event};
use tracing::{debug, trace};

use super::{XmlError, XmlOptions, fold::FoldState};
use crate::tree::{Node, PathBuf, PathTree};

/// State for one open element.
#[derive(Debug, Default)]
struct Frame {
    /// Path of the element; empty for the document level
    path: PathBuf,
    has_children: bool,
    /// Concatenated text, CDATA and entity content
    text: Option<String>,
    /// Folding among this element's children
    fold: FoldState,
}

impl Frame {
    fn push_text(&mut self, piece: &str) {
        self.text.get_or_insert_with(String::new).push_str(piece);
    }
}

/// Returns true for wrapper tags that contribute no path segment.
pub(crate) fn is_transparent(name: &str) -> bool {
    name.eq_ignore_ascii_case("xml") || name.eq_ignore_ascii_case("root")
}

/// Parses the boolean literals accepted on decode.
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Converts element text to a scalar node.
///
/// With coercion the trimmed text is tried as an integer, then a float,
/// then a boolean. Text matching none of them is kept verbatim.
pub(crate) fn coerce_text(text: String, coerce: bool) -> Node {
    if !coerce {
        return Node::Text(text);
    }

    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        Node::Int(n)
    } else if let Ok(x) = trimmed.parse::<f64>() {
        Node::Float(x)
    } else if let Some(b) = parse_bool(trimmed) {
        Node::Bool(b)
    } else {
        Node::Text(text)
    }
}

/// Resolves a general entity reference such as `amp` or `#x20`.
///
/// Unknown named entities are kept as literal `&name;` text.
fn resolve_entity(raw: &str) -> Result<String, XmlError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
        } else {
            rest.parse::<u32>()
        }
        .map_err(|_| XmlError::Malformed {
            reason: format!("invalid numeric entity &{raw};"),
        })?;

        let ch = char::from_u32(code).ok_or_else(|| XmlError::Malformed {
            reason: format!("invalid code point {code} in &{raw};"),
        })?;
        return Ok(ch.to_string());
    }

    Ok(format!("&{raw};"))
}

/// Streaming decoder that folds a token stream into a [`PathTree`].
struct Decoder {
    tree: PathTree,
    /// Document frame first, then one frame per open non-transparent element
    frames: Vec<Frame>,
    /// One entry per open element; `true` when transparent
    open: Vec<bool>,
    coerce: bool,
}

impl Decoder {
    fn new(options: &XmlOptions) -> Self {
        Self {
            tree: PathTree::new(),
            frames: vec![Frame::default()],
            open: Vec::new(),
            coerce: options.coerce,
        }
    }

    /// Returns the innermost non-transparent element, which receives text.
    ///
    /// Text outside every such element is dropped.
    fn text_target(&mut self) -> Option<&mut Frame> {
        match self.frames.as_mut_slice() {
            [_document] => None,
            [.., frame] => Some(frame),
            [] => None,
        }
    }

    fn start(&mut self, name: &str) {
        if is_transparent(name) {
            self.open.push(true);
            return;
        }
        self.open.push(false);

        let Some(parent) = self.frames.last_mut() else {
            return;
        };
        parent.has_children = true;
        let path = parent.path.join(name);
        trace!(path = %path, "Element opened");

        if parent.fold.opens_run(path.as_str()) {
            let existing = self.tree.remove(&path);
            parent.fold.start_run(path.as_str(), existing);
        }

        self.frames.push(Frame {
            path,
            ..Frame::default()
        });
    }

    fn end(&mut self) -> Result<(), XmlError> {
        let transparent = self.open.pop().ok_or_else(|| XmlError::Malformed {
            reason: "closing tag without matching opening tag".to_string(),
        })?;
        if transparent {
            return Ok(());
        }

        // The document frame is never popped while an element is open
        let (Some(frame), Some(parent)) = (self.frames.pop(), self.frames.last_mut()) else {
            return Err(XmlError::Malformed {
                reason: "element stack out of sync".to_string(),
            });
        };
        let path = frame.path.as_str();

        if parent.fold.is_accumulating(path) {
            let closed = if frame.has_children {
                self.tree.remove(path)
            } else {
                // No text at all marks the empty sibling; `<![CDATA[]]>` is a real ""
                frame.text.map(|text| coerce_text(text, self.coerce))
            };
            if let Some(items) = parent.fold.close(path, closed) {
                debug!(path, len = items.len(), "Array folded");
                self.tree.set(path, Node::Array(items));
            }
        } else {
            if !frame.has_children
                && let Some(text) = frame.text
            {
                self.tree.set(path, coerce_text(text, self.coerce));
            }
            parent.fold.close(path, None);
        }

        trace!(path, "Element closed");
        Ok(())
    }

    fn finish(self) -> Result<PathTree, XmlError> {
        if !self.open.is_empty() {
            return Err(XmlError::UnclosedElements {
                open: self.open.len(),
            });
        }
        Ok(self.tree)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, XmlError> {
    std::str::from_utf8(bytes).map_err(|err| XmlError::Malformed {
        reason: err.to_string(),
    })
}

/// Decodes markup bytes into a new tree.
///
/// Decoding stops at the first malformed token; nothing decoded so far is
/// returned on error.
pub fn decode(input: &[u8], options: &XmlOptions) -> Result<PathTree, XmlError> {
    let mut reader = Reader::from_reader(input);
    // Whitespace is significant in leaf text; <a/> behaves like <a></a>
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut decoder = Decoder::new(options);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                decoder.start(&name);
            }
            Event::End(_) => decoder.end()?,
            Event::Text(e) => {
                let text = e.decode().map_err(|err| XmlError::Malformed {
                    reason: err.to_string(),
                })?;
                if let Some(frame) = decoder.text_target() {
                    frame.push_text(&text);
                }
            }
            Event::CData(e) => {
                let text = utf8(e.as_ref())?.to_string();
                if let Some(frame) = decoder.text_target() {
                    frame.push_text(&text);
                }
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|err| XmlError::Malformed {
                    reason: err.to_string(),
                })?;
                let resolved = resolve_entity(&raw)?;
                if let Some(frame) = decoder.text_target() {
                    frame.push_text(&resolved);
                }
            }
            // Only emitted when empty elements are not expanded
            Event::Empty(e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                decoder.start(&name);
                decoder.end()?;
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    let tree = decoder.finish()?;
    debug!(keys = tree.len(), "Decoded markup");
    Ok(tree)
}
