//! [`PathTree`] to markup encoding.

use base64ct::{Base64, Encoding};
use quick_xml::{
    Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use tracing::debug;

use super::{XmlError, XmlOptions};
use crate::tree::{Node, PathTree};

type XmlWriter = Writer<Vec<u8>>;

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), XmlError> {
    writer.write_event(event).map_err(|e| XmlError::Write {
        reason: e.to_string(),
    })
}

fn emit_text(writer: &mut XmlWriter, text: &str) -> Result<(), XmlError> {
    emit(writer, Event::Text(BytesText::new(text)))
}

/// Writes text as CDATA, splitting around any `]]>` so no section ends early.
fn emit_cdata(writer: &mut XmlWriter, text: &str) -> Result<(), XmlError> {
    let mut sections = text.split("]]>").peekable();
    let mut carry = "";
    while let Some(section) = sections.next() {
        let tail = if sections.peek().is_some() { "]]" } else { "" };
        let content = format!("{carry}{section}{tail}");
        emit(writer, Event::CData(BytesCData::new(content)))?;
        carry = ">";
    }
    Ok(())
}

/// Formats a float, dropping the fraction when it is integral.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Checks a key against the element name production: a letter or `_`
/// first, then letters, digits, `-`, `_` or `.`.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn write_children(writer: &mut XmlWriter, tree: &PathTree) -> Result<(), XmlError> {
    let mut entries: Vec<_> = tree.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (key, node) in entries {
        write_node(writer, key, node)?;
    }
    Ok(())
}

fn write_element(
    writer: &mut XmlWriter,
    name: &str,
    body: impl FnOnce(&mut XmlWriter) -> Result<(), XmlError>,
) -> Result<(), XmlError> {
    if !is_element_name(name) {
        return Err(XmlError::InvalidName {
            name: name.to_string(),
        });
    }
    emit(writer, Event::Start(BytesStart::new(name)))?;
    body(writer)?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn write_node(writer: &mut XmlWriter, name: &str, node: &Node) -> Result<(), XmlError> {
    match node {
        Node::Tree(tree) => write_element(writer, name, |w| write_children(w, tree)),
        Node::Text(text) => {
            if text.parse::<i64>().is_ok() {
                write_element(writer, name, |w| emit_text(w, text))
            } else {
                write_element(writer, name, |w| emit_cdata(w, text))
            }
        }
        Node::Int(n) => write_element(writer, name, |w| emit_text(w, &n.to_string())),
        Node::Float(x) => write_element(writer, name, |w| emit_text(w, &format_float(*x))),
        Node::Bool(b) => {
            write_element(writer, name, |w| emit_text(w, if *b { "true" } else { "false" }))
        }
        Node::Bytes(bytes) => {
            write_element(writer, name, |w| emit_text(w, &Base64::encode_string(bytes)))
        }
        Node::Array(items) => {
            for item in items {
                write_node(writer, name, item)?;
            }
            // A lone element gets an empty sibling so it decodes as an array
            if items.len() == 1 {
                write_element(writer, name, |_| Ok(()))?;
            }
            Ok(())
        }
    }
}

/// Encodes a tree as markup.
///
/// Top-level keys become children of the wrapping root element, written in
/// lexicographic key order. Fails with [`XmlError::EmptyTree`] when there is
/// nothing to write.
pub fn encode(tree: &PathTree, options: &XmlOptions) -> Result<Vec<u8>, XmlError> {
    if tree.is_empty() {
        return Err(XmlError::EmptyTree);
    }

    let mut writer = Writer::new(Vec::new());
    if options.declaration {
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))),
        )?;
    }
    write_element(&mut writer, options.root.as_str(), |w| write_children(w, tree))?;

    let bytes = writer.into_inner();
    debug!(keys = tree.len(), bytes = bytes.len(), "Encoded tree as markup");
    Ok(bytes)
}
