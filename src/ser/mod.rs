//! Serialization Engine
//!
//! Walks a tree depth-first and pushes structured write calls into an
//! [`EventSink`]. For every element the order is fixed: namespace
//! declarations, then attributes in insertion order, then children in
//! insertion order.
//!
//! The walk keeps an explicit stack of child iterators, so document depth
//! is bounded by the heap rather than the call stack.

pub mod writer;

use crate::dom::{ChildEntry, Document, Node, Scalar, XmlNode};
use crate::error::Result;
use crate::reader::XmlDeclaration;
use std::borrow::Cow;

pub use writer::XmlWriter;

/// Receiver of serialization calls
///
/// The engine names a slot with `field_name` and then either opens a
/// container for it or writes a scalar into it. Attribute mode and unwrapped
/// text mode change what a scalar write means.
pub trait EventSink {
    /// Called before anything else when the document carries a declaration
    fn write_declaration(&mut self, _declaration: &XmlDeclaration) -> Result<()> {
        Ok(())
    }

    /// Name the next container, scalar or attribute
    fn field_name(&mut self, name: &str) -> Result<()>;

    /// Open a container under the pending field name
    fn start_container(&mut self) -> Result<()>;

    /// Close the innermost open container
    fn end_container(&mut self) -> Result<()>;

    /// While on, `field_name` + `write_scalar` pairs are attributes of the open container
    fn set_attribute_mode(&mut self, enabled: bool) -> Result<()>;

    /// While on, `write_scalar` writes bare character data into the open container
    fn set_unwrapped_text_mode(&mut self, enabled: bool) -> Result<()>;

    fn write_scalar(&mut self, value: &Scalar) -> Result<()>;
}

impl XmlNode {
    /// Push this node to `sink`; the caller has already named it with `field_name`
    pub fn serialize<S: EventSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        serialize_node(self, sink)
    }

    /// Write this node as an XML string under `name`
    pub fn to_xml(&self, name: &str) -> Result<String> {
        let mut writer = XmlWriter::new();
        writer.field_name(name)?;
        self.serialize(&mut writer)?;
        writer.finish()
    }
}

impl Document {
    /// Push the declaration, the root name and the root node to `sink`
    pub fn serialize<S: EventSink + ?Sized>(&self, sink: &mut S) -> Result<()> {
        if let Some(declaration) = self.declaration() {
            sink.write_declaration(declaration)?;
        }
        sink.field_name(self.root_name())?;
        serialize_node(self.root(), sink)
    }
}

fn serialize_node<S: EventSink + ?Sized>(node: &XmlNode, sink: &mut S) -> Result<()> {
    open_container(node, sink)?;

    let mut stack = vec![(node, node.entries())];
    while let Some((parent, children)) = stack.last_mut() {
        let parent: &XmlNode = *parent;
        let Some(entry) = children.next() else {
            sink.end_container()?;
            stack.pop();
            continue;
        };

        match entry.node() {
            Node::Missing => {}
            Node::Leaf(value) if entry.is_text() => {
                sink.set_unwrapped_text_mode(true)?;
                sink.write_scalar(value)?;
                sink.set_unwrapped_text_mode(false)?;
            }
            Node::Leaf(value) => {
                sink.field_name(&qualified_child_name(parent, entry))?;
                sink.write_scalar(value)?;
            }
            Node::Element(child) => {
                sink.field_name(&qualified_child_name(parent, entry))?;
                open_container(child, sink)?;
                stack.push((child, child.entries()));
            }
        }
    }

    Ok(())
}

/// Start a container and write its namespace declarations and attributes
fn open_container<S: EventSink + ?Sized>(node: &XmlNode, sink: &mut S) -> Result<()> {
    sink.start_container()?;

    if node.namespaces.has_bindings() || !node.attributes.is_empty() {
        sink.set_attribute_mode(true)?;

        for (prefix, uri) in node.namespace_uris() {
            if prefix.is_empty() {
                sink.field_name("xmlns")?;
            } else {
                sink.field_name(&format!("xmlns:{prefix}"))?;
            }
            sink.write_scalar(&Scalar::Text(uri.to_string()))?;
        }

        for (name, value) in node.attributes() {
            sink.field_name(&qualified_attribute_name(node, name))?;
            sink.write_scalar(value)?;
        }

        sink.set_attribute_mode(false)?;
    }

    Ok(())
}

/// Name of a child entry, qualified by the first prefix `parent` declared it under
pub(crate) fn qualified_child_name<'a>(parent: &XmlNode, entry: &'a ChildEntry) -> Cow<'a, str> {
    let local = entry.name();
    qualify(parent.element_prefix(local), local)
}

pub(crate) fn qualified_attribute_name<'a>(node: &XmlNode, local: &'a str) -> Cow<'a, str> {
    qualify(node.attribute_prefix(local), local)
}

fn qualify<'a>(prefix: Option<&str>, local: &'a str) -> Cow<'a, str> {
    match prefix {
        None | Some("") => Cow::Borrowed(local),
        Some(prefix) if prefix.trim().is_empty() => {
            log::warn!("blank namespace prefix on '{local}', writing it unqualified");
            Cow::Borrowed(local)
        }
        Some(prefix) => Cow::Owned(format!("{prefix}:{local}")),
    }
}
