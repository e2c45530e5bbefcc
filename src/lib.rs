//! xmlnode - Ordered, namespace-aware XML trees
//!
//! Layers:
//! - core: byte scanning, tokenizing, entities, input encodings
//! - reader: zero-copy token stream over a string slice
//! - de: builds a [`Document`] from any token source
//! - dom: the tree itself ([`XmlNode`], [`Node`], [`Scalar`])
//! - ser: walks a tree and drives an [`EventSink`], [`XmlWriter`] renders text
//! - codec: converts `serde::Serialize` values into tree nodes
//!
//! With the `nif` feature the crate also builds as an Erlang NIF library
//! exporting `Elixir.XmlNode.Native`.
//!
//! ```
//! let doc = xmlnode::parse(r#"<dog name="Buddy"><age>5</age></dog>"#).unwrap();
//! assert_eq!(doc["age"].value().and_then(|v| v.as_i64()), Some(5));
//! ```

pub mod codec;
pub mod core;
pub mod de;
pub mod dom;
pub mod error;
pub mod options;
pub mod reader;
pub mod ser;

#[cfg(feature = "nif")]
mod nif;
#[cfg(feature = "nif")]
mod resource;
#[cfg(feature = "nif")]
mod term;

use std::io::Read;

pub use codec::{to_node, ARRAY_ITEM};
pub use de::{deserialize, EventSource};
pub use dom::{
    ns, ChildEntry, ChildIndex, Document, Namespaces, Node, Scalar, Slot, XmlNode, TEXT_SLOT,
};
pub use error::{Result, XmlError};
pub use options::{NamespaceScope, ReadOptions, WriteOptions};
pub use reader::{EndElement, NamespaceDecl, SliceReader, StartElement, XmlDeclaration, XmlToken};
pub use ser::{EventSink, XmlWriter};

/// Parse a document with default options
pub fn parse(input: &str) -> Result<Document> {
    Document::parse(input)
}

pub fn parse_with(input: &str, options: ReadOptions) -> Result<Document> {
    Document::parse_with(input, options)
}

/// Parse raw bytes, detecting UTF-8 or UTF-16 from the BOM or the first bytes
pub fn parse_bytes(input: Vec<u8>) -> Result<Document> {
    let text = crate::core::encoding::decode_input(input)?;
    Document::parse(&text)
}

/// Read `reader` to the end and parse the result
///
/// The whole input is buffered first; parsing itself works on the slice.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let text = crate::reader::buffered::read_to_string(reader)?;
    Document::parse(&text)
}
