//! XML Reader Module
//!
//! - SliceReader: zero-copy token reader over a `&str`
//! - Events: the token vocabulary consumed by the deserializer
//! - Buffered: draining and decoding `Read` sources

pub mod buffered;
pub mod events;
pub mod slice;

pub use events::{EndElement, NamespaceDecl, StartElement, XmlDeclaration, XmlToken};
pub use slice::SliceReader;
