//! DOM Module - Ordered XML tree
//!
//! Every element is an [`XmlNode`]: an ordered list of named child slots,
//! an ordered attribute map and the namespace bindings declared on it.
//! - Repeated names are kept as separate slots in document order
//! - Text runs sit between elements as unnamed text slots
//! - Leaves carry a typed [`Scalar`]

pub mod document;
pub mod entry;
pub mod namespace;
pub mod node;
pub mod value;

pub use document::Document;
pub use entry::{ChildEntry, Slot, TEXT_SLOT};
pub use namespace::{ns, Namespaces};
pub use node::{ChildIndex, Node, XmlNode};
pub use value::Scalar;
