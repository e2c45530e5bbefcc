//! Child entries
//!
//! Each entry in a node's child list pairs a slot with the node it owns.
//! Element slots carry the local name the child was created under. Text
//! slots carry no name and always hold a leaf.

use super::node::Node;
use super::value::Scalar;

/// Name reported for text entries
pub const TEXT_SLOT: &str = "@text";

/// The slot a child entry occupies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Name(String),
    Text,
}

/// One entry of an ordered child list
#[derive(Debug, Clone, PartialEq)]
pub struct ChildEntry {
    slot: Slot,
    node: Node,
}

impl ChildEntry {
    /// A named child
    pub fn named(name: impl Into<String>, node: Node) -> Self {
        ChildEntry {
            slot: Slot::Name(name.into()),
            node,
        }
    }

    /// A text fragment
    pub fn text(value: impl Into<Scalar>) -> Self {
        ChildEntry {
            slot: Slot::Text,
            node: Node::Leaf(value.into()),
        }
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Slot name, [`TEXT_SLOT`] for text
    pub fn name(&self) -> &str {
        match &self.slot {
            Slot::Name(name) => name,
            Slot::Text => TEXT_SLOT,
        }
    }

    /// Element name, `None` for text
    pub fn element_name(&self) -> Option<&str> {
        match &self.slot {
            Slot::Name(name) => Some(name),
            Slot::Text => None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.slot == Slot::Text
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.element_name() == Some(name)
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Mutable access for named entries; text entries expose their scalar via
    /// [`ChildEntry::text_mut`] so they can never stop being leaves.
    pub fn node_mut(&mut self) -> Option<&mut Node> {
        match self.slot {
            Slot::Name(_) => Some(&mut self.node),
            Slot::Text => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut Scalar> {
        match (&self.slot, &mut self.node) {
            (Slot::Text, Node::Leaf(value)) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn swap_node(&mut self, node: Node) -> Node {
        std::mem::replace(&mut self.node, node)
    }

    pub fn into_node(self) -> Node {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_entry() {
        let mut entry = ChildEntry::text("hello");
        assert!(entry.is_text());
        assert_eq!(entry.name(), TEXT_SLOT);
        assert_eq!(entry.element_name(), None);
        assert!(entry.node_mut().is_none());
        *entry.text_mut().unwrap() = Scalar::from("bye");
        assert_eq!(entry.node(), &Node::Leaf(Scalar::from("bye")));
    }

    #[test]
    fn test_named_entry() {
        let mut entry = ChildEntry::named("item", Node::Leaf(Scalar::Null));
        assert!(!entry.is_text());
        assert!(entry.matches("item"));
        assert!(!entry.matches(TEXT_SLOT));
        assert!(entry.text_mut().is_none());
        assert!(entry.node_mut().is_some());
    }
}
