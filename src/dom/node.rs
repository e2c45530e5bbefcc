//! Tree nodes
//!
//! `XmlNode` is an element: an ordered child list, an attribute map and its
//! own namespace bookkeeping. `Node` is what a child slot holds.
//!
//! Child order is document order. Names may repeat, and every single-result
//! lookup by name resolves to the first match. Text fragments are entries of
//! their own and are never merged.

use super::entry::ChildEntry;
use super::namespace::{ns, Namespaces};
use super::value::Scalar;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::ops;

/// A child slot's content
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A container with children, attributes and namespaces
    Element(XmlNode),
    /// A scalar payload with no children
    Leaf(Scalar),
    /// Absent value returned by `path` lookups; skipped when serializing
    Missing,
}

static MISSING: Node = Node::Missing;

impl Node {
    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing)
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// `Leaf(Null)`; an absent node is not null
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Leaf(Scalar::Null))
    }

    pub fn as_element(&self) -> Option<&XmlNode> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlNode> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Scalar payload, looking through an element that wraps exactly one text fragment
    ///
    /// That is the shape `put` and the parser produce for `<a>5</a>`.
    pub fn value(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Element(element) => match element.children.as_slice() {
                [entry] if entry.is_text() => entry.node().as_scalar(),
                _ => None,
            },
            Node::Missing => None,
        }
    }

    /// Text content: a leaf's lexical form or an element's joined text fragments
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match self {
            Node::Leaf(value) => Some(value.to_lexical()),
            Node::Element(element) => element.text(),
            Node::Missing => None,
        }
    }

    /// First child matching `index`, `None` for leaves and missing nodes
    pub fn get<I: ChildIndex>(&self, index: I) -> Option<&Node> {
        self.as_element()?.get(index)
    }

    pub fn get_mut<I: ChildIndex>(&mut self, index: I) -> Option<&mut Node> {
        self.as_element_mut()?.get_mut(index)
    }

    /// Like `get` but never fails: absent children resolve to `Node::Missing`
    pub fn path<I: ChildIndex>(&self, index: I) -> &Node {
        self.get(index).unwrap_or(&MISSING)
    }
}

impl From<XmlNode> for Node {
    fn from(element: XmlNode) -> Self {
        Node::Element(element)
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Node::Leaf(value)
    }
}

/// Addressing a child either by position or by element name
///
/// Implemented for `usize`, `str` and `String`, the way `serde_json` indexes
/// its `Value`.
pub trait ChildIndex: private::Sealed {
    #[doc(hidden)]
    fn position_in(&self, node: &XmlNode) -> Option<usize>;
}

impl ChildIndex for usize {
    fn position_in(&self, node: &XmlNode) -> Option<usize> {
        (*self < node.children.len()).then_some(*self)
    }
}

impl ChildIndex for str {
    fn position_in(&self, node: &XmlNode) -> Option<usize> {
        node.children.iter().position(|entry| entry.matches(self))
    }
}

impl ChildIndex for String {
    fn position_in(&self, node: &XmlNode) -> Option<usize> {
        self.as_str().position_in(node)
    }
}

impl<T: ChildIndex + ?Sized> ChildIndex for &T {
    fn position_in(&self, node: &XmlNode) -> Option<usize> {
        (**self).position_in(node)
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// An element node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    pub(crate) children: Vec<ChildEntry>,
    /// Keyed by local name
    pub(crate) attributes: IndexMap<String, Scalar>,
    pub(crate) namespaces: Namespaces,
}

impl XmlNode {
    /// Create an empty element
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element prefilled with named children, in iteration order
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        let mut node = XmlNode::new();
        node.set_all(entries);
        node
    }

    // ---- builders ----

    fn push_element(&mut self, name: String, element: XmlNode) -> &mut XmlNode {
        self.children.push(ChildEntry::named(name, Node::Element(element)));
        match self.children.last_mut().and_then(ChildEntry::node_mut) {
            Some(Node::Element(child)) => child,
            _ => unreachable!("an element entry was just pushed"),
        }
    }

    /// Append an empty container child and return it
    pub fn put_container(&mut self, name: impl Into<String>) -> &mut XmlNode {
        self.push_element(name.into(), XmlNode::new())
    }

    /// Append an empty container child that is written as `prefix:name`
    pub fn put_prefixed_container(
        &mut self,
        prefix: impl Into<String>,
        name: impl Into<String>,
    ) -> &mut XmlNode {
        let name = name.into();
        self.declare_qualified_child(prefix, name.clone());
        self.push_element(name, XmlNode::new())
    }

    /// Append `<name>value</name>`: a container holding one text fragment
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Scalar>) -> &mut XmlNode {
        let mut element = XmlNode::new();
        element.append_text(value);
        self.push_element(name.into(), element)
    }

    /// Append a null leaf, written as `<name/>`
    pub fn put_null(&mut self, name: impl Into<String>) -> &mut Self {
        self.set(name, Node::Leaf(Scalar::Null))
    }

    /// Append a leaf whose markup is written verbatim
    pub fn put_raw(&mut self, name: impl Into<String>, raw: impl Into<String>) -> &mut Self {
        self.set(name, Node::Leaf(Scalar::Raw(raw.into())))
    }

    /// Append a child; existing children with the same name are kept
    pub fn set(&mut self, name: impl Into<String>, node: impl Into<Node>) -> &mut Self {
        self.children.push(ChildEntry::named(name, node.into()));
        self
    }

    pub fn set_all<I, K>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        self.children
            .extend(entries.into_iter().map(|(name, node)| ChildEntry::named(name, node)));
        self
    }

    /// Append unless a child with this name exists; returns the existing child
    pub fn put_if_absent(
        &mut self,
        name: impl Into<String>,
        node: impl Into<Node>,
    ) -> Option<&Node> {
        let name = name.into();
        match name.as_str().position_in(self) {
            Some(pos) => Some(self.children[pos].node()),
            None => {
                self.set(name, node);
                None
            }
        }
    }

    /// Set an unprefixed attribute, dropping any earlier qualification of the name
    pub fn put_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> &mut Self {
        let name = name.into();
        self.namespaces.clear_attribute(&name);
        self.attributes.insert(name, value.into());
        self
    }

    /// Set an attribute written as `prefix:name`
    pub fn put_prefixed_attribute(
        &mut self,
        prefix: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> &mut Self {
        let name = name.into();
        self.declare_qualified_attribute(prefix, name.clone());
        self.attributes.insert(name, value.into());
        self
    }

    /// Append a text fragment after the current children
    pub fn append_text(&mut self, value: impl Into<Scalar>) -> &mut Self {
        self.children.push(ChildEntry::text(value));
        self
    }

    /// Append a text fragment written as a CDATA section
    pub fn append_cdata(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(ChildEntry::text(Scalar::CData(text.into())));
        self
    }

    // ---- namespaces ----

    /// Declare `prefix` on this node; an empty prefix declares the default namespace
    pub fn bind_namespace(
        &mut self,
        prefix: impl Into<String>,
        uri: impl Into<String>,
    ) -> &mut Self {
        self.namespaces.bind(prefix, uri);
        self
    }

    /// Record that child elements named `local` are written under `prefix`
    pub fn declare_qualified_child(&mut self, prefix: impl Into<String>, local: impl Into<String>) {
        self.namespaces.declare_element(prefix, local);
    }

    /// Record that attribute `local` is written under `prefix`
    pub fn declare_qualified_attribute(
        &mut self,
        prefix: impl Into<String>,
        local: impl Into<String>,
    ) {
        self.namespaces.declare_attribute(prefix, local);
    }

    /// URI bound to `prefix` on this node; `xml` and `xmlns` are implicit
    pub fn lookup_namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces.uri(prefix).or(match prefix {
            "xml" => Some(ns::XML),
            "xmlns" => Some(ns::XMLNS),
            _ => None,
        })
    }

    pub fn elements_under_prefix(&self, prefix: &str) -> impl Iterator<Item = &str> {
        self.namespaces.elements_under(prefix)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.namespaces.prefixes()
    }

    pub fn namespace_uris(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.bindings()
    }

    pub fn element_prefix(&self, local: &str) -> Option<&str> {
        self.namespaces.element_prefix(local)
    }

    pub fn attribute_prefix(&self, local: &str) -> Option<&str> {
        self.namespaces.attribute_prefix(local)
    }

    /// Namespace URI of child element `local`, from its declared prefix and this node's binding
    pub fn resolve_element_namespace(&self, local: &str) -> Option<&str> {
        self.lookup_namespace_uri(self.element_prefix(local)?)
    }

    pub fn namespaces(&self) -> &Namespaces {
        &self.namespaces
    }

    // ---- queries ----

    pub fn get<I: ChildIndex>(&self, index: I) -> Option<&Node> {
        index.position_in(self).map(|pos| self.children[pos].node())
    }

    /// Mutable access to a named child; text fragments are reached through `entries_mut`
    pub fn get_mut<I: ChildIndex>(&mut self, index: I) -> Option<&mut Node> {
        let pos = index.position_in(self)?;
        self.children[pos].node_mut()
    }

    /// Like `get` but never fails: absent children resolve to `Node::Missing`
    pub fn path<I: ChildIndex>(&self, index: I) -> &Node {
        self.get(index).unwrap_or(&MISSING)
    }

    pub fn has<I: ChildIndex>(&self, index: I) -> bool {
        index.position_in(self).is_some()
    }

    /// Present and not a null leaf
    pub fn has_non_null<I: ChildIndex>(&self, index: I) -> bool {
        self.get(index).is_some_and(|node| !node.is_null())
    }

    /// Number of child entries, text fragments included
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn entries(&self) -> std::slice::Iter<'_, ChildEntry> {
        self.children.iter()
    }

    pub fn entries_mut(&mut self) -> std::slice::IterMut<'_, ChildEntry> {
        self.children.iter_mut()
    }

    /// Names of element children in order, repeats included
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(ChildEntry::element_name)
    }

    /// Nodes of every child entry in order
    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().map(ChildEntry::node)
    }

    /// Every child named `name`, in order
    pub fn get_all<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Node> + 's {
        self.children
            .iter()
            .filter(move |entry| entry.matches(name))
            .map(ChildEntry::node)
    }

    /// This node's own text fragments, joined; `None` when it has none
    pub fn text(&self) -> Option<Cow<'_, str>> {
        let mut fragments = self
            .children
            .iter()
            .filter(|entry| entry.is_text())
            .filter_map(|entry| entry.node().as_scalar());

        let first = fragments.next()?.to_lexical();
        match fragments.next() {
            None => Some(first),
            Some(second) => {
                let mut joined = first.into_owned();
                joined.push_str(&second.to_lexical());
                fragments.for_each(|value| joined.push_str(&value.to_lexical()));
                Some(Cow::Owned(joined))
            }
        }
    }

    // ---- mutations ----

    /// Remove every child named `name`; returns the first removed node
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let mut first = None;
        let mut kept = Vec::with_capacity(self.children.len());
        for entry in self.children.drain(..) {
            if entry.matches(name) {
                if first.is_none() {
                    first = Some(entry.into_node());
                }
            } else {
                kept.push(entry);
            }
        }
        self.children = kept;
        first
    }

    /// Remove exactly the entry at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Node> {
        (index < self.children.len()).then(|| self.children.remove(index).into_node())
    }

    /// Swap the first child named `name`, returning the previous node; appends when absent
    pub fn replace(&mut self, name: &str, node: impl Into<Node>) -> Option<Node> {
        let node = node.into();
        match name.position_in(self) {
            Some(pos) => Some(self.children[pos].swap_node(node)),
            None => {
                self.set(name, node);
                None
            }
        }
    }

    /// Keep only the entries whose slot name is listed
    ///
    /// Text fragments answer to [`TEXT_SLOT`](crate::dom::TEXT_SLOT) and are
    /// dropped unless it is listed.
    pub fn retain<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        self.children
            .retain(|entry| names.iter().any(|n| n.as_ref() == entry.name()));
        self
    }

    /// Drop every entry whose slot name is listed
    ///
    /// Listing [`TEXT_SLOT`](crate::dom::TEXT_SLOT) drops the text fragments.
    pub fn without<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        self.children
            .retain(|entry| !names.iter().any(|n| n.as_ref() == entry.name()));
        self
    }

    /// Drop every text fragment, keeping element children
    pub fn remove_text(&mut self) -> &mut Self {
        self.children.retain(|entry| !entry.is_text());
        self
    }

    /// Drop every child entry; attributes and namespaces are kept
    pub fn remove_all(&mut self) -> &mut Self {
        self.children.clear();
        self
    }

    // ---- search ----

    /// First child named `name`; when there is none here, the first match
    /// found searching each child subtree in order
    pub fn find_value(&self, name: &str) -> Option<&Node> {
        if let Some(found) = self.get(name) {
            return Some(found);
        }
        self.children
            .iter()
            .find_map(|entry| entry.node().as_element()?.find_value(name))
    }

    /// Every child named `name` at any depth; matched subtrees are not searched further
    pub fn find_values(&self, name: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_values(name, &mut found);
        found
    }

    fn collect_values<'s>(&'s self, name: &str, found: &mut Vec<&'s Node>) {
        for entry in &self.children {
            if entry.matches(name) {
                found.push(entry.node());
            } else if let Node::Element(child) = entry.node() {
                child.collect_values(name, found);
            }
        }
    }

    /// The element holding a child named `name`: this node first, then each
    /// child subtree in order
    pub fn find_parent(&self, name: &str) -> Option<&XmlNode> {
        if self.has(name) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|entry| entry.node().as_element()?.find_parent(name))
    }

    // ---- attributes ----

    pub fn attribute(&self, name: &str) -> Option<&Scalar> {
        self.attributes.get(name)
    }

    /// Attributes keyed by local name, in insertion order
    pub fn attributes(&self) -> &IndexMap<String, Scalar> {
        &self.attributes
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Scalar> {
        self.namespaces.clear_attribute(name);
        self.attributes.shift_remove(name)
    }
}

impl<I: ChildIndex> ops::Index<I> for XmlNode {
    type Output = Node;

    fn index(&self, index: I) -> &Node {
        self.path(index)
    }
}

impl<I: ChildIndex> ops::Index<I> for Node {
    type Output = Node;

    fn index(&self, index: I) -> &Node {
        self.path(index)
    }
}
