//! Per-node namespace bookkeeping
//!
//! A node records the prefixes it declares and which of its element children
//! and attributes are written under which prefix. Nothing here is inherited:
//! every lookup consults only the node's own maps.

use indexmap::{IndexMap, IndexSet};

/// Well-known namespace URIs
pub mod ns {
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
}

/// Namespace bindings and qualified names declared on one node
///
/// The empty prefix stands for the default namespace in `uris` and for
/// unprefixed names in `elements`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
    uris: IndexMap<String, String>,
    elements: IndexMap<String, IndexSet<String>>,
    attributes: IndexMap<String, IndexSet<String>>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a prefix; rebinding keeps the original declaration position
    pub fn bind(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.uris.insert(prefix.into(), uri.into());
    }

    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.uris.get(prefix).map(String::as_str)
    }

    /// Record that an element child with `local` name is written under `prefix`
    pub fn declare_element(&mut self, prefix: impl Into<String>, local: impl Into<String>) {
        self.elements.entry(prefix.into()).or_default().insert(local.into());
    }

    /// Record that attribute `local` is written under `prefix`
    ///
    /// An attribute name lives under at most one prefix, so any earlier
    /// qualification is dropped first. An empty prefix only drops it.
    pub fn declare_attribute(&mut self, prefix: impl Into<String>, local: impl Into<String>) {
        let prefix = prefix.into();
        let local = local.into();
        self.clear_attribute(&local);
        if !prefix.is_empty() {
            self.attributes.entry(prefix).or_default().insert(local);
        }
    }

    /// Forget any prefix recorded for attribute `local`
    pub fn clear_attribute(&mut self, local: &str) {
        for names in self.attributes.values_mut() {
            names.shift_remove(local);
        }
        self.attributes.retain(|_, names| !names.is_empty());
    }

    /// First prefix whose element set contains `local`
    pub fn element_prefix(&self, local: &str) -> Option<&str> {
        first_prefix(&self.elements, local)
    }

    /// Prefix attribute `local` is written under
    pub fn attribute_prefix(&self, local: &str) -> Option<&str> {
        first_prefix(&self.attributes, local)
    }

    /// Element local names declared under `prefix`, in declaration order
    pub fn elements_under(&self, prefix: &str) -> impl Iterator<Item = &str> {
        self.elements
            .get(prefix)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Bound prefixes in declaration order
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.uris.keys().map(String::as_str)
    }

    /// `(prefix, uri)` bindings in declaration order
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.uris.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }

    pub fn has_bindings(&self) -> bool {
        !self.uris.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty() && self.elements.is_empty() && self.attributes.is_empty()
    }
}

fn first_prefix<'m>(map: &'m IndexMap<String, IndexSet<String>>, local: &str) -> Option<&'m str> {
    map.iter()
        .find(|(_, names)| names.contains(local))
        .map(|(prefix, _)| prefix.as_str())
}
