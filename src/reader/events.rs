//! XML Token Types
//!
//! The pull-side vocabulary consumed by the deserializer. Anything that
//! yields these tokens in document order can drive tree construction.

use crate::core::attributes::{split_name, Attribute};
use std::borrow::Cow;

/// A token pulled from an XML event source
#[derive(Debug, Clone, PartialEq)]
pub enum XmlToken<'a> {
    /// Leading `<?xml ...?>` declaration
    Declaration(XmlDeclaration),
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement(EndElement<'a>),
    /// Character data, `cdata` set when it came from a CDATA section
    Characters { text: Cow<'a, str>, cdata: bool },
}

impl<'a> XmlToken<'a> {
    /// Plain character data
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        XmlToken::Characters {
            text: text.into(),
            cdata: false,
        }
    }

    /// Character data from a CDATA section
    pub fn cdata(text: impl Into<Cow<'a, str>>) -> Self {
        XmlToken::Characters {
            text: text.into(),
            cdata: true,
        }
    }
}

/// The XML declaration's pseudo-attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        XmlDeclaration {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// A namespace declaration carried on a start tag
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl<'a> {
    /// Declared prefix, `None` for a default namespace (`xmlns="..."`)
    pub prefix: Option<&'a str>,
    pub uri: Cow<'a, str>,
}

/// Start element event data
#[derive(Debug, Clone, PartialEq)]
pub struct StartElement<'a> {
    /// Full element name (may include prefix)
    pub name: &'a str,
    /// Local name (after colon)
    pub local_name: &'a str,
    /// Namespace prefix (before colon), if any
    pub prefix: Option<&'a str>,
    /// Element attributes, namespace declarations excluded
    pub attributes: Vec<Attribute<'a>>,
    /// `xmlns` / `xmlns:p` declarations in source order
    pub namespaces: Vec<NamespaceDecl<'a>>,
}

impl<'a> StartElement<'a> {
    /// Create a start element with no attributes
    pub fn new(name: &'a str) -> Self {
        let (prefix, local_name) = split_name(name);
        StartElement {
            name,
            local_name,
            prefix,
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Create a start element, splitting namespace declarations out of the attributes
    pub fn from_attributes(name: &'a str, attrs: Vec<Attribute<'a>>) -> Self {
        let mut element = StartElement::new(name);
        for attr in attrs {
            if !attr.is_namespace_declaration() {
                element.attributes.push(attr);
                continue;
            }
            // `xmlns` has no prefix; `xmlns:p` declares `p`
            let prefix = attr.prefix.map(|_| attr.local_name);
            element.namespaces.push(NamespaceDecl {
                prefix,
                uri: attr.value,
            });
        }
        element
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        self.attributes.push(Attribute::new(name, value.into()));
        self
    }

    /// Add a namespace declaration; an empty prefix declares the default namespace
    pub fn with_namespace(mut self, prefix: &'a str, uri: impl Into<Cow<'a, str>>) -> Self {
        self.namespaces.push(NamespaceDecl {
            prefix: (!prefix.is_empty()).then_some(prefix),
            uri: uri.into(),
        });
        self
    }

    /// Get attribute value by full name
    pub fn get_attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_ref())
    }
}

/// End element event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndElement<'a> {
    /// Full element name (may include prefix)
    pub name: &'a str,
}

impl<'a> EndElement<'a> {
    pub fn new(name: &'a str) -> Self {
        EndElement { name }
    }
}
