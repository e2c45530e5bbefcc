//! Documents
//!
//! A `Document` is a root element plus what the root element's map cannot
//! hold about itself: its qualified name and the optional leading XML
//! declaration.

use super::node::XmlNode;
use crate::error::Result;
use crate::options::{ReadOptions, WriteOptions};
use crate::reader::{SliceReader, XmlDeclaration};
use crate::ser::XmlWriter;
use std::ops::{Deref, DerefMut};

/// A parsed or hand-built XML document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Qualified root element name, e.g. `soap:Envelope`
    root_name: String,
    root: XmlNode,
    declaration: Option<XmlDeclaration>,
}

impl Document {
    /// Create a document with an empty root element
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_root(root_name, XmlNode::new())
    }

    pub fn with_root(root_name: impl Into<String>, root: XmlNode) -> Self {
        Document {
            root_name: root_name.into(),
            root,
            declaration: None,
        }
    }

    /// Parse a document with default options
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, ReadOptions::default())
    }

    pub fn parse_with(input: &str, options: ReadOptions) -> Result<Self> {
        crate::de::deserialize(SliceReader::new(input), options)
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn set_root_name(&mut self, name: impl Into<String>) {
        self.root_name = name.into();
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlNode {
        &mut self.root
    }

    pub fn into_root(self) -> XmlNode {
        self.root
    }

    pub fn declaration(&self) -> Option<&XmlDeclaration> {
        self.declaration.as_ref()
    }

    pub fn set_declaration(&mut self, declaration: Option<XmlDeclaration>) {
        self.declaration = declaration;
    }

    /// Serialize with default options
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(WriteOptions::default())
    }

    pub fn to_xml_with(&self, options: WriteOptions) -> Result<String> {
        let mut writer = XmlWriter::with_options(options);
        self.serialize(&mut writer)?;
        writer.finish()
    }
}

impl Deref for Document {
    type Target = XmlNode;

    fn deref(&self) -> &XmlNode {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut XmlNode {
        &mut self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_write() {
        let mut doc = Document::new("dog");
        doc.put_attribute("name", "Buddy").put_attribute("age", 5);
        assert_eq!(doc.to_xml().unwrap(), "<dog name=\"Buddy\" age=\"5\"/>");
    }

    #[test]
    fn test_parse_keeps_declaration() {
        let doc = Document::parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?><r>x</r>").unwrap();
        assert_eq!(doc.root_name(), "r");
        assert_eq!(doc.declaration(), Some(&XmlDeclaration::default()));
        assert_eq!(
            doc.to_xml().unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><r>x</r>"
        );
    }

    #[test]
    fn test_rename_root() {
        let mut doc = Document::parse("<a><b/></a>").unwrap();
        doc.set_root_name("z");
        assert_eq!(doc.to_xml().unwrap(), "<z><b/></z>");
        assert!(doc.into_root().has("b"));
    }
}
