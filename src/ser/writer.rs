//! XML text writer
//!
//! An [`EventSink`] that renders serialization calls into a `String`. A start
//! tag stays open until content arrives, so attributes can still be added and
//! an element that never receives content is written self-closed.

use super::EventSink;
use crate::core::entities::{encode_attribute, encode_cdata, encode_text};
use crate::dom::Scalar;
use crate::error::{Result, XmlError};
use crate::options::WriteOptions;
use crate::reader::XmlDeclaration;

/// Writer producing XML text
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    options: WriteOptions,
    /// Names of the open elements, innermost last
    open: Vec<String>,
    /// Name given by `field_name` and not yet consumed
    pending_name: Option<String>,
    /// The innermost start tag still lacks its closing `>`
    tag_open: bool,
    attribute_mode: bool,
    unwrapped_text: bool,
    /// Anything besides a declaration has been written
    started: bool,
    wrote_declaration: bool,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: WriteOptions) -> Self {
        XmlWriter {
            options,
            buf: String::with_capacity(1024),
            ..Self::default()
        }
    }

    /// Output written so far
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Finish writing and return the output; fails while elements are still open
    pub fn finish(self) -> Result<String> {
        match self.open.last() {
            Some(name) => Err(XmlError::Write(format!("element <{name}> was never closed"))),
            None => Ok(self.buf),
        }
    }

    fn take_name(&mut self, what: &str) -> Result<String> {
        self.pending_name
            .take()
            .ok_or_else(|| XmlError::Write(format!("{what} without a field name")))
    }

    /// Close a pending start tag before content is written
    fn close_start_tag(&mut self) {
        if self.tag_open {
            self.buf.push('>');
            self.tag_open = false;
        }
    }

    /// Emit the forced declaration ahead of the first element
    fn begin_element(&mut self) -> Result<()> {
        if self.open.is_empty() && self.started {
            return Err(XmlError::Write("a document has exactly one root element".into()));
        }
        if !self.started {
            if self.options.xml_declaration && !self.wrote_declaration {
                self.push_declaration(&XmlDeclaration::default());
            }
            self.started = true;
        }
        Ok(())
    }

    fn push_declaration(&mut self, declaration: &XmlDeclaration) {
        self.buf.push_str("<?xml version=\"");
        self.buf.push_str(&declaration.version);
        self.buf.push('"');
        if let Some(encoding) = &declaration.encoding {
            self.buf.push_str(" encoding=\"");
            self.buf.push_str(encoding);
            self.buf.push('"');
        }
        if let Some(standalone) = declaration.standalone {
            self.buf.push_str(if standalone {
                " standalone=\"yes\""
            } else {
                " standalone=\"no\""
            });
        }
        self.buf.push_str("?>");
        self.wrote_declaration = true;
    }

    /// Character data for element content
    fn push_text(&mut self, value: &Scalar) {
        match value {
            Scalar::Null => {}
            Scalar::Raw(raw) => self.buf.push_str(raw),
            Scalar::CData(text) => self.buf.push_str(&encode_cdata(text)),
            Scalar::Text(text) => self.buf.push_str(&encode_text(text)),
            other => self.buf.push_str(&encode_text(&other.to_lexical())),
        }
    }
}

impl EventSink for XmlWriter {
    fn write_declaration(&mut self, declaration: &XmlDeclaration) -> Result<()> {
        if self.started || self.wrote_declaration {
            return Err(XmlError::Write("declaration must come first".into()));
        }
        self.push_declaration(declaration);
        Ok(())
    }

    fn field_name(&mut self, name: &str) -> Result<()> {
        if let Some(unused) = &self.pending_name {
            return Err(XmlError::Write(format!("field name '{unused}' was never used")));
        }
        self.pending_name = Some(name.to_string());
        Ok(())
    }

    fn start_container(&mut self) -> Result<()> {
        if self.attribute_mode || self.unwrapped_text {
            return Err(XmlError::Write("cannot start an element in attribute or text mode".into()));
        }
        let name = self.take_name("element")?;
        self.begin_element()?;
        self.close_start_tag();

        self.buf.push('<');
        self.buf.push_str(&name);
        self.tag_open = true;
        self.open.push(name);
        Ok(())
    }

    fn end_container(&mut self) -> Result<()> {
        let name = self
            .open
            .pop()
            .ok_or_else(|| XmlError::Write("no open element to end".into()))?;

        if self.tag_open {
            self.buf.push_str("/>");
            self.tag_open = false;
        } else {
            self.buf.push_str("</");
            self.buf.push_str(&name);
            self.buf.push('>');
        }
        Ok(())
    }

    fn set_attribute_mode(&mut self, enabled: bool) -> Result<()> {
        if enabled && !self.tag_open {
            return Err(XmlError::Write("attributes must precede element content".into()));
        }
        self.attribute_mode = enabled;
        Ok(())
    }

    fn set_unwrapped_text_mode(&mut self, enabled: bool) -> Result<()> {
        self.unwrapped_text = enabled;
        Ok(())
    }

    fn write_scalar(&mut self, value: &Scalar) -> Result<()> {
        if self.attribute_mode {
            let name = self.take_name("attribute")?;
            if !self.tag_open {
                return Err(XmlError::Write(format!("attribute '{name}' after element content")));
            }
            self.buf.push(' ');
            self.buf.push_str(&name);
            self.buf.push_str("=\"");
            match value {
                Scalar::Raw(raw) => self.buf.push_str(raw),
                other => self.buf.push_str(&encode_attribute(&other.to_lexical())),
            }
            self.buf.push('"');
            return Ok(());
        }

        if self.unwrapped_text {
            if self.open.is_empty() {
                return Err(XmlError::Write("text outside of the root element".into()));
            }
            self.close_start_tag();
            self.push_text(value);
            return Ok(());
        }

        let name = self.take_name("value")?;
        self.begin_element()?;
        self.close_start_tag();
        self.buf.push('<');
        self.buf.push_str(&name);
        if value.is_null() {
            self.buf.push_str("/>");
        } else {
            self.buf.push('>');
            self.push_text(value);
            self.buf.push_str("</");
            self.buf.push_str(&name);
            self.buf.push('>');
        }
        Ok(())
    }
}
