//! XML Attribute Parsing
//!
//! Parses XML attributes from tag content.

use super::entities::decode_text;
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use crate::error::{Result, XmlError};
use memchr::memchr;
use std::borrow::Cow;

/// A parsed XML attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    /// Attribute name (may include namespace prefix)
    pub name: &'a str,
    /// Local name (after colon, if namespaced)
    pub local_name: &'a str,
    /// Namespace prefix (before colon), if any
    pub prefix: Option<&'a str>,
    /// Attribute value (entities decoded)
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    /// Create a new attribute
    pub fn new(name: &'a str, value: Cow<'a, str>) -> Self {
        let (prefix, local_name) = split_name(name);
        Attribute {
            name,
            local_name,
            prefix,
            value,
        }
    }

    /// `xmlns` or `xmlns:p`
    pub fn is_namespace_declaration(&self) -> bool {
        self.name == "xmlns" || self.prefix == Some("xmlns")
    }
}

/// Split a name into prefix and local name at the colon
pub fn split_name(name: &str) -> (Option<&str>, &str) {
    match memchr(b':', name.as_bytes()) {
        Some(colon_pos) => (Some(&name[..colon_pos]), &name[colon_pos + 1..]),
        None => (None, name),
    }
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input should be the content between element name and '>' or '/>'.
/// `offset` is the byte position of `input` in the document, used for
/// error reporting.
pub fn parse_attributes(input: &str, offset: usize) -> Result<Vec<Attribute<'_>>> {
    let bytes = input.as_bytes();
    let mut attrs: Vec<Attribute<'_>> = Vec::new();
    let mut pos = 0;

    loop {
        let had_whitespace = pos < bytes.len() && is_whitespace(bytes[pos]);
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        if pos >= bytes.len() {
            break;
        }

        if !had_whitespace {
            return Err(XmlError::syntax(
                "attributes must be separated by whitespace",
                offset + pos,
            ));
        }

        // Parse attribute name
        let name_start = pos;
        if !is_name_start_char(bytes[pos]) {
            return Err(XmlError::syntax(
                "attribute name must start with letter, underscore, or colon",
                offset + pos,
            ));
        }
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        // Skip whitespace around '='
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'=') {
            return Err(XmlError::syntax(
                format!("attribute '{name}' has no value"),
                offset + pos,
            ));
        }
        pos += 1;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        // Parse attribute value
        let quote = match bytes.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(XmlError::syntax(
                    format!("value of attribute '{name}' must be quoted"),
                    offset + pos,
                ))
            }
        };
        pos += 1;
        let value_start = pos;
        let value_end = match memchr(quote, &bytes[pos..]) {
            Some(len) => pos + len,
            None => {
                return Err(XmlError::syntax(
                    format!("value of attribute '{name}' has mismatched quotes"),
                    offset + value_start,
                ))
            }
        };

        let raw_value = &input[value_start..value_end];
        if let Some(lt) = memchr(b'<', raw_value.as_bytes()) {
            return Err(XmlError::syntax(
                "attribute value cannot contain '<'",
                offset + value_start + lt,
            ));
        }

        if attrs.iter().any(|a| a.name == name) {
            return Err(XmlError::syntax(
                format!("duplicate attribute '{name}'"),
                offset + name_start,
            ));
        }

        // Character references are exempt from normalization
        let value = match normalize_value(raw_value) {
            Cow::Borrowed(raw) => decode_text(raw),
            Cow::Owned(normalized) => Cow::Owned(decode_text(&normalized).into_owned()),
        };
        attrs.push(Attribute::new(name, value));
        pos = value_end + 1;
    }

    Ok(attrs)
}

/// Attribute value normalization: literal tabs and line breaks read as spaces
fn normalize_value(value: &str) -> Cow<'_, str> {
    if value.bytes().any(|b| matches!(b, b'\t' | b'\n' | b'\r')) {
        Cow::Owned(value.replace("\r\n", " ").replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
