//! Deserialization Engine
//!
//! Builds a [`Document`] from a stream of [`XmlToken`]s against an explicit
//! stack of open elements. The first start tag becomes the root. Every later
//! start tag becomes a child of the element on top of the stack and is
//! attached to it when its end tag arrives, so document order is preserved.
//!
//! Any error aborts the build: no partial tree is returned.

use crate::core::scanner::is_whitespace;
use crate::dom::{Document, Node, Scalar, XmlNode};
use crate::error::{Result, XmlError};
use crate::options::{NamespaceScope, ReadOptions};
use crate::reader::{StartElement, XmlToken};
use std::borrow::Cow;

/// Pull-side source of tokens
///
/// Every `Iterator<Item = Result<XmlToken>>` is a source, so the slice reader
/// and hand-built token vectors can both drive the engine.
pub trait EventSource<'a> {
    /// Next token in document order, `Ok(None)` at end of input
    fn next_token(&mut self) -> Result<Option<XmlToken<'a>>>;
}

impl<'a, I> EventSource<'a> for I
where
    I: Iterator<Item = Result<XmlToken<'a>>>,
{
    fn next_token(&mut self) -> Result<Option<XmlToken<'a>>> {
        self.next().transpose()
    }
}

/// An element whose end tag has not been seen yet
struct Frame {
    /// Qualified name, matched against the end tag
    name: String,
    local_name: String,
    node: XmlNode,
}

/// Build a document from `source`
pub fn deserialize<'a, S: EventSource<'a>>(
    mut source: S,
    options: ReadOptions,
) -> Result<Document> {
    log::debug!("building tree with {options:?}");

    let mut declaration = None;
    let mut stack: Vec<Frame> = Vec::with_capacity(32);
    let mut finished: Option<Frame> = None;
    let mut element_count = 0usize;

    while let Some(token) = source.next_token()? {
        log::trace!("token {token:?}");

        match token {
            XmlToken::Declaration(decl) => {
                if element_count > 0 || declaration.is_some() {
                    return Err(XmlError::syntax("XML declaration must come first", 0));
                }
                declaration = Some(decl);
            }

            XmlToken::StartElement(start) => {
                if finished.is_some() {
                    return Err(XmlError::TrailingContent);
                }
                element_count += 1;
                let frame = open_element(start, stack.last_mut(), options);
                stack.push(frame);
            }

            XmlToken::EndElement(end) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| XmlError::UnbalancedEnd(end.name.to_string()))?;
                if frame.name != end.name {
                    return Err(XmlError::MismatchedTag {
                        expected: frame.name,
                        found: end.name.to_string(),
                    });
                }

                match stack.last_mut() {
                    Some(parent) => {
                        parent.node.set(frame.local_name, Node::Element(frame.node));
                    }
                    None => finished = Some(frame),
                }
            }

            XmlToken::Characters { text, cdata } => {
                let Some(top) = stack.last_mut() else {
                    if !cdata && trim_xml_whitespace(&text).is_empty() {
                        continue;
                    }
                    return Err(XmlError::TrailingContent);
                };
                append_characters(&mut top.node, text, cdata, options);
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::UnclosedElement(open.name.clone()));
    }
    let root = finished.ok_or(XmlError::NoRootElement)?;

    log::debug!("built <{}> with {} elements", root.name, element_count);

    let mut document = Document::with_root(root.name, root.node);
    document.set_declaration(declaration);
    Ok(document)
}

fn open_element(
    start: StartElement<'_>,
    parent: Option<&mut Frame>,
    options: ReadOptions,
) -> Frame {
    let mut node = XmlNode::new();

    for attr in start.attributes {
        let value = Scalar::Text(attr.value.into_owned());
        match attr.prefix {
            Some(prefix) => node.put_prefixed_attribute(prefix, attr.local_name, value),
            None => node.put_attribute(attr.name, value),
        };
    }

    match parent {
        Some(parent) => {
            let target = match options.namespace_scope {
                NamespaceScope::Declaring => &mut node,
                NamespaceScope::Parent => &mut parent.node,
            };
            for decl in start.namespaces {
                target.bind_namespace(decl.prefix.unwrap_or_default(), decl.uri.into_owned());
            }
            parent
                .node
                .declare_qualified_child(start.prefix.unwrap_or_default(), start.local_name);
        }
        None => {
            for decl in start.namespaces {
                node.bind_namespace(decl.prefix.unwrap_or_default(), decl.uri.into_owned());
            }
        }
    }

    Frame {
        name: start.name.to_string(),
        local_name: start.local_name.to_string(),
        node,
    }
}

fn append_characters(node: &mut XmlNode, text: Cow<'_, str>, cdata: bool, options: ReadOptions) {
    if cdata && options.keep_cdata {
        node.append_cdata(text.into_owned());
        return;
    }

    let text = if options.trim_text {
        trim_xml_whitespace(&text)
    } else {
        text.as_ref()
    };
    if !text.is_empty() {
        node.append_text(text);
    }
}

/// Trim the four XML whitespace characters; NBSP and other Unicode spaces are data
fn trim_xml_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_ascii() && is_whitespace(c as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{EndElement, SliceReader};

    fn build(tokens: Vec<XmlToken<'_>>) -> Result<Document> {
        deserialize(tokens.into_iter().map(Ok::<_, XmlError>), ReadOptions::default())
    }

    fn parse(input: &str) -> Result<Document> {
        deserialize(SliceReader::new(input), ReadOptions::default())
    }

    #[test]
    fn test_handcrafted_tokens() {
        let doc = build(vec![
            XmlToken::StartElement(StartElement::new("root").with_attribute("v", "1")),
            XmlToken::StartElement(StartElement::new("item")),
            XmlToken::text("  hello  "),
            XmlToken::EndElement(EndElement::new("item")),
            XmlToken::text("tail"),
            XmlToken::EndElement(EndElement::new("root")),
        ])
        .unwrap();

        assert_eq!(doc.root_name(), "root");
        assert_eq!(doc.attribute("v"), Some(&Scalar::from("1")));
        assert_eq!(doc.path("item").text().as_deref(), Some("hello"));
        assert_eq!(doc.path(1).as_scalar(), Some(&Scalar::from("tail")));
    }

    #[test]
    fn test_whitespace_only_text_dropped() {
        let doc = parse("<r>\n  <a/>\n  <b/>\n</r>").unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_untrimmed_text_kept() {
        let options = ReadOptions::default().trim_text(false);
        let doc = deserialize(SliceReader::new("<r> x </r>"), options).unwrap();
        assert_eq!(doc.text().as_deref(), Some(" x "));
    }

    #[test]
    fn test_unicode_spaces_are_text() {
        let doc = parse("<a>x&#160;</a>").unwrap();
        assert_eq!(doc.text().as_deref(), Some("x\u{a0}"));

        let doc = parse("<a>\u{2003}</a>").unwrap();
        assert_eq!(doc.text().as_deref(), Some("\u{2003}"));
        assert_eq!(doc.to_xml().unwrap(), "<a>\u{2003}</a>");

        let doc = parse("<a>\t x \r\n</a>").unwrap();
        assert_eq!(doc.text().as_deref(), Some("x"));
    }

    #[test]
    fn test_unicode_space_outside_root_is_content() {
        assert!(parse("\n<a/>\r\n").is_ok());
        assert!(matches!(parse("<a/>\u{a0}"), Err(XmlError::TrailingContent)));
    }

    #[test]
    fn test_cdata_kept_or_flattened() {
        let doc = parse("<r><![CDATA[ <b> ]]></r>").unwrap();
        assert_eq!(doc.path(0).as_scalar(), Some(&Scalar::CData(" <b> ".into())));

        let options = ReadOptions::default().keep_cdata(false);
        let doc = deserialize(SliceReader::new("<r><![CDATA[ <b> ]]></r>"), options).unwrap();
        assert_eq!(doc.path(0).as_scalar(), Some(&Scalar::from("<b>")));
    }

    #[test]
    fn test_prefixed_names_recorded_on_parent() {
        let doc = parse("<r xmlns:p=\"urn:p\"><p:a p:k=\"v\"/><b/></r>").unwrap();
        assert_eq!(doc.element_prefix("a"), Some("p"));
        assert_eq!(doc.element_prefix("b"), Some(""));
        let a = doc.path("a").as_element().unwrap();
        assert_eq!(a.attribute_prefix("k"), Some("p"));
        assert_eq!(a.attribute("k"), Some(&Scalar::from("v")));
    }

    #[test]
    fn test_namespace_scope() {
        let input = "<r><c xmlns:n=\"urn:n\"><n:e/></c></r>";

        let declaring = parse(input).unwrap();
        assert_eq!(declaring.lookup_namespace_uri("n"), None);
        let c = declaring.path("c").as_element().unwrap();
        assert_eq!(c.lookup_namespace_uri("n"), Some("urn:n"));
        assert_eq!(c.resolve_element_namespace("e"), Some("urn:n"));

        let options = ReadOptions::default().namespace_scope(NamespaceScope::Parent);
        let parent = deserialize(SliceReader::new(input), options).unwrap();
        assert_eq!(parent.lookup_namespace_uri("n"), Some("urn:n"));
        let c = parent.path("c").as_element().unwrap();
        assert_eq!(c.lookup_namespace_uri("n"), None);
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(parse("<a></b>"), Err(XmlError::MismatchedTag { .. })));
        assert!(matches!(parse("</a>"), Err(XmlError::UnbalancedEnd(_))));
        assert!(matches!(parse("<a><b></b>"), Err(XmlError::UnclosedElement(name)) if name == "a"));
        assert!(matches!(parse(""), Err(XmlError::NoRootElement)));
        assert!(matches!(parse("<!-- only -->"), Err(XmlError::NoRootElement)));
        assert!(matches!(parse("<a/><b/>"), Err(XmlError::TrailingContent)));
        assert!(matches!(parse("<a/>text"), Err(XmlError::TrailingContent)));
        assert!(matches!(parse("text<a/>"), Err(XmlError::TrailingContent)));
    }

    #[test]
    fn test_read_error_is_fatal() {
        let tokens = vec![
            Ok(XmlToken::StartElement(StartElement::new("a"))),
            Err(XmlError::UnexpectedEof { position: 3 }),
            Ok(XmlToken::EndElement(EndElement::new("a"))),
        ];
        let result = deserialize(tokens.into_iter(), ReadOptions::default());
        assert!(matches!(result, Err(XmlError::UnexpectedEof { position: 3 })));
    }
}
