//! XML Tokenizer - pull-style token extraction
//!
//! Extracts XML tokens from a `&str`:
//! - Element start/end/empty tags
//! - Text content
//! - CDATA sections
//! - Comments
//! - Processing instructions and the XML declaration
//! - DOCTYPE (skipped as a single token, never validated)
//!
//! The tokenizer is fail-fast: the first malformed construct is returned as
//! an error and the tokenizer should not be polled again afterwards.

use super::attributes::{parse_attributes, Attribute};
use super::entities::decode_text;
use super::scanner::Scanner;
use crate::error::{Result, XmlError};
use std::borrow::Cow;

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
}

/// A parsed XML token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// For tags: the element name. For PIs: the target
    pub name: Option<&'a str>,
    /// For text/cdata/comments/PIs: the content (owned if entities were decoded)
    pub content: Option<Cow<'a, str>>,
    /// For start/empty tags and the declaration: the raw attribute region
    pub attrs: Option<&'a str>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
            attrs: None,
        }
    }

    fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: Cow<'a, str>) -> Self {
        self.content = Some(content);
        self
    }

    fn with_attrs(mut self, attrs: &'a str) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Parse the raw attribute region of a tag or declaration
    pub fn parse_attributes(&self) -> Result<Vec<Attribute<'a>>> {
        match self.attrs {
            // The region starts right after `<name` (or `<?name`)
            Some(region) => {
                let lead = if self.kind == TokenKind::XmlDeclaration { 2 } else { 1 };
                let offset = self.span.0 + lead + self.name.map_or(0, str::len);
                parse_attributes(region, offset)
            }
            None => Ok(Vec::new()),
        }
    }
}

const BOM: &str = "\u{FEFF}";

/// XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    /// Offset of the first byte after an optional byte order mark
    content_start: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer; a leading byte order mark is skipped
    pub fn new(input: &'a str) -> Self {
        let mut scanner = Scanner::new(input);
        let content_start = if input.starts_with(BOM) { BOM.len() } else { 0 };
        scanner.set_position(content_start);
        Tokenizer {
            scanner,
            content_start,
        }
    }

    /// Current byte offset into the input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, `Ok(None)` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        if self.scanner.is_eof() {
            return Ok(None);
        }

        let token = if self.scanner.peek() == Some(b'<') {
            self.read_markup()?
        } else {
            self.read_text()
        };
        Ok(Some(token))
    }

    fn read_text(&mut self) -> Token<'a> {
        let start = self.scanner.position();
        let end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
        self.scanner.set_position(end);

        let text = decode_text(self.scanner.slice(start, end));
        Token::new(TokenKind::Text, (start, end)).with_content(text)
    }

    fn read_markup(&mut self) -> Result<Token<'a>> {
        let start = self.scanner.position();

        match self.scanner.peek_at(1) {
            Some(b'/') => self.read_end_tag(start),
            Some(b'?') => self.read_processing_instruction(start),
            Some(b'!') => {
                if self.scanner.starts_with(b"<!--") {
                    self.read_comment(start)
                } else if self.scanner.starts_with(b"<![CDATA[") {
                    self.read_cdata(start)
                } else if self.scanner.starts_with(b"<!DOCTYPE") {
                    self.read_doctype(start)
                } else {
                    Err(XmlError::syntax("unrecognized markup declaration", start))
                }
            }
            Some(_) => self.read_start_tag(start),
            None => Err(XmlError::UnexpectedEof { position: start + 1 }),
        }
    }

    fn read_start_tag(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(1);
        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| XmlError::syntax("invalid element name", start + 1))?;

        let name_end = self.scanner.position();
        let gt = self
            .scanner
            .find_tag_end_quoted()
            .ok_or(XmlError::UnexpectedEof { position: self.scanner.len() })?;
        self.scanner.set_position(gt + 1);

        let region = self.scanner.slice(name_end, gt);
        let (kind, region) = match region.strip_suffix('/') {
            Some(inner) => (TokenKind::EmptyTag, inner),
            None => (TokenKind::StartTag, region),
        };

        Ok(Token::new(kind, (start, gt + 1)).with_name(name).with_attrs(region))
    }

    fn read_end_tag(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(2);
        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| XmlError::syntax("invalid end tag name", start + 2))?;
        self.scanner.skip_whitespace();

        match self.scanner.peek() {
            Some(b'>') => {
                self.scanner.advance(1);
                Ok(Token::new(TokenKind::EndTag, (start, self.scanner.position())).with_name(name))
            }
            Some(_) => Err(XmlError::syntax(
                format!("unexpected content in end tag </{name}>"),
                self.scanner.position(),
            )),
            None => Err(XmlError::UnexpectedEof { position: self.scanner.position() }),
        }
    }

    fn read_comment(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(4);
        let body_start = self.scanner.position();
        let end = self
            .scanner
            .find_sequence(b"-->")
            .ok_or(XmlError::UnexpectedEof { position: self.scanner.len() })?;
        self.scanner.set_position(end + 3);

        Ok(Token::new(TokenKind::Comment, (start, end + 3))
            .with_content(Cow::Borrowed(self.scanner.slice(body_start, end))))
    }

    fn read_cdata(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(9);
        let body_start = self.scanner.position();
        let end = self
            .scanner
            .find_sequence(b"]]>")
            .ok_or(XmlError::UnexpectedEof { position: self.scanner.len() })?;
        self.scanner.set_position(end + 3);

        // CDATA content is never entity-decoded
        Ok(Token::new(TokenKind::CData, (start, end + 3))
            .with_content(Cow::Borrowed(self.scanner.slice(body_start, end))))
    }

    fn read_processing_instruction(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(2);
        let target = self
            .scanner
            .read_name()
            .ok_or_else(|| XmlError::syntax("processing instruction without target", start + 2))?;
        let body_start = self.scanner.position();
        let end = self
            .scanner
            .find_sequence(b"?>")
            .ok_or(XmlError::UnexpectedEof { position: self.scanner.len() })?;
        self.scanner.set_position(end + 2);

        let body = self.scanner.slice(body_start, end);
        if target.eq_ignore_ascii_case("xml") {
            if target != "xml" || start != self.content_start {
                return Err(XmlError::syntax(
                    "XML declaration is only allowed at the start of the document",
                    start,
                ));
            }
            return Ok(Token::new(TokenKind::XmlDeclaration, (start, end + 2))
                .with_name(target)
                .with_attrs(body));
        }

        Ok(Token::new(TokenKind::ProcessingInstruction, (start, end + 2))
            .with_name(target)
            .with_content(Cow::Borrowed(body.trim_start())))
    }

    /// Skip `<!DOCTYPE ...>` including a bracketed internal subset
    fn read_doctype(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(9);
        let body_start = self.scanner.position();
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        while let Some(b) = self.scanner.peek() {
            match (b, quote) {
                (q @ (b'"' | b'\''), None) => quote = Some(q),
                (b, Some(q)) if b == q => quote = None,
                (b'[', None) => depth += 1,
                (b']', None) => depth = depth.saturating_sub(1),
                (b'>', None) if depth == 0 => {
                    let end = self.scanner.position();
                    self.scanner.advance(1);
                    return Ok(Token::new(TokenKind::DocType, (start, end + 1))
                        .with_content(Cow::Borrowed(self.scanner.slice(body_start, end).trim())));
                }
                _ => {}
            }
            self.scanner.advance(1);
        }

        Err(XmlError::UnexpectedEof { position: self.scanner.len() })
    }
}
