//! Zero-Copy Slice Reader
//!
//! Turns tokenizer output over a `&str` into `XmlToken`s. Names and
//! entity-free text are borrowed straight from the input.

use super::events::{EndElement, StartElement, XmlDeclaration, XmlToken};
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::Result;
use std::borrow::Cow;

/// Zero-copy XML reader over a string slice
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
    /// End half of an empty-element tag, handed out on the next pull
    pending_end: Option<&'a str>,
    /// Set once the input is exhausted or an error was returned
    done: bool,
}

impl<'a> SliceReader<'a> {
    pub fn new(input: &'a str) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new(input),
            pending_end: None,
            done: false,
        }
    }

    /// Byte offset of the tokenizer
    pub fn position(&self) -> usize {
        self.tokenizer.position()
    }

    /// Get the next XML token, `Ok(None)` at end of input
    ///
    /// Comments, processing instructions and DOCTYPE are skipped.
    pub fn next_event(&mut self) -> Result<Option<XmlToken<'a>>> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Some(XmlToken::EndElement(EndElement::new(name))));
        }

        loop {
            let Some(token) = self.tokenizer.next_token()? else {
                return Ok(None);
            };

            match token.kind {
                TokenKind::StartTag => return Ok(Some(Self::start_element(&token)?)),

                TokenKind::EmptyTag => {
                    let start = Self::start_element(&token)?;
                    self.pending_end = token.name;
                    return Ok(Some(start));
                }

                TokenKind::EndTag => {
                    if let Some(name) = token.name {
                        return Ok(Some(XmlToken::EndElement(EndElement::new(name))));
                    }
                }

                TokenKind::Text => {
                    if let Some(text) = token.content {
                        return Ok(Some(XmlToken::Characters { text, cdata: false }));
                    }
                }

                TokenKind::CData => {
                    if let Some(text) = token.content {
                        return Ok(Some(XmlToken::Characters { text, cdata: true }));
                    }
                }

                TokenKind::XmlDeclaration => {
                    return Ok(Some(XmlToken::Declaration(Self::declaration(&token)?)));
                }

                TokenKind::Comment | TokenKind::ProcessingInstruction | TokenKind::DocType => {
                    log::trace!("skipping {:?} at byte {}", token.kind, token.span.0);
                }
            }
        }
    }

    fn start_element(token: &Token<'a>) -> Result<XmlToken<'a>> {
        let attrs = token.parse_attributes()?;
        let name = token.name.unwrap_or_default();
        Ok(XmlToken::StartElement(StartElement::from_attributes(name, attrs)))
    }

    fn declaration(token: &Token<'a>) -> Result<XmlDeclaration> {
        let attrs = token.parse_attributes()?;
        let value = |name: &str| {
            attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.clone())
        };

        Ok(XmlDeclaration {
            version: value("version").unwrap_or(Cow::Borrowed("1.0")).into_owned(),
            encoding: value("encoding").map(Cow::into_owned),
            standalone: value("standalone").map(|v| v == "yes"),
        })
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = Result<XmlToken<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_event().transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

/// Read every token from a string slice
pub fn parse_events(input: &str) -> Result<Vec<XmlToken<'_>>> {
    SliceReader::new(input).collect()
}
