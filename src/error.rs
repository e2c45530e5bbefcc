//! Error types
//!
//! Every failure while reading or writing is terminal for that call: the
//! engines never resynchronize and never hand back a partial tree. Lookup
//! misses are not errors at all, they surface as `None` or `Node::Missing`.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, XmlError>;

/// Error raised by the reader, the deserializer, the writer or the value codec
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed markup reported by the tokenizer
    #[error("syntax error at byte {position}: {message}")]
    Syntax { message: String, position: usize },

    /// Input ended inside a tag, comment, CDATA section or declaration
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof { position: usize },

    /// End tag name does not match the open element
    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },

    /// End tag with no open element
    #[error("unbalanced end tag </{0}>")]
    UnbalancedEnd(String),

    /// Input ended while elements were still open
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    /// Input contained no element at all
    #[error("document has no root element")]
    NoRootElement,

    /// Element or text found before the root element opened or after it closed
    #[error("content outside the root element")]
    TrailingContent,

    /// Input bytes could not be decoded
    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The event sink was driven in an order it cannot express
    #[error("write error: {0}")]
    Write(String),

    /// Value codec failure
    #[error("value codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl XmlError {
    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        XmlError::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Byte offset into the input, when the error is tied to one
    pub fn position(&self) -> Option<usize> {
        match self {
            XmlError::Syntax { position, .. } | XmlError::UnexpectedEof { position } => {
                Some(*position)
            }
            _ => None,
        }
    }
}
