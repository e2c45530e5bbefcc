//! Input Encoding Detection and Decoding
//!
//! Detects UTF-16 input from its byte order mark or from the byte pattern of
//! a leading `<`, and decodes everything to a UTF-8 `String`.

use crate::error::{Result, XmlError};

/// Encoding of raw XML input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        match input {
            [0xFF, 0xFE, ..] | [b'<', 0x00, ..] => XmlEncoding::Utf16Le,
            [0xFE, 0xFF, ..] | [0x00, b'<', ..] => XmlEncoding::Utf16Be,
            _ => XmlEncoding::Utf8,
        }
    }
}

/// Decode raw input bytes into a `String`
///
/// A UTF-8 byte order mark is stripped. UTF-16 input in either byte order
/// is transcoded.
pub fn decode_input(input: Vec<u8>) -> Result<String> {
    match XmlEncoding::detect(&input) {
        XmlEncoding::Utf8 => {
            let mut bytes = input;
            if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
                bytes.drain(..3);
            }
            String::from_utf8(bytes).map_err(|e| {
                let at = e.utf8_error().valid_up_to();
                XmlError::Encoding(format!("invalid UTF-8 at byte {at}"))
            })
        }
        XmlEncoding::Utf16Le => decode_utf16(&input, [0xFF, 0xFE], u16::from_le_bytes, "LE"),
        XmlEncoding::Utf16Be => decode_utf16(&input, [0xFE, 0xFF], u16::from_be_bytes, "BE"),
    }
}

fn decode_utf16(
    input: &[u8],
    bom: [u8; 2],
    unit: fn([u8; 2]) -> u16,
    label: &str,
) -> Result<String> {
    let bytes = input.strip_prefix(&bom[..]).unwrap_or(input);

    if bytes.len() % 2 != 0 {
        return Err(XmlError::Encoding(format!("invalid UTF-16 {label}: odd number of bytes")));
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units)
        .map_err(|e| XmlError::Encoding(format!("invalid UTF-16 {label}: {e}")))
}
