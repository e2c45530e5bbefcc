//! XML Entity Decoding and Encoding
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! and the reverse escaping used by the writer.
//!
//! Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode text content, handling entity references
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if there are any entities using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    // Slow path: decode entities
    Cow::Owned(decode_entities(input))
}

/// Decode all entity references in the input
///
/// Unknown entities and stray ampersands are kept as written.
pub fn decode_entities(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp_offset) = memchr(b'&', &bytes[pos..]) {
        // Copy everything before the entity
        let amp = pos + amp_offset;
        result.push_str(&input[pos..amp]);

        let decoded = memchr(b';', &bytes[amp..])
            .and_then(|semi| decode_entity(&input[amp + 1..amp + semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                result.push(c);
                pos = amp + semi + 1;
            }
            None => {
                result.push('&');
                pos = amp + 1;
            }
        }
    }

    // No more entities, copy the rest
    result.push_str(&input[pos..]);
    result
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        return decode_numeric_entity(numeric);
    }

    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// Decode a numeric character reference
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let hex = entity.strip_prefix('x').or_else(|| entity.strip_prefix('X'));
    let codepoint = match hex {
        // Hexadecimal: &#xHHHH;
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        // Decimal: &#DDDD;
        None => entity.parse::<u32>().ok()?,
    };

    if !is_valid_xml_char(codepoint) {
        return None;
    }
    char::from_u32(codepoint)
}

/// Check if a code point is a valid XML 1.0 Char
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}

/// Encode character data for element content
pub fn encode_text(input: &str) -> Cow<'_, str> {
    encode_with(input, |b| matches!(b, b'<' | b'>' | b'&'))
}

/// Encode text for use in a double-quoted attribute value
///
/// Tabs and line breaks become character references so attribute value
/// normalization on the way back in does not turn them into spaces.
pub fn encode_attribute(input: &str) -> Cow<'_, str> {
    encode_with(input, |b| {
        matches!(b, b'<' | b'>' | b'&' | b'"' | b'\t' | b'\n' | b'\r')
    })
}

fn encode_with(input: &str, needs_escape: impl Fn(u8) -> bool) -> Cow<'_, str> {
    // Fast path: check if any escaping needed
    if !input.bytes().any(&needs_escape) {
        return Cow::Borrowed(input);
    }

    // Slow path: escape
    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' if needs_escape(b'"') => result.push_str("&quot;"),
            '\t' if needs_escape(b'\t') => result.push_str("&#9;"),
            '\n' if needs_escape(b'\n') => result.push_str("&#10;"),
            '\r' if needs_escape(b'\r') => result.push_str("&#13;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Wrap text in a CDATA section, splitting any embedded `]]>`
pub fn encode_cdata(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 12);
    result.push_str("<![CDATA[");
    result.push_str(&input.replace("]]>", "]]]]><![CDATA[>"));
    result.push_str("]]>");
    result
}
