//! Scalar leaf payloads
//!
//! A `Scalar` is what a leaf node or an attribute holds. It keeps the type it
//! was created with so the writer can render numbers, booleans and binary
//! data in their literal lexical form instead of a lossy string.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::borrow::Cow;
use std::fmt;

/// A typed scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// Character data, escaped on output
    Text(String),
    /// Bytes, written as base64
    Binary(Vec<u8>),
    /// Markup written verbatim
    Raw(String),
    /// Character data written as a CDATA section
    CData(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Borrow the string payload of `Text`, `Raw` or `CData`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) | Scalar::Raw(s) | Scalar::CData(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view; text is parsed since parsed documents only carry text
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            Scalar::UInt(u) => i64::try_from(*u).ok(),
            _ => self.as_str()?.trim().parse().ok(),
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Int(i) => u64::try_from(*i).ok(),
            Scalar::UInt(u) => Some(*u),
            _ => self.as_str()?.trim().parse().ok(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::UInt(u) => Some(*u as f64),
            Scalar::Float(f) => Some(*f),
            _ => self.as_str()?.trim().parse().ok(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => match self.as_str()?.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
        }
    }

    /// Binary view; text is decoded as base64
    pub fn as_bytes(&self) -> Option<Cow<'_, [u8]>> {
        match self {
            Scalar::Binary(bytes) => Some(Cow::Borrowed(bytes)),
            _ => STANDARD.decode(self.as_str()?.trim()).ok().map(Cow::Owned),
        }
    }

    /// Lexical form as written to XML, before escaping
    pub fn to_lexical(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(s) | Scalar::Raw(s) | Scalar::CData(s) => Cow::Borrowed(s),
            Scalar::Null => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::UInt(u) => write!(f, "{u}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) | Scalar::Raw(s) | Scalar::CData(s) => f.write_str(s),
            Scalar::Binary(bytes) => f.write_str(&STANDARD.encode(bytes)),
        }
    }
}

macro_rules! scalar_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v.into())
                }
            }
        )+
    };
}

scalar_from!(Bool: bool);
scalar_from!(Int: i8, i16, i32, i64, u8, u16, u32);
scalar_from!(UInt: u64);
scalar_from!(Float: f32, f64);
scalar_from!(Text: &str, String, &String);
scalar_from!(Binary: Vec<u8>, &[u8]);

impl From<usize> for Scalar {
    fn from(v: usize) -> Self {
        Scalar::UInt(v as u64)
    }
}

impl From<isize> for Scalar {
    fn from(v: isize) -> Self {
        Scalar::Int(v as i64)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}
