//! Tagged attribute values as they travel on the wire.
//!
//! Every value is a single-key JSON object naming its type, e.g. `{"S":"x"}`
//! or `{"N":"42"}`. Numbers stay string-encoded so no precision is lost, and
//! binary payloads are base64 in JSON.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A key or item: attribute name to typed value.
pub type Item = HashMap<String, AttributeValue>;

/// Type descriptors accepted when decoding an attribute value.
const TYPE_DESCRIPTORS: &[&str] = &["S", "N", "B", "SS", "NS", "BS", "BOOL", "NULL", "L", "M"];

/// A typed attribute value.
///
/// Exactly one variant is present. The builders never hold untyped values:
/// anything a caller passes in is converted into one of these first.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// String.
    S(String),
    /// Number, string-encoded.
    N(String),
    /// Binary.
    B(Bytes),
    /// String set.
    Ss(Vec<String>),
    /// Number set, string-encoded.
    Ns(Vec<String>),
    /// Binary set.
    Bs(Vec<Bytes>),
    /// Boolean.
    Bool(bool),
    /// Null marker. The store only accepts `true`.
    Null(bool),
    /// List.
    L(Vec<AttributeValue>),
    /// Map.
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    /// The explicit null value, `{"NULL":true}`.
    #[must_use]
    pub fn null() -> Self {
        Self::Null(true)
    }

    /// Build a number value from anything that prints as a number.
    #[must_use]
    pub fn number(n: impl fmt::Display) -> Self {
        Self::N(n.to_string())
    }

    /// Returns `true` for values the store treats as empty: an empty string
    /// or binary, an empty set, list or map.
    ///
    /// Sets in particular cannot be stored empty at all.
    #[must_use]
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::S(s) => s.is_empty(),
            Self::B(b) => b.is_empty(),
            Self::Ss(v) | Self::Ns(v) => v.is_empty(),
            Self::Bs(v) => v.is_empty(),
            Self::L(v) => v.is_empty(),
            Self::M(m) => m.is_empty(),
            Self::N(_) | Self::Bool(_) | Self::Null(_) => false,
        }
    }

    /// Returns `true` if this is the null marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(true))
    }

    /// Returns the string if this is an `S` value.
    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number string if this is an `N` value.
    #[must_use]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the map if this is an `M` value.
    #[must_use]
    pub fn as_m(&self) -> Option<&HashMap<String, AttributeValue>> {
        match self {
            Self::M(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the wire type descriptor ("S", "N", "BOOL", ...).
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
            Self::Ss(_) => "SS",
            Self::Ns(_) => "NS",
            Self::Bs(_) => "BS",
            Self::Bool(_) => "BOOL",
            Self::Null(_) => "NULL",
            Self::L(_) => "L",
            Self::M(_) => "M",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.type_descriptor();
        match self {
            Self::S(s) | Self::N(s) => write!(f, "{{{tag}: {s}}}"),
            Self::B(b) => write!(f, "{{{tag}: {} bytes}}", b.len()),
            Self::Ss(v) | Self::Ns(v) => write!(f, "{{{tag}: {v:?}}}"),
            Self::Bs(v) => write!(f, "{{{tag}: {} items}}", v.len()),
            Self::Bool(b) | Self::Null(b) => write!(f, "{{{tag}: {b}}}"),
            Self::L(v) => write!(f, "{{{tag}: {} items}}", v.len()),
            Self::M(m) => write!(f, "{{{tag}: {} keys}}", m.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! number_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    Self::N(value.to_string())
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<Bytes> for AttributeValue {
    fn from(value: Bytes) -> Self {
        Self::B(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        Self::B(Bytes::from(value))
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        Self::L(value)
    }
}

impl From<HashMap<String, AttributeValue>> for AttributeValue {
    fn from(value: HashMap<String, AttributeValue>) -> Self {
        Self::M(value)
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

fn decode_binary<E: de::Error>(encoded: &str) -> Result<Bytes, E> {
    BASE64
        .decode(encoded)
        .map(Bytes::from)
        .map_err(de::Error::custom)
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let tag = self.type_descriptor();
        match self {
            Self::S(s) | Self::N(s) => map.serialize_entry(tag, s)?,
            Self::B(b) => map.serialize_entry(tag, &BASE64.encode(b))?,
            Self::Ss(v) | Self::Ns(v) => map.serialize_entry(tag, v)?,
            Self::Bs(v) => {
                let encoded: Vec<String> = v.iter().map(|b| BASE64.encode(b)).collect();
                map.serialize_entry(tag, &encoded)?;
            }
            Self::Bool(b) | Self::Null(b) => map.serialize_entry(tag, b)?,
            Self::L(list) => map.serialize_entry(tag, list)?,
            Self::M(m) => map.serialize_entry(tag, m)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AttributeValueVisitor)
    }
}

struct AttributeValueVisitor;

impl<'de> Visitor<'de> for AttributeValueVisitor {
    type Value = AttributeValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an attribute value object with exactly one type key")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
        let Some(tag) = map.next_key::<String>()? else {
            return Err(de::Error::custom("attribute value must have exactly one key"));
        };

        let value = match tag.as_str() {
            "S" => AttributeValue::S(map.next_value()?),
            "N" => AttributeValue::N(map.next_value()?),
            "B" => AttributeValue::B(decode_binary(&map.next_value::<String>()?)?),
            "SS" => AttributeValue::Ss(map.next_value()?),
            "NS" => AttributeValue::Ns(map.next_value()?),
            "BS" => {
                let encoded: Vec<String> = map.next_value()?;
                AttributeValue::Bs(
                    encoded
                        .iter()
                        .map(|e| decode_binary(e))
                        .collect::<Result<_, _>>()?,
                )
            }
            "BOOL" => AttributeValue::Bool(map.next_value()?),
            "NULL" => AttributeValue::Null(map.next_value()?),
            "L" => AttributeValue::L(map.next_value()?),
            "M" => AttributeValue::M(map.next_value()?),
            other => return Err(de::Error::unknown_field(other, TYPE_DESCRIPTORS)),
        };

        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("attribute value must have exactly one key"));
        }

        Ok(value)
    }
}
