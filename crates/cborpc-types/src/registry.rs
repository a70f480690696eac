use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire encoding category for a single RPC argument or result.
///
/// Discriminants are assigned at first introduction and never reused: a
/// later addition must not shift the binary meaning of code generated for
/// unrelated functions. New tags take the next free value, and removed tags
/// (should that ever happen) leave a hole rather than renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TypeTag {
    Null = 0,
    Bool = 1,
    UnsignedInteger = 2,
    SignedInteger = 3,
    ByteString = 4,
    TextString = 5,
    #[serde(rename = "float")]
    Float64 = 6,
}

/// Payload width class of an encoded item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Width {
    /// The payload is always exactly this many bytes.
    Fixed(u8),
    /// Shortest-form integer payload, 0–8 bytes depending on magnitude.
    Scalar,
    /// Length-prefixed payload; the prefix itself is a scalar.
    LengthPrefixed,
}

/// Wire-format rule for one tag: how an item of this type is laid out.
///
/// `major` is the CBOR major type carried in the top three bits of the item
/// header. Signed integers span majors 0 and 1 on the wire; the rule records
/// the non-negative major and sets `signed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingRule {
    pub major: u8,
    pub width: Width,
    pub signed: bool,
}

impl TypeTag {
    /// Every tag in the registry, in discriminant order.
    pub const ALL: [TypeTag; 7] = [
        TypeTag::Null,
        TypeTag::Bool,
        TypeTag::UnsignedInteger,
        TypeTag::SignedInteger,
        TypeTag::ByteString,
        TypeTag::TextString,
        TypeTag::Float64,
    ];

    /// Resolve a schema tag name to a registry entry.
    ///
    /// Returns `None` for names outside the closed set; the validator turns
    /// that into [`SchemaError::UnknownTypeTag`](crate::SchemaError) with
    /// function and argument-position context.
    pub fn from_name(name: &str) -> Option<TypeTag> {
        match name {
            "null" => Some(TypeTag::Null),
            "bool" => Some(TypeTag::Bool),
            "unsigned_integer" => Some(TypeTag::UnsignedInteger),
            "signed_integer" => Some(TypeTag::SignedInteger),
            "byte_string" => Some(TypeTag::ByteString),
            "text_string" => Some(TypeTag::TextString),
            "float" => Some(TypeTag::Float64),
            _ => None,
        }
    }

    /// The canonical schema name for this tag.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::UnsignedInteger => "unsigned_integer",
            TypeTag::SignedInteger => "signed_integer",
            TypeTag::ByteString => "byte_string",
            TypeTag::TextString => "text_string",
            TypeTag::Float64 => "float",
        }
    }

    /// The wire-format rule for this tag. Pure lookup, total over the enum.
    pub fn rule(self) -> EncodingRule {
        match self {
            TypeTag::Null | TypeTag::Bool => EncodingRule {
                major: 7,
                width: Width::Fixed(0),
                signed: false,
            },
            TypeTag::UnsignedInteger => EncodingRule {
                major: 0,
                width: Width::Scalar,
                signed: false,
            },
            TypeTag::SignedInteger => EncodingRule {
                major: 0,
                width: Width::Scalar,
                signed: true,
            },
            TypeTag::ByteString => EncodingRule {
                major: 2,
                width: Width::LengthPrefixed,
                signed: false,
            },
            TypeTag::TextString => EncodingRule {
                major: 3,
                width: Width::LengthPrefixed,
                signed: false,
            },
            TypeTag::Float64 => EncodingRule {
                major: 7,
                width: Width::Fixed(8),
                signed: false,
            },
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
