//! Dynamically typed wire values.

use crate::encode::Encoder;
use cborpc_types::TypeTag;

/// A dynamically typed wire value: one variant per registry tag.
///
/// Generated code works with native Rust types; `Value` is the dynamic
/// counterpart used by the reference dispatcher, the dynamic caller, and
/// handler results (the schema declares no return types, so results travel
/// as self-describing values).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    UnsignedInteger(u64),
    SignedInteger(i64),
    ByteString(Vec<u8>),
    TextString(String),
    Float64(f64),
}

impl Value {
    /// The registry tag this value travels as.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::UnsignedInteger(_) => TypeTag::UnsignedInteger,
            Value::SignedInteger(_) => TypeTag::SignedInteger,
            Value::ByteString(_) => TypeTag::ByteString,
            Value::TextString(_) => TypeTag::TextString,
            Value::Float64(_) => TypeTag::Float64,
        }
    }

    /// Whether this value may be encoded in a slot declared as `tag`.
    ///
    /// Exact tag match, with one widening: a non-negative
    /// `UnsignedInteger` fits a `signed_integer` slot when it is within
    /// `i64` range, since the wire encoding is identical.
    pub fn conforms_to(&self, tag: TypeTag) -> bool {
        if self.tag() == tag {
            return true;
        }
        matches!(
            (self, tag),
            (Value::UnsignedInteger(v), TypeTag::SignedInteger) if *v <= i64::MAX as u64
        )
    }

    /// Append this value's canonical encoding.
    pub fn encode_into(&self, enc: &mut Encoder) {
        match self {
            Value::Null => enc.push_null(),
            Value::Bool(v) => enc.push_bool(*v),
            Value::UnsignedInteger(v) => enc.push_uint(*v),
            Value::SignedInteger(v) => enc.push_int(*v),
            Value::ByteString(v) => enc.push_bytes(v),
            Value::TextString(v) => enc.push_text(v),
            Value::Float64(v) => enc.push_f64(*v),
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UnsignedInteger(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::SignedInteger(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::ByteString(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::ByteString(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::TextString(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::TextString(v.to_owned())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
