//! Bounds-checked CBOR item decoder.

use crate::error::DecodeError;
use crate::value::Value;
use cborpc_types::TypeTag;

/// Containers nested deeper than this are rejected while skipping.
const MAX_SKIP_DEPTH: u32 = 16;

/// A decoded item header: major type, additional info, unsigned value.
///
/// For major 7 the value is the raw payload bits (float) or the simple
/// value number; for every other major it is the item's integer value,
/// length, or count.
#[derive(Debug, Clone, Copy)]
struct Header {
    major: u8,
    ai: u8,
    value: u64,
}

/// Cursor over an encoded payload.
///
/// Every read is bounds-checked against the buffer: the decoder never
/// trusts a sender-claimed length beyond what the buffer actually holds,
/// so a hostile peer can at worst earn itself a [`DecodeError`], never an
/// out-of-bounds read. Non-shortest-form headers and indefinite lengths
/// are rejected as malformed.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    pub(crate) input: &'a [u8],
    pub(crate) pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset into the payload.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Major type of the next item, without consuming it. `None` at end.
    pub fn peek_major(&self) -> Option<u8> {
        self.input.get(self.pos).map(|b| b >> 5)
    }

    // ── Low-level reads ──────────────────────────────────────────────────

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::TruncatedPayload {
                offset: self.pos,
                needed: n - self.remaining(),
            });
        }
        let bytes = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn malformed(&self, offset: usize, reason: &'static str) -> DecodeError {
        debug_assert!(offset <= self.input.len());
        DecodeError::MalformedEncoding { offset, reason }
    }

    /// Read one item header, enforcing shortest-form encoding for majors
    /// 0–6. Major 7 payload bytes (floats) are folded into the value.
    fn read_header(&mut self) -> Result<Header, DecodeError> {
        let start = self.pos;
        let initial = self.take_byte()?;
        let major = initial >> 5;
        let ai = initial & 0x1f;

        let value = match ai {
            0..=23 => ai as u64,
            24 => {
                let v = self.take_byte()? as u64;
                if major != 7 && v < 24 {
                    return Err(self.malformed(start, "non-shortest-form header"));
                }
                v
            }
            25 => {
                let v = u16::from_be_bytes(self.take(2)?.try_into().unwrap()) as u64;
                if major != 7 && v <= u8::MAX as u64 {
                    return Err(self.malformed(start, "non-shortest-form header"));
                }
                v
            }
            26 => {
                let v = u32::from_be_bytes(self.take(4)?.try_into().unwrap()) as u64;
                if major != 7 && v <= u16::MAX as u64 {
                    return Err(self.malformed(start, "non-shortest-form header"));
                }
                v
            }
            27 => {
                let v = u64::from_be_bytes(self.take(8)?.try_into().unwrap());
                if major != 7 && v <= u32::MAX as u64 {
                    return Err(self.malformed(start, "non-shortest-form header"));
                }
                v
            }
            28..=30 => return Err(self.malformed(start, "reserved additional info")),
            _ => return Err(self.malformed(start, "indefinite length not supported")),
        };

        Ok(Header { major, ai, value })
    }

    // ── Typed reads ──────────────────────────────────────────────────────

    pub fn read_uint(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        if h.major != 0 {
            return Err(self.mismatch(start, TypeTag::UnsignedInteger, h));
        }
        Ok(h.value)
    }

    pub fn read_int(&mut self) -> Result<i64, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        match h.major {
            0 => i64::try_from(h.value)
                .map_err(|_| self.malformed(start, "integer overflows i64")),
            1 => {
                if h.value > i64::MAX as u64 {
                    return Err(self.malformed(start, "integer overflows i64"));
                }
                Ok(-1 - h.value as i64)
            }
            _ => Err(self.mismatch(start, TypeTag::SignedInteger, h)),
        }
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        match (h.major, h.ai) {
            (7, 20) => Ok(false),
            (7, 21) => Ok(true),
            _ => Err(self.mismatch(start, TypeTag::Bool, h)),
        }
    }

    pub fn read_null(&mut self) -> Result<(), DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        match (h.major, h.ai) {
            (7, 22) => Ok(()),
            _ => Err(self.mismatch(start, TypeTag::Null, h)),
        }
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        match (h.major, h.ai) {
            (7, 27) => Ok(f64::from_bits(h.value)),
            (7, 25) | (7, 26) => Err(self.malformed(start, "non-canonical float width")),
            _ => Err(self.mismatch(start, TypeTag::Float64, h)),
        }
    }

    /// Borrow a byte string from the payload. The declared length is
    /// checked against the remaining buffer before slicing.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        if h.major != 2 {
            return Err(self.mismatch(start, TypeTag::ByteString, h));
        }
        self.take_payload(h.value)
    }

    pub fn read_text(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        if h.major != 3 {
            return Err(self.mismatch(start, TypeTag::TextString, h));
        }
        let bytes = self.take_payload(h.value)?;
        std::str::from_utf8(bytes)
            .map_err(|_| self.malformed(start, "invalid UTF-8 in text string"))
    }

    /// Read an array header and return the declared element count.
    pub fn read_array_header(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        if h.major != 4 {
            return Err(self.malformed(start, "expected array"));
        }
        Ok(h.value)
    }

    /// Read a map header and return the declared pair count.
    pub fn read_map_header(&mut self) -> Result<u64, DecodeError> {
        let start = self.pos;
        let h = self.read_header()?;
        if h.major != 5 {
            return Err(self.malformed(start, "expected map"));
        }
        Ok(h.value)
    }

    /// Decode one item as the declared registry tag.
    pub fn read_tagged(&mut self, tag: TypeTag) -> Result<Value, DecodeError> {
        match tag {
            TypeTag::Null => self.read_null().map(|()| Value::Null),
            TypeTag::Bool => self.read_bool().map(Value::Bool),
            TypeTag::UnsignedInteger => self.read_uint().map(Value::UnsignedInteger),
            TypeTag::SignedInteger => self.read_int().map(Value::SignedInteger),
            TypeTag::ByteString => self.read_bytes().map(|b| Value::ByteString(b.to_vec())),
            TypeTag::TextString => self.read_text().map(|s| Value::TextString(s.to_owned())),
            TypeTag::Float64 => self.read_f64().map(Value::Float64),
        }
    }

    /// Decode one self-describing item into a dynamic [`Value`].
    ///
    /// Only registry-representable items are accepted; composites (array,
    /// map, tag) are malformed in value position.
    pub fn read_value(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        match self.peek_major() {
            None => Err(DecodeError::TruncatedPayload {
                offset: start,
                needed: 1,
            }),
            Some(0) => self.read_uint().map(Value::UnsignedInteger),
            Some(1) => self.read_int().map(Value::SignedInteger),
            Some(2) => self.read_bytes().map(|b| Value::ByteString(b.to_vec())),
            Some(3) => self.read_text().map(|s| Value::TextString(s.to_owned())),
            Some(7) => {
                let h_ai = self.input[self.pos] & 0x1f;
                match h_ai {
                    20 | 21 => self.read_bool().map(Value::Bool),
                    22 => self.read_null().map(|()| Value::Null),
                    27 => self.read_f64().map(Value::Float64),
                    _ => Err(self.malformed(start, "unsupported simple value")),
                }
            }
            Some(_) => Err(self.malformed(start, "composite value not supported")),
        }
    }

    /// Skip one well-formed item of any kind, containers included.
    pub fn skip_item(&mut self) -> Result<(), DecodeError> {
        self.skip_item_at_depth(0)
    }

    fn skip_item_at_depth(&mut self, depth: u32) -> Result<(), DecodeError> {
        let start = self.pos;
        if depth >= MAX_SKIP_DEPTH {
            return Err(self.malformed(start, "nesting too deep"));
        }
        let h = self.read_header()?;
        match h.major {
            0 | 1 | 7 => {}
            2 | 3 => {
                self.take_payload(h.value)?;
            }
            4 => {
                for _ in 0..h.value {
                    self.skip_item_at_depth(depth + 1)?;
                }
            }
            5 => {
                for _ in 0..h.value {
                    self.skip_item_at_depth(depth + 1)?;
                    self.skip_item_at_depth(depth + 1)?;
                }
            }
            _ => {
                // major 6: tagged item, one nested payload item
                self.skip_item_at_depth(depth + 1)?;
            }
        }
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn take_payload(&mut self, declared: u64) -> Result<&'a [u8], DecodeError> {
        let len = usize::try_from(declared).map_err(|_| DecodeError::TruncatedPayload {
            offset: self.pos,
            needed: usize::MAX,
        })?;
        self.take(len)
    }

    fn mismatch(&self, offset: usize, expected: TypeTag, h: Header) -> DecodeError {
        DecodeError::TypeMismatch {
            offset,
            expected,
            found: kind_name(h.major, h.ai),
        }
    }
}

/// Human-readable kind of an item, for mismatch reporting.
fn kind_name(major: u8, ai: u8) -> &'static str {
    match (major, ai) {
        (0, _) => "unsigned integer",
        (1, _) => "negative integer",
        (2, _) => "byte string",
        (3, _) => "text string",
        (4, _) => "array",
        (5, _) => "map",
        (6, _) => "tag",
        (7, 20) | (7, 21) => "bool",
        (7, 22) => "null",
        (7, 25) | (7, 26) | (7, 27) => "float",
        _ => "simple value",
    }
}
