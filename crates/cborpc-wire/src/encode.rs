//! Canonical CBOR item encoder.

/// Appends CBOR items to an owned buffer.
///
/// Headers are always emitted in shortest form, so equal values have equal
/// encodings. Generated caller stubs and the dispatcher response path both
/// write through this type; it has no failure modes because it owns the
/// buffer and every supported value has a defined encoding.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Consume the encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Shortest-form item header: major type plus unsigned value.
    fn push_header(&mut self, major: u8, value: u64) {
        let m = major << 5;
        if value < 24 {
            self.buf.push(m | value as u8);
        } else if value <= u8::MAX as u64 {
            self.buf.push(m | 24);
            self.buf.push(value as u8);
        } else if value <= u16::MAX as u64 {
            self.buf.push(m | 25);
            self.buf.extend_from_slice(&(value as u16).to_be_bytes());
        } else if value <= u32::MAX as u64 {
            self.buf.push(m | 26);
            self.buf.extend_from_slice(&(value as u32).to_be_bytes());
        } else {
            self.buf.push(m | 27);
            self.buf.extend_from_slice(&value.to_be_bytes());
        }
    }

    pub fn push_uint(&mut self, value: u64) {
        self.push_header(0, value);
    }

    /// Signed integer: major 0 for non-negative, major 1 encoding `-1 - n`.
    pub fn push_int(&mut self, value: i64) {
        if value >= 0 {
            self.push_header(0, value as u64);
        } else {
            self.push_header(1, !(value as u64));
        }
    }

    pub fn push_bool(&mut self, value: bool) {
        self.buf.push(if value { 0xf5 } else { 0xf4 });
    }

    pub fn push_null(&mut self) {
        self.buf.push(0xf6);
    }

    pub fn push_f64(&mut self, value: f64) {
        self.buf.push(0xfb);
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn push_bytes(&mut self, value: &[u8]) {
        self.push_header(2, value.len() as u64);
        self.buf.extend_from_slice(value);
    }

    pub fn push_text(&mut self, value: &str) {
        self.push_header(3, value.len() as u64);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Definite-length array header; the caller pushes exactly `len` items
    /// after it.
    pub fn push_array_header(&mut self, len: u64) {
        self.push_header(4, len);
    }

    /// Definite-length map header; the caller pushes exactly `len`
    /// key/value pairs after it.
    pub fn push_map_header(&mut self, len: u64) {
        self.push_header(5, len);
    }
}
