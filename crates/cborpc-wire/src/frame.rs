//! Request and response envelopes.
//!
//! A request is a definite-length map with byte-string keys:
//!
//! - `m` — the target: an unsigned dispatch index (generated stubs always
//!   call by index) or a byte-string method name,
//! - `p` — the argument array, one item per declared argument in signature
//!   order; may be omitted for zero-argument calls,
//! - `id` — optional unsigned transaction id, echoed back in the response.
//!
//! A success response is a map carrying `v` (the result value) and the
//! echoed `id`; a failure carries `e` (a [`ResponseCode`]) plus `msg` and
//! the echoed `id`. Every dispatch produces exactly one well-formed
//! response frame, so the receiver is never left in a partially-consumed
//! state.

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::DecodeError;
use crate::value::Value;

/// Longest accepted method name in a by-name request.
pub const MAX_METHOD_NAME_LEN: usize = 32;

/// How a request names its target function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget<'a> {
    Index(u64),
    Name(&'a str),
}

/// A parsed request envelope. Argument items are left encoded; the
/// dispatcher decodes them against the signature after index lookup.
#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub target: CallTarget<'a>,
    pub call_id: Option<u64>,
    /// Declared element count of the `p` array.
    pub arg_count: u64,
    /// Cursor over the encoded argument items (offsets restart at 0).
    pub args: Decoder<'a>,
}

/// Response status, as carried in the `e` key of a failure envelope.
///
/// Discriminants are wire values: fixed at first introduction, never
/// reused or renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResponseCode {
    Ok = 0,
    InvalidRequest = 1,
    MethodNotFound = 2,
    InvalidArgs = 3,
    ParseError = 4,
    InternalError = 5,
    EncodeError = 6,
    HandlerError = 7,
}

impl ResponseCode {
    pub fn from_wire(value: i64) -> Option<ResponseCode> {
        match value {
            0 => Some(ResponseCode::Ok),
            1 => Some(ResponseCode::InvalidRequest),
            2 => Some(ResponseCode::MethodNotFound),
            3 => Some(ResponseCode::InvalidArgs),
            4 => Some(ResponseCode::ParseError),
            5 => Some(ResponseCode::InternalError),
            6 => Some(ResponseCode::EncodeError),
            7 => Some(ResponseCode::HandlerError),
            _ => None,
        }
    }

    /// Default human-readable message for this code.
    pub fn message(self) -> &'static str {
        match self {
            ResponseCode::Ok => "OK",
            ResponseCode::InvalidRequest => "Invalid request",
            ResponseCode::MethodNotFound => "Method not found",
            ResponseCode::InvalidArgs => "Invalid arguments",
            ResponseCode::ParseError => "Parse error",
            ResponseCode::InternalError => "Internal error",
            ResponseCode::EncodeError => "Encode error",
            ResponseCode::HandlerError => "Handler error",
        }
    }
}

/// A parsed response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success {
        value: Value,
        call_id: Option<u64>,
    },
    Failure {
        code: ResponseCode,
        message: String,
        call_id: Option<u64>,
    },
}

/// Map a decode failure to the code reported back to the caller.
pub fn response_code(err: &DecodeError) -> ResponseCode {
    match err {
        DecodeError::UnknownIndex { .. } => ResponseCode::MethodNotFound,
        DecodeError::TypeMismatch { .. } | DecodeError::WrongArgumentCount { .. } => {
            ResponseCode::InvalidArgs
        }
        DecodeError::TruncatedPayload { .. } | DecodeError::MalformedEncoding { .. } => {
            ResponseCode::ParseError
        }
        DecodeError::InvalidRequest { .. } => ResponseCode::InvalidRequest,
    }
}

// ── Request ──────────────────────────────────────────────────────────────

fn invalid(reason: &'static str) -> DecodeError {
    DecodeError::InvalidRequest { reason }
}

/// Parse a request envelope. Argument items are bounds-checked (skipped
/// over) but not decoded; type checking against the signature happens in
/// the dispatcher after index lookup.
pub fn parse_request(input: &[u8]) -> Result<Request<'_>, DecodeError> {
    let mut dec = Decoder::new(input);
    if dec.peek_major() != Some(5) {
        return Err(invalid("request is not a map"));
    }
    let pairs = dec.read_map_header()?;

    let mut target = None;
    let mut call_id = None;
    let mut args: Option<(u64, Decoder<'_>)> = None;

    for _ in 0..pairs {
        if dec.peek_major() != Some(2) {
            return Err(invalid("request keys must be byte strings"));
        }
        match dec.read_bytes()? {
            b"m" => {
                if target.is_some() {
                    return Err(invalid("duplicate method key"));
                }
                target = Some(match dec.peek_major() {
                    Some(0) => CallTarget::Index(dec.read_uint()?),
                    Some(2) => {
                        let name = dec.read_bytes()?;
                        if name.len() > MAX_METHOD_NAME_LEN {
                            return Err(invalid("method name too long"));
                        }
                        let name = std::str::from_utf8(name)
                            .map_err(|_| invalid("method name is not UTF-8"))?;
                        CallTarget::Name(name)
                    }
                    _ => return Err(invalid("method must be an index or a name")),
                });
            }
            b"p" => {
                if args.is_some() {
                    return Err(invalid("duplicate params key"));
                }
                if dec.peek_major() != Some(4) {
                    return Err(invalid("params must be an array"));
                }
                let count = dec.read_array_header()?;
                let start = dec.offset();
                for _ in 0..count {
                    dec.skip_item()?;
                }
                args = Some((count, Decoder::new(&input[start..dec.offset()])));
            }
            b"id" => {
                if call_id.is_some() {
                    return Err(invalid("duplicate id key"));
                }
                if dec.peek_major() != Some(0) {
                    return Err(invalid("transaction id must be an unsigned integer"));
                }
                call_id = Some(dec.read_uint()?);
            }
            _ => return Err(invalid("unexpected key in request")),
        }
    }

    if !dec.is_at_end() {
        return Err(invalid("trailing bytes after request"));
    }

    let target = target.ok_or_else(|| invalid("missing method key"))?;
    let (arg_count, args) = args.unwrap_or((0, Decoder::new(&[])));
    Ok(Request {
        target,
        call_id,
        arg_count,
        args,
    })
}

/// Encode a by-index request from dynamic values. Generated stubs inline
/// the same layout with native argument types.
pub fn encode_request(index: u64, call_id: Option<u64>, args: &[Value]) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.push_map_header(if call_id.is_some() { 3 } else { 2 });
    enc.push_bytes(b"m");
    enc.push_uint(index);
    enc.push_bytes(b"p");
    enc.push_array_header(args.len() as u64);
    for arg in args {
        arg.encode_into(&mut enc);
    }
    if let Some(id) = call_id {
        enc.push_bytes(b"id");
        enc.push_uint(id);
    }
    enc.into_bytes()
}

// ── Response ─────────────────────────────────────────────────────────────

pub fn encode_ok_response(result: &Value, call_id: Option<u64>) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.push_map_header(if call_id.is_some() { 2 } else { 1 });
    enc.push_bytes(b"v");
    result.encode_into(&mut enc);
    if let Some(id) = call_id {
        enc.push_bytes(b"id");
        enc.push_uint(id);
    }
    enc.into_bytes()
}

pub fn encode_error_response(
    code: ResponseCode,
    message: &str,
    call_id: Option<u64>,
) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.push_map_header(if call_id.is_some() { 3 } else { 2 });
    enc.push_bytes(b"e");
    enc.push_int(code as i64);
    enc.push_bytes(b"msg");
    enc.push_bytes(message.as_bytes());
    if let Some(id) = call_id {
        enc.push_bytes(b"id");
        enc.push_uint(id);
    }
    enc.into_bytes()
}

/// Parse a response envelope.
pub fn parse_response(input: &[u8]) -> Result<Response, DecodeError> {
    let mut dec = Decoder::new(input);
    if dec.peek_major() != Some(5) {
        return Err(invalid("response is not a map"));
    }
    let pairs = dec.read_map_header()?;

    let mut value = None;
    let mut code = None;
    let mut message = None;
    let mut call_id = None;

    for _ in 0..pairs {
        if dec.peek_major() != Some(2) {
            return Err(invalid("response keys must be byte strings"));
        }
        match dec.read_bytes()? {
            b"v" => value = Some(dec.read_value()?),
            b"e" => {
                let raw = dec.read_int()?;
                code = Some(
                    ResponseCode::from_wire(raw)
                        .ok_or_else(|| invalid("unknown response code"))?,
                );
            }
            b"msg" => {
                let bytes = dec.read_bytes()?;
                message = Some(String::from_utf8_lossy(bytes).into_owned());
            }
            b"id" => call_id = Some(dec.read_uint()?),
            _ => return Err(invalid("unexpected key in response")),
        }
    }

    if !dec.is_at_end() {
        return Err(invalid("trailing bytes after response"));
    }

    match (code, value) {
        (Some(code), _) => Ok(Response::Failure {
            code,
            message: message.unwrap_or_else(|| code.message().to_owned()),
            call_id,
        }),
        (None, Some(value)) => Ok(Response::Success { value, call_id }),
        (None, None) => Err(invalid("response carries neither result nor error")),
    }
}
