//! cborpc wire codec: the runtime half of the generated code contract.
//!
//! # Architecture
//!
//! Everything on the wire is a strict subset of CBOR (RFC 8949) in
//! canonical shortest-form encoding:
//!
//! - unsigned integer (major 0), negative integer (major 1)
//! - byte string (major 2), text string (major 3), both length-prefixed
//! - array (major 4, argument lists), map (major 5, envelopes)
//! - simple values `false`/`true`/`null` and 64-bit floats (major 7)
//!
//! Indefinite lengths and non-shortest-form headers are rejected as
//! malformed, so equal values always have equal encodings — the property
//! that lets two independently generated artifacts agree bit-for-bit.
//!
//! # Framing
//!
//! A request is a map with byte-string keys: `m` (dispatch index, or a
//! method name on the reference path), `p` (argument array), optional `id`
//! (transaction id, echoed back). A success response carries `v`; a failure
//! carries `e` (response code) and `msg`. See [`frame`].
//!
//! Decode failures are per-call and recoverable: the dispatcher answers
//! with a well-formed error response and keeps serving.

mod decode;
mod encode;
mod error;
pub mod frame;
mod value;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::DecodeError;
pub use value::Value;
