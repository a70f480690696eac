//! Encode-then-decode round trips for every registry tag over
//! representative values, plus hostile-input behavior: truncation and
//! malformation must surface as typed errors, never as out-of-bounds
//! reads or bogus values.

use cborpc_types::TypeTag;
use cborpc_wire::frame::{
    encode_error_response, encode_ok_response, encode_request, parse_request, parse_response,
    CallTarget, Response, ResponseCode,
};
use cborpc_wire::{DecodeError, Decoder, Encoder, Value};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn round_trip(value: &Value) -> Value {
    let mut enc = Encoder::new();
    value.encode_into(&mut enc);
    let bytes = enc.into_bytes();
    let mut dec = Decoder::new(&bytes);
    let out = dec.read_tagged(value.tag()).expect("decode failed");
    assert!(dec.is_at_end(), "decoder left trailing bytes");
    out
}

// ══════════════════════════════════════════════════════════════════════════════
// Per-tag round trips
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_unsigned_integer_representatives() {
    for v in [
        0u64,
        1,
        23,
        24,
        255,
        256,
        65_535,
        65_536,
        1 << 16,
        u32::MAX as u64,
        u32::MAX as u64 + 1,
        1_700_000_000,
        u64::MAX,
    ] {
        assert_eq!(
            round_trip(&Value::UnsignedInteger(v)),
            Value::UnsignedInteger(v)
        );
    }
}

#[test]
fn test_signed_integer_representatives() {
    for v in [0i64, 1, -1, -24, -25, 1000, -1000, i64::MAX, i64::MIN] {
        assert_eq!(round_trip(&Value::SignedInteger(v)), Value::SignedInteger(v));
    }
}

#[test]
fn test_byte_string_lengths() {
    for len in [0usize, 1, 23, 24, 255, 256, 1024] {
        let bytes = vec![0xabu8; len];
        assert_eq!(
            round_trip(&Value::ByteString(bytes.clone())),
            Value::ByteString(bytes)
        );
    }
}

#[test]
fn test_text_string_multibyte() {
    for s in ["", "pong", "héllo wörld", "日本語", "a\u{10348}b"] {
        assert_eq!(
            round_trip(&Value::TextString(s.into())),
            Value::TextString(s.into())
        );
    }
}

#[test]
fn test_bool_and_null() {
    assert_eq!(round_trip(&Value::Bool(true)), Value::Bool(true));
    assert_eq!(round_trip(&Value::Bool(false)), Value::Bool(false));
    assert_eq!(round_trip(&Value::Null), Value::Null);
}

#[test]
fn test_float_representatives() {
    for v in [0.0f64, -0.0, 1.5, -2.25, f64::MAX, f64::MIN_POSITIVE] {
        assert_eq!(round_trip(&Value::Float64(v)), Value::Float64(v));
    }
}

#[test]
fn test_float_nan_survives_bits() {
    let mut enc = Encoder::new();
    Value::Float64(f64::NAN).encode_into(&mut enc);
    let bytes = enc.into_bytes();
    match Decoder::new(&bytes).read_tagged(TypeTag::Float64).unwrap() {
        Value::Float64(v) => assert!(v.is_nan()),
        other => panic!("unexpected value: {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Hostile input
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_truncation_point_is_detected() {
    // a full request frame, cut short at every possible length
    let full = encode_request(
        3,
        Some(99),
        &[
            Value::UnsignedInteger(1_700_000_000),
            Value::ByteString(vec![1, 2, 3, 4, 5]),
            Value::Bool(true),
        ],
    );
    for cut in 0..full.len() {
        let err = parse_request(&full[..cut]).expect_err("truncated frame accepted");
        assert!(
            matches!(
                err,
                DecodeError::TruncatedPayload { .. } | DecodeError::InvalidRequest { .. }
            ),
            "unexpected error at cut {cut}: {err:?}"
        );
    }
    // the uncut frame parses
    parse_request(&full).unwrap();
}

#[test]
fn test_byte_string_cannot_overclaim() {
    // declared length far beyond the buffer
    let bytes = [0x5a, 0xff, 0xff, 0xff, 0xff, 0x00];
    let err = Decoder::new(&bytes).read_bytes().unwrap_err();
    assert!(matches!(err, DecodeError::TruncatedPayload { .. }));
}

#[test]
fn test_declared_type_is_enforced() {
    let mut enc = Encoder::new();
    enc.push_text("not bytes");
    let bytes = enc.into_bytes();
    let err = Decoder::new(&bytes)
        .read_tagged(TypeTag::ByteString)
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::TypeMismatch {
            offset: 0,
            expected: TypeTag::ByteString,
            found: "text string",
        }
    );
}

#[test]
fn test_invalid_utf8_text_is_malformed() {
    // text string header over invalid UTF-8 payload
    let bytes = [0x62, 0xff, 0xfe];
    let err = Decoder::new(&bytes).read_text().unwrap_err();
    assert!(matches!(err, DecodeError::MalformedEncoding { .. }));
}

// ══════════════════════════════════════════════════════════════════════════════
// Frame round trips
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_request_envelope_round_trip() {
    let bytes = encode_request(0, Some(13), &[Value::ByteString(vec![9, 8, 7])]);
    let req = parse_request(&bytes).unwrap();
    assert_eq!(req.target, CallTarget::Index(0));
    assert_eq!(req.call_id, Some(13));
    assert_eq!(req.arg_count, 1);
}

#[test]
fn test_response_envelope_round_trips() {
    let ok = encode_ok_response(&Value::UnsignedInteger(4), Some(13));
    assert_eq!(
        parse_response(&ok).unwrap(),
        Response::Success {
            value: Value::UnsignedInteger(4),
            call_id: Some(13),
        }
    );

    let err = encode_error_response(ResponseCode::InvalidArgs, "Invalid arguments", Some(13));
    assert_eq!(
        parse_response(&err).unwrap(),
        Response::Failure {
            code: ResponseCode::InvalidArgs,
            message: "Invalid arguments".into(),
            call_id: Some(13),
        }
    );
}

#[test]
fn test_identical_values_encode_identically() {
    // canonical encoding: no two renderings of the same request
    let a = encode_request(7, None, &[Value::TextString("x".into())]);
    let b = encode_request(7, None, &[Value::TextString("x".into())]);
    assert_eq!(a, b);
}
