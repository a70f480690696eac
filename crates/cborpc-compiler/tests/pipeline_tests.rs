//! Full-pipeline properties.
//!
//! Two harnesses:
//! 1. **Determinism proof**: compile a schema, repeat N times, all artifact
//!    bytes and hashes identical.
//! 2. **End-to-end dispatch**: encode a call with the dynamic caller, run
//!    it through the reference dispatcher (the executable definition of
//!    the generated dispatcher's semantics), and verify the handler sees
//!    exactly the declared values.

use cborpc_compiler::{compile, CompileOptions, CompileOutput};
use cborpc_runtime::{dispatch, encode_call, HandlerError};
use cborpc_wire::frame::{parse_response, Response, ResponseCode};
use cborpc_wire::Value;

const ALARM_SCHEMA: &str = r#"{
    "alarm_set": ["unsigned_integer", "bool"],
    "alarm_clear": []
}"#;

/// The full function table of the radio coprocessor interface this
/// compiler was built for.
const RADIO_SCHEMA: &str = r#"{
    "uplink_enqueue": ["byte_string"],
    "uplink_enqueue_confirmed": ["byte_string", "unsigned_integer"],
    "uplink_flush": [],
    "uplink_count": [],
    "downlink_pop": ["unsigned_integer"],
    "downlink_push": ["byte_string"],
    "datetime_get": [],
    "datetime_set": ["unsigned_integer", "unsigned_integer"],
    "alarm_set": ["unsigned_integer", "bool"],
    "alarm_set_delta": ["unsigned_integer"],
    "alarm_clear": [],
    "gnss_acquire": [],
    "gnss_is_active": [],
    "gnss_get_location": [],
    "bootloader_radio_version": [],
    "bootloader_start": [],
    "bootloader_write": ["byte_string"],
    "bootloader_finish": [],
    "bootloader_count": [],
    "sensor_update_version": [],
    "sensor_update_read": ["unsigned_integer", "unsigned_integer"],
    "radio_state_get": [],
    "radio_state_reset": [],
    "radio_counters_get": [],
    "radio_counters_reset": [],
    "eui64_get": [],
    "identifiers_get": [],
    "log_get": ["unsigned_integer"],
    "reboot": [],
    "radio_api_version": []
}"#;

fn compile_ok(text: &str) -> CompileOutput {
    compile(text, &CompileOptions::default()).expect("schema failed to compile")
}

// ══════════════════════════════════════════════════════════════════════════════
// Determinism
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_determinism_100_iterations() {
    let first = compile_ok(RADIO_SCHEMA);
    for i in 0..100 {
        let run = compile_ok(RADIO_SCHEMA);
        assert_eq!(
            run.schema_hash, first.schema_hash,
            "hash drift at iteration {i}"
        );
        assert_eq!(
            run.artifacts.len(),
            first.artifacts.len(),
            "artifact count drift at iteration {i}"
        );
        for (a, b) in run.artifacts.iter().zip(&first.artifacts) {
            assert_eq!(a.file_name, b.file_name);
            assert_eq!(a.contents, b.contents, "byte drift at iteration {i}");
        }
    }
}

#[test]
fn test_hash_is_embedded_in_both_artifacts() {
    let output = compile_ok(ALARM_SCHEMA);
    let hash_line = format!("pub const SCHEMA_HASH: &str = \"{}\";", output.schema_hash);
    assert_eq!(output.artifacts.len(), 2);
    for artifact in &output.artifacts {
        assert!(
            artifact.contents.contains(&hash_line),
            "{} missing schema hash",
            artifact.name
        );
    }
}

#[test]
fn test_appending_preserves_artifact_index_constants() {
    let base = compile_ok(ALARM_SCHEMA);
    let extended = compile_ok(
        r#"{
            "alarm_set": ["unsigned_integer", "bool"],
            "alarm_clear": [],
            "alarm_set_delta": ["unsigned_integer"]
        }"#,
    );

    for line in ["pub const FN_ALARM_SET: u32 = 0;", "pub const FN_ALARM_CLEAR: u32 = 1;"] {
        assert!(base.artifacts[0].contents.contains(line));
        assert!(extended.artifacts[0].contents.contains(line));
    }
    assert!(extended.artifacts[0]
        .contents
        .contains("pub const FN_ALARM_SET_DELTA: u32 = 2;"));
    // interface changed, so the hash must change
    assert_ne!(base.schema_hash, extended.schema_hash);
}

// ══════════════════════════════════════════════════════════════════════════════
// End-to-end dispatch
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_end_to_end_alarm_scenario() {
    let output = compile_ok(ALARM_SCHEMA);
    assert_eq!(output.schema.lookup_name("alarm_set").unwrap().index, 0);
    assert_eq!(output.schema.lookup_name("alarm_clear").unwrap().index, 1);

    let request = encode_call(
        &output.schema,
        "alarm_set",
        Some(1),
        &[Value::UnsignedInteger(1_700_000_000), Value::Bool(true)],
    )
    .unwrap();

    let mut seen = None;
    let mut handler = |function: &str, arguments: &[Value]| -> Result<Value, HandlerError> {
        seen = Some((function.to_owned(), arguments.to_vec()));
        Ok(Value::Null)
    };
    let response = dispatch(&output.schema, &mut handler, &request);

    assert_eq!(
        seen,
        Some((
            "alarm_set".to_owned(),
            vec![Value::UnsignedInteger(1_700_000_000), Value::Bool(true)],
        ))
    );
    assert_eq!(
        parse_response(&response).unwrap(),
        Response::Success {
            value: Value::Null,
            call_id: Some(1),
        }
    );
}

#[test]
fn test_end_to_end_zero_argument_call() {
    let output = compile_ok(ALARM_SCHEMA);
    let request = encode_call(&output.schema, "alarm_clear", None, &[]).unwrap();

    let mut calls = 0u32;
    let mut handler = |function: &str, arguments: &[Value]| -> Result<Value, HandlerError> {
        assert_eq!(function, "alarm_clear");
        assert!(arguments.is_empty());
        calls += 1;
        Ok(Value::Bool(true))
    };
    let response = dispatch(&output.schema, &mut handler, &request);

    assert_eq!(calls, 1);
    assert_eq!(
        parse_response(&response).unwrap(),
        Response::Success {
            value: Value::Bool(true),
            call_id: None,
        }
    );
}

#[test]
fn test_dispatcher_survives_malformed_then_serves_next_call() {
    let output = compile_ok(ALARM_SCHEMA);
    let mut handler = |_: &str, _: &[Value]| -> Result<Value, HandlerError> { Ok(Value::Null) };

    // hostile garbage first
    let response = dispatch(&output.schema, &mut handler, &[0xff, 0x00, 0x13]);
    match parse_response(&response).unwrap() {
        Response::Failure { code, .. } => assert_ne!(code, ResponseCode::Ok),
        other => panic!("expected failure, got {other:?}"),
    }

    // a good request on the same schema still goes through
    let request = encode_call(&output.schema, "alarm_clear", Some(2), &[]).unwrap();
    let response = dispatch(&output.schema, &mut handler, &request);
    assert!(matches!(
        parse_response(&response).unwrap(),
        Response::Success { call_id: Some(2), .. }
    ));
}

#[test]
fn test_full_radio_table_dispatches_by_index_and_name() {
    let output = compile_ok(RADIO_SCHEMA);
    assert_eq!(output.schema.len(), 30);
    assert_eq!(output.schema.lookup_name("uplink_enqueue").unwrap().index, 0);
    assert_eq!(
        output.schema.lookup_name("radio_api_version").unwrap().index,
        29
    );

    let request = encode_call(
        &output.schema,
        "sensor_update_read",
        Some(5),
        &[Value::UnsignedInteger(512), Value::UnsignedInteger(64)],
    )
    .unwrap();
    let mut handler = |function: &str, arguments: &[Value]| -> Result<Value, HandlerError> {
        assert_eq!(function, "sensor_update_read");
        assert_eq!(
            arguments,
            [Value::UnsignedInteger(512), Value::UnsignedInteger(64)]
        );
        Ok(Value::ByteString(vec![0u8; 64]))
    };
    let response = dispatch(&output.schema, &mut handler, &request);
    assert!(matches!(
        parse_response(&response).unwrap(),
        Response::Success { .. }
    ));
}
