//! Dispatch table emission: index constants, name lookup, and the
//! callee-side dispatcher function.
//!
//! Index assignment is taken verbatim from the validated schema; both
//! artifacts render the same constants so the caller's `FN_*` values and
//! the dispatcher's match arms can never disagree.

use cborpc_types::Schema;

use crate::emit::SourceWriter;

/// `FN_*` constant name for a function.
pub fn index_const_name(function: &str) -> String {
    format!("FN_{}", function.to_ascii_uppercase())
}

/// Emit the shared interface constants both artifacts embed: the schema
/// hash, the function count, and one dispatch index per function.
pub fn emit_interface_consts(w: &mut SourceWriter, schema: &Schema, schema_hash: &str) {
    w.line("/// SHA-256 of the source schema. Both generated artifacts embed the");
    w.line("/// same value; compare them at startup to assert that the two sides");
    w.line("/// were generated from the same interface.");
    w.line(&format!("pub const SCHEMA_HASH: &str = \"{schema_hash}\";"));
    w.blank();
    w.line(&format!(
        "pub const FUNCTION_COUNT: u32 = {};",
        schema.len()
    ));
    w.blank();
    for entry in schema.entries() {
        w.line(&format!(
            "pub const {}: u32 = {};",
            index_const_name(&entry.signature.name),
            entry.index
        ));
    }
}

/// Emit the method-name lookup used for by-name requests.
pub fn emit_lookup_index(w: &mut SourceWriter, schema: &Schema) {
    w.line("/// Dispatch index for a method name, if one is assigned.");
    w.open("fn lookup_index(name: &str) -> Option<u32> {");
    w.open("match name {");
    for entry in schema.entries() {
        w.line(&format!(
            "\"{}\" => Some({}),",
            entry.signature.name, entry.index
        ));
    }
    w.line("_ => None,");
    w.close("}");
    w.close("}");
}

/// Emit the dispatcher entry point: envelope parse, index resolution,
/// per-function decode + handler call, response encoding. Unknown indices
/// are rejected before any argument decode; every path returns a
/// well-formed response frame.
pub fn emit_dispatch_fn(w: &mut SourceWriter, schema: &Schema) {
    let handlers_param = if schema.is_empty() {
        "_handlers"
    } else {
        "handlers"
    };
    w.line("/// Dispatch one request frame against the handler set.");
    w.line("///");
    w.line("/// Always returns a well-formed response frame: decode failures are");
    w.line("/// answered with an error response, never propagated as a fault.");
    w.open(&format!(
        "pub fn dispatch<H: Handlers>({handlers_param}: &mut H, request: &[u8]) -> Vec<u8> {{"
    ));
    w.open("let req = match frame::parse_request(request) {");
    w.line("Ok(req) => req,");
    w.line("Err(err) => return error_response(&err, None),");
    w.close("};");
    w.line("let call_id = req.call_id;");
    w.open("let index = match req.target {");
    w.line("CallTarget::Index(index) => index,");
    w.open("CallTarget::Name(name) => match lookup_index(name) {");
    w.line("Some(index) => u64::from(index),");
    w.open("None => {");
    w.open("return frame::encode_error_response(");
    w.line("ResponseCode::MethodNotFound,");
    w.line("ResponseCode::MethodNotFound.message(),");
    w.line("call_id,");
    w.close(");");
    w.close("}");
    w.close("},");
    w.close("};");
    w.open("let outcome = match index {");
    for entry in schema.entries() {
        w.line(&format!(
            "{} => call_{}({handlers_param}, req.arg_count, req.args),",
            entry.index, entry.signature.name
        ));
    }
    w.line("_ => Err(DecodeError::UnknownIndex { index }),");
    w.close("};");
    w.open("match outcome {");
    w.line("Ok(Ok(value)) => frame::encode_ok_response(&value, call_id),");
    w.open("Ok(Err(err)) => {");
    w.line("frame::encode_error_response(ResponseCode::HandlerError, &err.message, call_id)");
    w.close("}");
    w.line("Err(err) => error_response(&err, call_id),");
    w.close("}");
    w.close("}");
    w.blank();
    w.open("fn error_response(err: &DecodeError, call_id: Option<u64>) -> Vec<u8> {");
    w.line("frame::encode_error_response(frame::response_code(err), &err.to_string(), call_id)");
    w.close("}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cborpc_types::{DispatchEntry, FunctionSignature, TypeTag};

    fn sample() -> Schema {
        Schema::new(vec![
            DispatchEntry {
                index: 0,
                signature: FunctionSignature::new(
                    "alarm_set",
                    vec![TypeTag::UnsignedInteger, TypeTag::Bool],
                ),
            },
            DispatchEntry {
                index: 1,
                signature: FunctionSignature::new("alarm_clear", vec![]),
            },
        ])
    }

    #[test]
    fn test_const_names() {
        assert_eq!(index_const_name("alarm_set"), "FN_ALARM_SET");
        assert_eq!(index_const_name("__ver"), "FN___VER");
    }

    #[test]
    fn test_interface_consts() {
        let mut w = SourceWriter::new();
        emit_interface_consts(&mut w, &sample(), "deadbeef");
        let out = w.finish();
        assert!(out.contains("pub const SCHEMA_HASH: &str = \"deadbeef\";"));
        assert!(out.contains("pub const FUNCTION_COUNT: u32 = 2;"));
        assert!(out.contains("pub const FN_ALARM_SET: u32 = 0;"));
        assert!(out.contains("pub const FN_ALARM_CLEAR: u32 = 1;"));
    }

    #[test]
    fn test_dispatch_rejects_unknown_index_before_decode() {
        let mut w = SourceWriter::new();
        emit_dispatch_fn(&mut w, &sample());
        let out = w.finish();
        // the fallback arm produces UnknownIndex without calling any decoder
        assert!(out.contains("_ => Err(DecodeError::UnknownIndex { index }),"));
        assert!(out.contains("0 => call_alarm_set(handlers, req.arg_count, req.args),"));
        assert!(out.contains("1 => call_alarm_clear(handlers, req.arg_count, req.args),"));
    }

    #[test]
    fn test_empty_schema_underscores_handlers() {
        let mut w = SourceWriter::new();
        emit_dispatch_fn(&mut w, &Schema::new(vec![]));
        let out = w.finish();
        assert!(out.contains("pub fn dispatch<H: Handlers>(_handlers: &mut H"));
    }
}
