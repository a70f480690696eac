//! Caller-stub artifact assembly.

use cborpc_types::{is_valid_function_name, Schema};

use crate::codec;
use crate::dispatch;
use crate::emit::{emit_header, GeneratedArtifact, SourceWriter};
use crate::error::{CodegenError, CodegenResult};

/// Render the caller-side artifact: one encode stub per function plus the
/// shared interface constants.
pub fn generate_caller(
    schema: &Schema,
    schema_hash: &str,
    stem: &str,
) -> CodegenResult<GeneratedArtifact> {
    let mut w = SourceWriter::new();
    emit_header(&mut w, schema_hash);

    w.line("use cborpc_wire::Encoder;");
    w.blank();
    w.line("/// Response parsing, re-exported for reading replies off the wire.");
    w.line("pub use cborpc_wire::frame::{parse_response, Response, ResponseCode};");
    w.blank();
    dispatch::emit_interface_consts(&mut w, schema, schema_hash);

    for entry in schema.entries() {
        let sig = &entry.signature;
        if !is_valid_function_name(&sig.name) {
            return Err(CodegenError::UnrenderableName(sig.name.clone()));
        }

        w.blank();
        w.line(&format!(
            "/// Encode a call to `{}` (dispatch index {}).",
            sig.name, entry.index
        ));
        let mut params = vec!["call_id: Option<u64>".to_owned()];
        for (position, &tag) in sig.argument_types.iter().enumerate() {
            params.push(format!(
                "{}: {}",
                codec::param_name(tag, position),
                codec::param_type(tag)
            ));
        }
        w.open(&format!(
            "pub fn {}({}) -> Vec<u8> {{",
            sig.name,
            params.join(", ")
        ));
        codec::emit_encode_body(&mut w, sig, &dispatch::index_const_name(&sig.name));
        w.close("}");
    }

    Ok(GeneratedArtifact {
        name: "caller stubs",
        file_name: format!("{stem}_caller.rs"),
        contents: w.finish(),
    })
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
    fn test_caller_artifact_shape() {
        let artifact = generate_caller(&sample(), "cafe", "rpc_api").unwrap();
        assert_eq!(artifact.name, "caller stubs");
        assert_eq!(artifact.file_name, "rpc_api_caller.rs");
        let src = &artifact.contents;
        assert!(src.starts_with("// @generated by cborpc. Do not edit.\n"));
        assert!(src.contains(
            "pub fn alarm_set(call_id: Option<u64>, arg0: u64, arg1: bool) -> Vec<u8> {"
        ));
        assert!(src.contains("pub fn alarm_clear(call_id: Option<u64>) -> Vec<u8> {"));
        assert!(src.contains("enc.push_uint(u64::from(FN_ALARM_SET));"));
    }

    #[test]
    fn test_zero_argument_stub_emits_empty_array() {
        let artifact = generate_caller(&sample(), "cafe", "rpc_api").unwrap();
        let src = &artifact.contents;
        let clear = src.split("pub fn alarm_clear").nth(1).unwrap();
        assert!(clear.contains("enc.push_array_header(0);"));
    }

    #[test]
    fn test_unrenderable_name_is_internal_error() {
        let schema = Schema::new(vec![DispatchEntry {
            index: 0,
            signature: FunctionSignature::new("not a name", vec![]),
        }]);
        assert!(matches!(
            generate_caller(&schema, "cafe", "rpc_api"),
            Err(CodegenError::UnrenderableName(_))
        ));
    }
}
