//! Per-signature codec fragments.
//!
//! For every dispatch entry the generator composes an argument encoder
//! (caller side) and decoder (callee side) from per-tag rules, one wire
//! item per argument in signature order. Zero-argument functions get a
//! trivial empty encode/decode pair, never omitted, so dispatch stays
//! uniform.

use cborpc_types::{FunctionSignature, TypeTag};

use crate::emit::SourceWriter;

/// Rust parameter type for a caller stub argument.
pub fn param_type(tag: TypeTag) -> &'static str {
    match tag {
        TypeTag::Null => "()",
        TypeTag::Bool => "bool",
        TypeTag::UnsignedInteger => "u64",
        TypeTag::SignedInteger => "i64",
        TypeTag::ByteString => "&[u8]",
        TypeTag::TextString => "&str",
        TypeTag::Float64 => "f64",
    }
}

/// Rust owned type for a handler argument.
pub fn handler_type(tag: TypeTag) -> &'static str {
    match tag {
        TypeTag::Null => "()",
        TypeTag::Bool => "bool",
        TypeTag::UnsignedInteger => "u64",
        TypeTag::SignedInteger => "i64",
        TypeTag::ByteString => "Vec<u8>",
        TypeTag::TextString => "String",
        TypeTag::Float64 => "f64",
    }
}

/// Stub parameter name for argument `position`. Null arguments carry no
/// information, so their parameter is underscored.
pub fn param_name(tag: TypeTag, position: usize) -> String {
    match tag {
        TypeTag::Null => format!("_arg{position}"),
        _ => format!("arg{position}"),
    }
}

/// Encoder statement for one stub argument.
fn push_stmt(tag: TypeTag, position: usize) -> String {
    let name = param_name(tag, position);
    match tag {
        TypeTag::Null => "enc.push_null();".to_owned(),
        TypeTag::Bool => format!("enc.push_bool({name});"),
        TypeTag::UnsignedInteger => format!("enc.push_uint({name});"),
        TypeTag::SignedInteger => format!("enc.push_int({name});"),
        TypeTag::ByteString => format!("enc.push_bytes({name});"),
        TypeTag::TextString => format!("enc.push_text({name});"),
        TypeTag::Float64 => format!("enc.push_f64({name});"),
    }
}

/// Decoder expression producing one owned handler argument.
fn read_expr(tag: TypeTag) -> &'static str {
    match tag {
        TypeTag::Null => "args.read_null()?",
        TypeTag::Bool => "args.read_bool()?",
        TypeTag::UnsignedInteger => "args.read_uint()?",
        TypeTag::SignedInteger => "args.read_int()?",
        TypeTag::ByteString => "args.read_bytes()?.to_vec()",
        TypeTag::TextString => "args.read_text()?.to_owned()",
        TypeTag::Float64 => "args.read_f64()?",
    }
}

/// Emit the body of a caller stub: the request envelope with the method
/// index, the argument array in signature order, and the optional
/// transaction id.
pub fn emit_encode_body(w: &mut SourceWriter, sig: &FunctionSignature, index_const: &str) {
    w.line("let mut enc = Encoder::new();");
    w.line("enc.push_map_header(if call_id.is_some() { 3 } else { 2 });");
    w.line("enc.push_bytes(b\"m\");");
    w.line(&format!("enc.push_uint(u64::from({index_const}));"));
    w.line("enc.push_bytes(b\"p\");");
    w.line(&format!("enc.push_array_header({});", sig.arity()));
    for (position, &tag) in sig.argument_types.iter().enumerate() {
        w.line(&push_stmt(tag, position));
    }
    w.open("if let Some(id) = call_id {");
    w.line("enc.push_bytes(b\"id\");");
    w.line("enc.push_uint(id);");
    w.close("}");
    w.line("enc.into_bytes()");
}

/// Emit the per-function decode helper used by the generated dispatcher:
/// arity check, one typed read per argument, then the handler call.
pub fn emit_decode_fn(w: &mut SourceWriter, sig: &FunctionSignature) {
    let arity = sig.arity();
    let args_param = if arity == 0 {
        "_args: Decoder<'_>"
    } else {
        "mut args: Decoder<'_>"
    };
    w.open(&format!("fn call_{}<H: Handlers>(", sig.name));
    w.line("handlers: &mut H,");
    w.line("arg_count: u64,");
    w.line(&format!("{args_param},"));
    w.dedent();
    w.open(") -> Result<Result<Value, HandlerError>, DecodeError> {");
    w.open(&format!("if arg_count != {arity} {{"));
    w.open("return Err(DecodeError::WrongArgumentCount {");
    w.line(&format!("expected: {arity},"));
    w.line("found: arg_count as usize,");
    w.close("});");
    w.close("}");
    for (position, &tag) in sig.argument_types.iter().enumerate() {
        w.line(&format!("let arg{position} = {};", read_expr(tag)));
    }
    let call_args: Vec<String> = (0..arity).map(|i| format!("arg{i}")).collect();
    w.line(&format!(
        "Ok(handlers.{}({}))",
        sig.name,
        call_args.join(", ")
    ));
    w.close("}");
}
