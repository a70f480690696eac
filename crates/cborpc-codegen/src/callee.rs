//! Callee-dispatcher artifact assembly.

use cborpc_types::{is_valid_function_name, Schema};

use crate::codec;
use crate::dispatch;
use crate::emit::{emit_header, GeneratedArtifact, SourceWriter};
use crate::error::{CodegenError, CodegenResult};

/// Render the callee-side artifact: the `Handlers` trait, the dispatcher
/// entry point, and one decode helper per function.
pub fn generate_callee(
    schema: &Schema,
    schema_hash: &str,
    stem: &str,
) -> CodegenResult<GeneratedArtifact> {
    for entry in schema.entries() {
        if !is_valid_function_name(&entry.signature.name) {
            return Err(CodegenError::UnrenderableName(entry.signature.name.clone()));
        }
    }

    let mut w = SourceWriter::new();
    emit_header(&mut w, schema_hash);

    w.line("use cborpc_runtime::HandlerError;");
    w.line("use cborpc_wire::frame::{self, CallTarget, ResponseCode};");
    w.line("use cborpc_wire::{DecodeError, Decoder, Value};");
    w.blank();
    dispatch::emit_interface_consts(&mut w, schema, schema_hash);
    w.blank();

    emit_handlers_trait(&mut w, schema);
    w.blank();
    dispatch::emit_dispatch_fn(&mut w, schema);

    for entry in schema.entries() {
        w.blank();
        codec::emit_decode_fn(&mut w, &entry.signature);
    }
    w.blank();
    dispatch::emit_lookup_index(&mut w, schema);

    Ok(GeneratedArtifact {
        name: "callee dispatcher",
        file_name: format!("{stem}_dispatcher.rs"),
        contents: w.finish(),
    })
}

/// The handler collaborator interface: one method per function with the
/// decoded argument types. Handler semantics are external; only the
/// calling convention is generated.
fn emit_handlers_trait(w: &mut SourceWriter, schema: &Schema) {
    w.line("/// One handler per schema function. Implemented by the application;");
    w.line("/// invoked by [`dispatch`] only after a fully successful decode.");
    w.open("pub trait Handlers {");
    let mut first = true;
    for entry in schema.entries() {
        if !first {
            w.blank();
        }
        first = false;
        let sig = &entry.signature;
        let mut params = vec!["&mut self".to_owned()];
        for (position, &tag) in sig.argument_types.iter().enumerate() {
            params.push(format!("arg{position}: {}", codec::handler_type(tag)));
        }
        w.line(&format!(
            "fn {}({}) -> Result<Value, HandlerError>;",
            sig.name,
            params.join(", ")
        ));
    }
    w.close("}");
}
