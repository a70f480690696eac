//! The reference dispatcher.

use cborpc_types::Schema;
use cborpc_wire::frame::{self, CallTarget, ResponseCode};
use cborpc_wire::{DecodeError, Value};

use crate::error::HandlerError;

/// Handler set for the reference dispatcher: one dynamic entry point
/// covering every schema function.
///
/// Invoked only after a fully successful decode; `arguments` matches the
/// signature's declared tags in order.
pub trait DynHandlers {
    fn call(&mut self, function: &str, arguments: &[Value]) -> Result<Value, HandlerError>;
}

impl<F> DynHandlers for F
where
    F: FnMut(&str, &[Value]) -> Result<Value, HandlerError>,
{
    fn call(&mut self, function: &str, arguments: &[Value]) -> Result<Value, HandlerError> {
        self(function, arguments)
    }
}

/// Dispatch one request frame against a schema and handler set.
///
/// Always returns exactly one well-formed response frame. Decode failures
/// are answered with an error response and isolated to their own call;
/// the dispatcher itself holds no state between calls.
pub fn dispatch(schema: &Schema, handlers: &mut dyn DynHandlers, request: &[u8]) -> Vec<u8> {
    let req = match frame::parse_request(request) {
        Ok(req) => req,
        Err(err) => return error_response(&err, None),
    };
    let call_id = req.call_id;

    let signature = match req.target {
        CallTarget::Index(index) => {
            match u32::try_from(index).ok().and_then(|i| schema.lookup(i)) {
                Some(signature) => signature,
                None => return error_response(&DecodeError::UnknownIndex { index }, call_id),
            }
        }
        CallTarget::Name(name) => match schema.lookup_name(name) {
            Some(entry) => &entry.signature,
            None => {
                return frame::encode_error_response(
                    ResponseCode::MethodNotFound,
                    ResponseCode::MethodNotFound.message(),
                    call_id,
                );
            }
        },
    };

    if req.arg_count != signature.arity() as u64 {
        let err = DecodeError::WrongArgumentCount {
            expected: signature.arity(),
            found: req.arg_count as usize,
        };
        return error_response(&err, call_id);
    }

    let mut args = req.args;
    let mut arguments = Vec::with_capacity(signature.arity());
    for &tag in &signature.argument_types {
        match args.read_tagged(tag) {
            Ok(value) => arguments.push(value),
            Err(err) => return error_response(&err, call_id),
        }
    }

    match handlers.call(&signature.name, &arguments) {
        Ok(value) => frame::encode_ok_response(&value, call_id),
        Err(err) => {
            frame::encode_error_response(ResponseCode::HandlerError, &err.message, call_id)
        }
    }
}

fn error_response(err: &DecodeError, call_id: Option<u64>) -> Vec<u8> {
    frame::encode_error_response(frame::response_code(err), &err.to_string(), call_id)
}
