//! Dynamic caller: encode a request from values against a schema.

use cborpc_types::{Schema, TypeTag};
use cborpc_wire::{frame, Value};
use thiserror::Error;

/// A dynamic call that could not be encoded. Caught before anything
/// touches the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("wrong argument count for `{function}`: expected {expected}, found {found}")]
    WrongArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("argument {position} of `{function}` does not fit declared tag `{expected}`")]
    ArgumentMismatch {
        function: String,
        position: usize,
        expected: TypeTag,
    },
}

/// Encode a by-index request for `function`, validating the values
/// against the declared signature first. The wire bytes are identical to
/// what the generated caller stub for the same function produces.
pub fn encode_call(
    schema: &Schema,
    function: &str,
    call_id: Option<u64>,
    arguments: &[Value],
) -> Result<Vec<u8>, CallError> {
    let entry = schema
        .lookup_name(function)
        .ok_or_else(|| CallError::UnknownFunction(function.to_owned()))?;
    let signature = &entry.signature;

    if arguments.len() != signature.arity() {
        return Err(CallError::WrongArgumentCount {
            function: function.to_owned(),
            expected: signature.arity(),
            found: arguments.len(),
        });
    }
    for (position, (value, &tag)) in arguments
        .iter()
        .zip(&signature.argument_types)
        .enumerate()
    {
        if !value.conforms_to(tag) {
            return Err(CallError::ArgumentMismatch {
                function: function.to_owned(),
                position,
                expected: tag,
            });
        }
    }

    Ok(frame::encode_request(
        u64::from(entry.index),
        call_id,
        arguments,
    ))
}
