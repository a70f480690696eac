use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A schema validation error.
///
/// All variants are detected at compile time and are fatal to the
/// generation run: no partial schema is ever emitted downstream. Each
/// carries enough context (function name, argument position) for the
/// caller to report the offending table entry without re-parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaError {
    /// A function name appears more than once in the input table.
    #[error("duplicate function name `{name}`")]
    DuplicateFunctionName { name: String },

    /// A function name is empty, not an identifier, or a reserved word.
    /// `position` is the 0-based entry position in the input table.
    #[error("invalid function name `{name}` at table entry {position}")]
    InvalidFunctionName { position: usize, name: String },

    /// A signature references a tag outside the closed registry.
    /// `position` is the 0-based argument position within the signature.
    #[error("unknown type tag `{tag}` in function `{function}`, argument {position}")]
    UnknownTypeTag {
        function: String,
        position: usize,
        tag: String,
    },
}
