use thiserror::Error;

/// A schema text parse error. Fatal to the generation run.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input is not valid JSON at all.
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an object.
    #[error("schema root must be an object mapping function names to tag lists")]
    RootNotAnObject,

    /// A function's argument list is not an array.
    #[error("arguments of `{function}` must be an array of tag names")]
    ArgumentsNotAnArray { function: String },

    /// An argument entry is not a string.
    #[error("argument {position} of `{function}` must be a tag name string")]
    TagNotAString { function: String, position: usize },
}
