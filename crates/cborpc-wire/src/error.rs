use cborpc_types::TypeTag;
use thiserror::Error;

/// A wire decode failure.
///
/// These occur at dispatcher runtime and are recoverable per call: the
/// dispatcher maps the failure to a well-formed error response and keeps
/// serving subsequent requests. A malformed request must never escalate to
/// a process-level fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The payload ended before the declared item did.
    #[error("truncated payload: need {needed} more byte(s) at offset {offset}")]
    TruncatedPayload { offset: usize, needed: usize },

    /// The bytes do not form a well-formed item: reserved header bits,
    /// indefinite length, non-shortest-form scalar, invalid UTF-8 in a
    /// text string.
    #[error("malformed encoding at offset {offset}: {reason}")]
    MalformedEncoding { offset: usize, reason: &'static str },

    /// The item is well-formed but not of the declared type.
    #[error("type mismatch at offset {offset}: expected {expected}, found {found}")]
    TypeMismatch {
        offset: usize,
        expected: TypeTag,
        found: &'static str,
    },

    /// The request names a dispatch index no function is assigned to.
    /// Rejected before any argument decode is attempted.
    #[error("unknown dispatch index {index}")]
    UnknownIndex { index: u64 },

    /// The request envelope itself is not acceptable: wrong outer shape,
    /// unexpected key, missing method, oversized method name.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: &'static str },

    /// The argument array length disagrees with the signature arity.
    #[error("wrong argument count: expected {expected}, found {found}")]
    WrongArgumentCount { expected: usize, found: usize },
}
