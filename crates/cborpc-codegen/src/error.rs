//! Codegen error types.

use thiserror::Error;

/// Errors that can occur while rendering source artifacts.
///
/// A validated schema should never trigger these; they guard internal
/// consistency between the validator and the emitters.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// An internal consistency check failed.
    #[error("internal codegen error: {0}")]
    Internal(String),

    /// A function name reached the emitter that cannot be rendered as a
    /// Rust identifier. The validator rejects these up front.
    #[error("unrenderable function name `{0}`")]
    UnrenderableName(String),
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;
