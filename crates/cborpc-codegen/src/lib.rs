//! cborpc code generator: renders a validated schema into two Rust source
//! artifacts that must agree bit-for-bit on indices and encodings.
//!
//! # Generated artifact contract
//!
//! Both artifacts reference the `cborpc-wire` runtime crate and embed the
//! same `SCHEMA_HASH` constant so independently compiled binaries can
//! assert interface agreement at startup.
//!
//! ## Caller stubs (`<stem>_caller.rs`)
//! - `pub const SCHEMA_HASH: &str`, `pub const FUNCTION_COUNT: u32`
//! - `pub const FN_<NAME>: u32` — dispatch index per function
//! - `pub fn <name>(call_id: Option<u64>, args…) -> Vec<u8>` — encodes a
//!   request frame, one typed parameter per declared argument
//! - re-exports of the wire response parser for reading replies
//!
//! ## Callee dispatcher (`<stem>_dispatcher.rs`)
//! - the same `SCHEMA_HASH` / `FUNCTION_COUNT` constants
//! - `pub trait Handlers` — one typed method per function, returning
//!   `Result<Value, HandlerError>`
//! - `pub fn dispatch<H: Handlers>(handlers: &mut H, request: &[u8]) ->
//!   Vec<u8>` — parses the envelope, rejects unknown indices before any
//!   argument decode, decodes arguments against the signature, invokes the
//!   handler only on full success, and always returns a well-formed
//!   response frame
//!
//! Emission is a pure function of the validated schema: no hidden state,
//! no time or randomness, so repeated runs are byte-identical.

pub mod caller;
pub mod callee;
pub mod codec;
pub mod dispatch;
pub mod emit;
pub mod error;

pub use emit::GeneratedArtifact;
pub use error::{CodegenError, CodegenResult};

use cborpc_types::Schema;

/// Default stem for artifact file names.
pub const DEFAULT_STEM: &str = "rpc_api";

/// Generate both artifacts for a validated schema.
///
/// The order is fixed: caller stubs first, callee dispatcher second.
pub fn generate_artifacts(
    schema: &Schema,
    schema_hash: &str,
    stem: &str,
) -> CodegenResult<Vec<GeneratedArtifact>> {
    Ok(vec![
        caller::generate_caller(schema, schema_hash, stem)?,
        callee::generate_callee(schema, schema_hash, stem)?,
    ])
}
