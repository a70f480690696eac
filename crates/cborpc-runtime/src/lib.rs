//! cborpc runtime: reference dispatcher and support types for generated
//! code.
//!
//! [`dispatch`] interprets a validated [`Schema`](cborpc_types::Schema)
//! directly and defines the execution semantics every generated dispatcher
//! must match: unknown indices are rejected before any argument decode,
//! arguments are checked against the signature one item at a time, the
//! handler runs only after a fully successful decode, and every request —
//! however hostile — is answered with exactly one well-formed response
//! frame.
//!
//! Generated dispatchers import [`HandlerError`] from here, so handler
//! code is portable between the generated and reference paths. Dispatch
//! and encode are pure functions of their inputs: no state is shared
//! between calls, so the caller may serialize invocations however its
//! environment requires.

mod call;
mod dispatch;
mod error;

pub use call::{encode_call, CallError};
pub use dispatch::{dispatch, DynHandlers};
pub use error::HandlerError;
