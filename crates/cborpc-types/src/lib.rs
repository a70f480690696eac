//! Shared types for the cborpc compiler.
//!
//! This crate defines the closed type tag registry, the validated schema
//! model (signatures and dispatch entries), and the schema error taxonomy
//! used across all compiler stages.

mod error;
mod registry;
pub mod schema;

pub use error::SchemaError;
pub use registry::{EncodingRule, TypeTag, Width};
pub use schema::{is_valid_function_name, DispatchEntry, FunctionSignature, Schema};

/// Result type used throughout the cborpc compiler.
pub type Result<T> = std::result::Result<T, SchemaError>;
