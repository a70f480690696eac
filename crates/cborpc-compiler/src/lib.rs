//! cborpc compiler: orchestrates the full generation pipeline.
//!
//! ```text
//! Schema text → Parser → Validator → Codec/Dispatch Generation → Artifacts
//! ```
//!
//! One invocation is a pure batch run: the same schema text always yields
//! byte-identical artifacts and the same schema hash, and any error aborts
//! the run with no partial output.

pub mod hash;
pub mod validate;

use cborpc_codegen::{generate_artifacts, CodegenError, GeneratedArtifact, DEFAULT_STEM};
use cborpc_schema::{parse_schema, ParseError};
use cborpc_types::{Schema, SchemaError};
use thiserror::Error;

/// Options for one generation run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Stem for artifact file names (`<stem>_caller.rs`,
    /// `<stem>_dispatcher.rs`).
    pub stem: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            stem: DEFAULT_STEM.to_owned(),
        }
    }
}

/// Everything a successful generation run produces.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub schema: Schema,
    pub schema_hash: String,
    pub artifacts: Vec<GeneratedArtifact>,
}

/// A fatal compile error. Every variant aborts the run; no partial
/// artifacts are ever emitted.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Run the full pipeline over schema text.
pub fn compile(schema_text: &str, options: &CompileOptions) -> Result<CompileOutput, CompileError> {
    let raw = parse_schema(schema_text)?;
    let schema = validate::validate(&raw)?;
    let schema_hash = hash::schema_hash(&schema);
    let artifacts = generate_artifacts(&schema, &schema_hash, &options.stem)?;
    Ok(CompileOutput {
        schema,
        schema_hash,
        artifacts,
    })
}

/// Parse and validate only, without generating artifacts.
pub fn check(schema_text: &str) -> Result<Schema, CompileError> {
    let raw = parse_schema(schema_text)?;
    Ok(validate::validate(&raw)?)
}
