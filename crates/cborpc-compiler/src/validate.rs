//! Schema validation: raw table → dispatch entries.

use std::collections::HashSet;

use cborpc_schema::RawSchema;
use cborpc_types::{
    is_valid_function_name, DispatchEntry, FunctionSignature, Schema, SchemaError, TypeTag,
};

/// Validate a raw function table and assign dispatch indices.
///
/// Indices follow first-seen input order, 0-based and contiguous. Input
/// order is significant data, not an artifact to normalize: reordering
/// entries between generator runs changes the on-wire meaning of every
/// shifted index, so nothing here sorts, dedupes, or reorders. Appending
/// a new function leaves every existing index untouched.
///
/// Fails on the first offending entry; no partial schema is returned.
pub fn validate(raw: &RawSchema) -> Result<Schema, SchemaError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.entries.len());

    for (position, raw_entry) in raw.entries.iter().enumerate() {
        if !is_valid_function_name(&raw_entry.name) {
            return Err(SchemaError::InvalidFunctionName {
                position,
                name: raw_entry.name.clone(),
            });
        }
        if !seen.insert(raw_entry.name.as_str()) {
            return Err(SchemaError::DuplicateFunctionName {
                name: raw_entry.name.clone(),
            });
        }

        let mut argument_types = Vec::with_capacity(raw_entry.tags.len());
        for (arg_position, tag) in raw_entry.tags.iter().enumerate() {
            match TypeTag::from_name(tag) {
                Some(tag) => argument_types.push(tag),
                None => {
                    return Err(SchemaError::UnknownTypeTag {
                        function: raw_entry.name.clone(),
                        position: arg_position,
                        tag: tag.clone(),
                    });
                }
            }
        }

        entries.push(DispatchEntry {
            index: position as u32,
            signature: FunctionSignature::new(raw_entry.name.clone(), argument_types),
        });
    }

    Ok(Schema::new(entries))
}
