//! Schema hashing.
//!
//! The schema is the single source of truth for both sides of the
//! boundary. Its digest is embedded in both generated artifacts so two
//! independently compiled binaries can assert at startup that they were
//! generated from the same interface rather than from locally diverged
//! copies.

use cborpc_types::Schema;
use sha2::{Digest, Sha256};

/// SHA-256 over the canonical schema rendering, as lowercase hex.
///
/// Canonical form is one line per entry, in dispatch order:
/// `<index> <name>(<tag>,<tag>,…)`. Any change to a name, a tag list, or
/// an index assignment changes the digest; formatting of the schema
/// source text does not.
pub fn schema_hash(schema: &Schema) -> String {
    let mut hasher = Sha256::new();
    for entry in schema.entries() {
        let tags: Vec<&str> = entry
            .signature
            .argument_types
            .iter()
            .map(|tag| tag.name())
            .collect();
        hasher.update(format!(
            "{} {}({})\n",
            entry.index,
            entry.signature.name,
            tags.join(",")
        ));
    }

    let mut hex = String::with_capacity(64);
    for byte in hasher.finalize() {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}
