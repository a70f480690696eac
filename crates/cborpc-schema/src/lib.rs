//! cborpc schema parser: schema text to a raw ordered function table.
//!
//! The schema source is a JSON object mapping function names to arrays of
//! tag-name strings:
//!
//! ```json
//! {
//!     "alarm_set": ["unsigned_integer", "bool"],
//!     "alarm_clear": []
//! }
//! ```
//!
//! Key order is insertion order and is significant data: it determines
//! dispatch index assignment downstream. Parsing preserves it exactly and
//! performs no validation beyond structural shape — name and tag checks
//! belong to the validator.

mod error;
mod parse;

pub use error::ParseError;
pub use parse::{parse_schema, RawEntry, RawSchema};
