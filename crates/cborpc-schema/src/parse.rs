//! JSON function table parsing.

use crate::error::ParseError;
use serde::de::{MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// One raw table entry: function name and tag names, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub tags: Vec<String>,
}

/// The raw function table in input insertion order, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSchema {
    pub entries: Vec<RawEntry>,
}

/// Key/value pairs of the root object, in document order.
///
/// Deserialized through a map visitor rather than into a JSON object so
/// that duplicate keys survive as separate pairs — the validator must see
/// the actual input to report `DuplicateFunctionName`, not a silently
/// deduplicated view.
struct ObjectPairs(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for ObjectPairs {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = ObjectPairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping function names to tag lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some(pair) = access.next_entry::<String, serde_json::Value>()? {
                    pairs.push(pair);
                }
                Ok(ObjectPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Parse schema text into a [`RawSchema`].
///
/// Key order is preserved exactly as written, duplicates included.
pub fn parse_schema(text: &str) -> Result<RawSchema, ParseError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let pairs = match ObjectPairs::deserialize(&mut deserializer) {
        Ok(pairs) => {
            deserializer.end()?;
            pairs.0
        }
        Err(err) => {
            // Distinguish "valid JSON, wrong root" from broken JSON.
            if let Ok(root) = serde_json::from_str::<serde_json::Value>(text) {
                if !root.is_object() {
                    return Err(ParseError::RootNotAnObject);
                }
            }
            return Err(ParseError::Json(err));
        }
    };

    let mut entries = Vec::with_capacity(pairs.len());
    for (name, args) in pairs {
        let list = match args {
            serde_json::Value::Array(list) => list,
            _ => {
                return Err(ParseError::ArgumentsNotAnArray { function: name });
            }
        };

        let mut tags = Vec::with_capacity(list.len());
        for (position, tag) in list.into_iter().enumerate() {
            match tag {
                serde_json::Value::String(tag) => tags.push(tag),
                _ => {
                    return Err(ParseError::TagNotAString {
                        function: name,
                        position,
                    });
                }
            }
        }
        entries.push(RawEntry { name, tags });
    }

    Ok(RawSchema { entries })
}
