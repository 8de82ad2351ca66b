//! Input-schema sanitation for tools coming from a remote catalog.
//!
//! Remote schemas may point into definitions the host cannot resolve
//! (`$ref` into `$defs`, meta-schema URLs). Those keywords are stripped at
//! every nesting level, inside objects and arrays alike; every other key,
//! including nested `properties`, is kept.

use serde_json::{Map, Value};

/// Keys removed from remote schemas wherever they appear
pub const STRIPPED_SCHEMA_KEYS: [&str; 4] = ["$schema", "$ref", "definitions", "$defs"];

pub fn sanitize_schema(schema: Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !STRIPPED_SCHEMA_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key, sanitize_schema(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_schema).collect()),
        scalar => scalar,
    }
}
