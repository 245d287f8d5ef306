use serde_json::Value;

use crate::util::sort::sort_value_keys;

/// Canonical string form used when comparing a field against expected content.
///
/// Strings render raw, numbers and booleans through their display form, `null`
/// as `null`, and composites as compact JSON with recursively sorted keys.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(&sort_value_keys(value))
            .unwrap_or_else(|_| "<serialization-error>".to_string()),
    }
}

pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Uniform field lookup over document values.
pub trait FieldAccess {
    /// Stringified value stored under `key`; absent keys, and every key of a
    /// non-mapping value, render as the empty string.
    fn stringify_field(&self, key: &str) -> String;
}

impl FieldAccess for Value {
    fn stringify_field(&self, key: &str) -> String {
        match self {
            Value::Object(map) => map.get(key).map(stringify).unwrap_or_default(),
            _ => String::new(),
        }
    }
}
