use serde_json::{Map, Value};

/// Deep copy of `value` whose mapping keys are in ascending order at every level.
pub fn sort_value_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|left, right| left.0.cmp(right.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(key, child)| (key.clone(), sort_value_keys(child)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_value_keys).collect()),
        _ => value.clone(),
    }
}
