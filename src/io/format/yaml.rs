use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::io::IoError;

/// Reads a multi-document YAML stream, skipping empty documents and resolving
/// `<<` merge keys.
pub fn read_yaml<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_reader(reader) {
        let mut yaml_value = serde_yaml::Value::deserialize(document)?;
        if yaml_value.is_null() {
            continue;
        }
        yaml_value.apply_merge()?;
        documents.push(serde_json::to_value(yaml_value)?);
    }
    Ok(documents)
}
