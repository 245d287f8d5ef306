use std::io::Read;

use serde_json::{Deserializer, Value};

use crate::io::IoError;

/// Reads a stream of whitespace-separated JSON documents.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut documents = Vec::new();
    for document in Deserializer::from_reader(reader).into_iter::<Value>() {
        documents.push(document?);
    }
    Ok(documents)
}
