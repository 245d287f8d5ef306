use std::io::Read;

use serde_json::Value;

use crate::io::format::{json, yaml};
use crate::io::{Format, IoError};

/// Reads every document contained in `reader`.
pub fn read_documents<R: Read>(reader: R, format: Format) -> Result<Vec<Value>, IoError> {
    let documents = match format {
        Format::Json => json::read_json(reader)?,
        Format::Yaml => yaml::read_yaml(reader)?,
    };
    tracing::debug!(format = %format, count = documents.len(), "read documents");
    Ok(documents)
}
