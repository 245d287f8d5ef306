use serde_json::Value;
use thiserror::Error;

use crate::domain::value::kind_name;
use crate::domain::value_path::{PathSegment, ValuePath, ValuePathError};

/// Reasons a path expression does not resolve inside a document.
///
/// `path` fields carry the canonical form of the prefix that did resolve.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error(transparent)]
    InvalidPath(#[from] ValuePathError),

    #[error("key `{key}` not found under `{path}`")]
    MissingKey { path: String, key: String },

    #[error("index {index} out of bounds under `{path}` (length {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("can't get {segment} from {kind} at `{path}`")]
    NotTraversable {
        path: String,
        segment: String,
        kind: &'static str,
    },
}

/// Resolves a path expression against `document`.
pub fn locate<'a>(document: &'a Value, path: &str) -> Result<&'a Value, LocateError> {
    let parsed = ValuePath::parse(path)?;
    locate_path(document, &parsed)
}

pub fn locate_path<'a>(document: &'a Value, path: &ValuePath) -> Result<&'a Value, LocateError> {
    let mut current = document;
    let mut resolved = Vec::with_capacity(path.segments().len());
    for segment in path.segments() {
        let traversed = || ValuePath::from_segments(resolved.clone()).to_string();
        let not_traversable = || LocateError::NotTraversable {
            path: traversed(),
            segment: segment.to_string(),
            kind: kind_name(current),
        };
        let (next, step) = match current {
            Value::Object(map) => match segment {
                PathSegment::Key(key) => {
                    let next = map.get(key).ok_or_else(|| LocateError::MissingKey {
                        path: traversed(),
                        key: key.clone(),
                    })?;
                    (next, segment.clone())
                }
                PathSegment::Index(_) => return Err(not_traversable()),
            },
            // dotted digits (`items.0`) index sequences as well
            Value::Array(items) => match segment.as_index() {
                Some(index) => {
                    let next = items.get(index).ok_or_else(|| LocateError::IndexOutOfBounds {
                        path: traversed(),
                        index,
                        len: items.len(),
                    })?;
                    (next, PathSegment::Index(index))
                }
                None => return Err(not_traversable()),
            },
            _ => return Err(not_traversable()),
        };
        current = next;
        resolved.push(step);
    }
    Ok(current)
}
