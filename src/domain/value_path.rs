use std::fmt;

use thiserror::Error;

/// One navigation step inside a document tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Returns the sequence index a segment addresses, accepting all-digit keys
    /// written in dotted form (`items.0`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) if !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit()) => {
                key.parse().ok()
            }
            Self::Key(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => {
                let encoded = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                write!(formatter, "[{encoded}]")
            }
            Self::Index(index) => write!(formatter, "[{index}]"),
        }
    }
}

/// Parsed path expression.
///
/// Two spellings are accepted:
///
/// * set-paths such as `spec.containers[0].name`, `items.0.name` or
///   `metadata.labels["app.kubernetes.io/name"]`; the empty string is the root.
/// * canonical paths such as `$["spec"]["containers"][0]`, recognised by a
///   leading `$[` (or a lone `$`). `$schema.type` is a set-path.
///
/// `Display` always renders the canonical form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketStyle {
    Canonical,
    SetPath,
}

impl ValuePath {
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValuePathError> {
        if input == "$" || input.starts_with("$[") {
            Self::parse_canonical(input)
        } else {
            Self::parse_set_path(input)
        }
    }

    pub fn parse_canonical(input: &str) -> Result<Self, ValuePathError> {
        if !input.starts_with('$') {
            return Err(ValuePathError::new(
                input,
                "path must start with `$`".to_string(),
            ));
        }

        let bytes = input.as_bytes();
        let mut cursor = 1;
        let mut segments = Vec::new();
        while cursor < bytes.len() {
            if bytes[cursor] != b'[' {
                return Err(ValuePathError::new(
                    input,
                    format!("expected `[` at byte {cursor}"),
                ));
            }
            let (segment, next) = parse_bracket(input, cursor, BracketStyle::Canonical)?;
            segments.push(segment);
            cursor = next;
        }

        Ok(Self { segments })
    }

    pub fn parse_set_path(input: &str) -> Result<Self, ValuePathError> {
        let bytes = input.as_bytes();
        let mut cursor = 0;
        let mut segments = Vec::new();
        let mut after_dot = false;

        while cursor < bytes.len() {
            match bytes[cursor] {
                b'.' => {
                    if segments.is_empty() || after_dot {
                        return Err(ValuePathError::new(
                            input,
                            format!("empty segment at byte {cursor}"),
                        ));
                    }
                    after_dot = true;
                    cursor += 1;
                }
                b'[' => {
                    if after_dot {
                        return Err(ValuePathError::new(
                            input,
                            format!("expected key after `.` at byte {cursor}"),
                        ));
                    }
                    let (segment, next) = parse_bracket(input, cursor, BracketStyle::SetPath)?;
                    segments.push(segment);
                    cursor = next;
                }
                _ => {
                    if !segments.is_empty() && !after_dot {
                        return Err(ValuePathError::new(
                            input,
                            format!("expected `.` or `[` at byte {cursor}"),
                        ));
                    }
                    let start = cursor;
                    while cursor < bytes.len() && bytes[cursor] != b'.' && bytes[cursor] != b'[' {
                        cursor += 1;
                    }
                    segments.push(PathSegment::Key(input[start..cursor].to_string()));
                    after_dot = false;
                }
            }
        }

        if after_dot {
            return Err(ValuePathError::new(
                input,
                "path cannot end with `.`".to_string(),
            ));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("$")?;
        for segment in &self.segments {
            write!(formatter, "{segment}")?;
        }
        Ok(())
    }
}

/// Parses one `[...]` group starting at `open`; returns the segment and the
/// byte offset just past the closing `]`.
fn parse_bracket(
    input: &str,
    open: usize,
    style: BracketStyle,
) -> Result<(PathSegment, usize), ValuePathError> {
    let bytes = input.as_bytes();
    let mut cursor = open + 1;
    if cursor >= bytes.len() {
        return Err(ValuePathError::new(
            input,
            "path cannot end inside `[`".to_string(),
        ));
    }

    match bytes[cursor] {
        b'"' => {
            let string_start = cursor;
            cursor += 1;
            let mut escaped = false;
            while cursor < bytes.len() {
                match bytes[cursor] {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => break,
                    _ => {}
                }
                cursor += 1;
            }
            if cursor >= bytes.len() {
                return Err(ValuePathError::new(
                    input,
                    "unterminated quoted key".to_string(),
                ));
            }

            let string_end = cursor;
            cursor += 1;
            expect_close(input, cursor)?;
            let key = serde_json::from_str(&input[string_start..=string_end]).map_err(|error| {
                ValuePathError::new(input, format!("invalid quoted key: {error}"))
            })?;
            Ok((PathSegment::Key(key), cursor + 1))
        }
        b'\'' if style == BracketStyle::SetPath => {
            let key_start = cursor + 1;
            let Some(offset) = input[key_start..].find('\'') else {
                return Err(ValuePathError::new(
                    input,
                    "unterminated quoted key".to_string(),
                ));
            };
            cursor = key_start + offset + 1;
            expect_close(input, cursor)?;
            let key = input[key_start..key_start + offset].to_string();
            Ok((PathSegment::Key(key), cursor + 1))
        }
        _ => {
            let content_start = cursor;
            let Some(offset) = input[content_start..].find(']') else {
                return Err(ValuePathError::new(input, "unterminated `[`".to_string()));
            };
            let content = &input[content_start..content_start + offset];
            let close = content_start + offset;

            if !content.is_empty() && content.bytes().all(|byte| byte.is_ascii_digit()) {
                let index = content.parse::<usize>().map_err(|error| {
                    ValuePathError::new(input, format!("invalid index: {error}"))
                })?;
                return Ok((PathSegment::Index(index), close + 1));
            }

            match style {
                BracketStyle::Canonical => Err(ValuePathError::new(
                    input,
                    format!("expected quoted key or numeric index at byte {content_start}"),
                )),
                BracketStyle::SetPath if content.is_empty() => Err(ValuePathError::new(
                    input,
                    format!("empty brackets at byte {open}"),
                )),
                BracketStyle::SetPath => Ok((PathSegment::Key(content.to_string()), close + 1)),
            }
        }
    }
}

fn expect_close(input: &str, cursor: usize) -> Result<(), ValuePathError> {
    if input.as_bytes().get(cursor) == Some(&b']') {
        Ok(())
    } else {
        Err(ValuePathError::new(
            input,
            format!("expected `]` at byte {cursor}"),
        ))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid path `{input}`: {reason}")]
pub struct ValuePathError {
    input: String,
    reason: String,
}

impl ValuePathError {
    fn new(input: &str, reason: String) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}
