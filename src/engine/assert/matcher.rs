use regex::Regex;
use serde_json::Value;

use crate::domain::value::{FieldAccess, stringify};

/// Expected content prepared for repeated matching against sequence elements.
///
/// A mapping is matched field by field (subset match over its keys); any other
/// value is matched against the whole element.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    fields: Vec<FieldMatcher>,
}

#[derive(Debug, Clone)]
struct FieldMatcher {
    /// `None` compares the whole element.
    key: Option<String>,
    expected: Expectation,
}

#[derive(Debug, Clone)]
enum Expectation {
    Literal(String),
    /// `None` when the pattern failed to compile; it never matches.
    Pattern(Option<Regex>),
}

impl ContentMatcher {
    pub fn new(expected: &Value, regex: bool) -> Self {
        let fields = match expected {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| FieldMatcher::new(Some(key.clone()), value, regex))
                .collect(),
            other => vec![FieldMatcher::new(None, other, regex)],
        };
        Self { fields }
    }

    /// True when every expected field passes; with `negative` each field must
    /// *fail* its comparison instead.
    pub fn matches(&self, actual: &Value, negative: bool) -> bool {
        self.fields.iter().all(|field| field.passes(actual, negative))
    }
}

impl FieldMatcher {
    fn new(key: Option<String>, expected: &Value, regex: bool) -> Self {
        let text = stringify(expected);
        let expected = if regex {
            match Regex::new(&text) {
                Ok(pattern) => Expectation::Pattern(Some(pattern)),
                Err(error) => {
                    tracing::warn!(
                        key = key.as_deref().unwrap_or("<element>"),
                        pattern = %text,
                        %error,
                        "invalid pattern never matches"
                    );
                    Expectation::Pattern(None)
                }
            }
        } else {
            Expectation::Literal(text)
        };
        Self { key, expected }
    }

    fn passes(&self, actual: &Value, negative: bool) -> bool {
        let actual = match &self.key {
            Some(key) => actual.stringify_field(key),
            None => stringify(actual),
        };
        let matched = match &self.expected {
            Expectation::Literal(expected) => *expected == actual,
            Expectation::Pattern(Some(pattern)) => pattern.is_match(&actual),
            Expectation::Pattern(None) => false,
        };
        matched != negative
    }
}

/// One-shot form of [`ContentMatcher`].
pub fn key_value_match(actual: &Value, expected: &Value, regex: bool, negative: bool) -> bool {
    ContentMatcher::new(expected, regex).matches(actual, negative)
}
