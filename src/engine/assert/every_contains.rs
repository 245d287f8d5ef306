use serde_json::Value;

use crate::domain::rules::EveryContainsRule;
use crate::engine::assert::context::{Validatable, ValidateContext, ValidationOutcome};
use crate::engine::assert::matcher::ContentMatcher;
use crate::engine::assert::report::{contains_fail_info, error_info, marshal_yaml};
use crate::engine::locate::locate;

/// Asserts that the value at `path` is a non-empty sequence whose every
/// element contains `content`.
#[derive(Debug, Clone, PartialEq)]
pub struct EveryContainsValidator {
    pub path: String,
    pub content: Value,
    pub regex: bool,
}

/// First pass over the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ElementScan<'a> {
    /// Scan stopped at the first element that did not match.
    Mismatch { index: usize, element: &'a Value },
    /// Every element was visited.
    Completed { matched: usize },
}

impl EveryContainsValidator {
    pub fn new(path: impl Into<String>, content: Value) -> Self {
        Self {
            path: path.into(),
            content,
            regex: false,
        }
    }

    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    fn fail_info(&self, actual: &Value, negative: bool) -> Vec<String> {
        contains_fail_info(&self.path, &self.content, actual, negative)
    }
}

impl From<EveryContainsRule> for EveryContainsValidator {
    fn from(rule: EveryContainsRule) -> Self {
        Self {
            path: rule.path,
            content: rule.content,
            regex: rule.regex,
        }
    }
}

impl Validatable for EveryContainsValidator {
    fn validate(&self, context: &ValidateContext<'_>) -> ValidationOutcome {
        let manifest = match context.manifest() {
            Ok(manifest) => manifest,
            Err(error) => return ValidationOutcome::fail(error_info(&error.to_string())),
        };

        let actual = match locate(manifest, &self.path) {
            Ok(actual) => actual,
            Err(error) => {
                tracing::debug!(path = %self.path, %error, "path did not resolve");
                return ValidationOutcome::fail(error_info(&error.to_string()));
            }
        };

        let Value::Array(items) = actual else {
            return ValidationOutcome::fail(error_info(&format!(
                "expect '{}' to be an array, got:\n{}",
                self.path,
                marshal_yaml(actual)
            )));
        };

        let matcher = ContentMatcher::new(&self.content, self.regex);
        match scan_elements(items, &matcher, context.negative) {
            ElementScan::Mismatch { index, element } => {
                tracing::debug!(path = %self.path, index, "element does not contain content");
                ValidationOutcome::fail(self.fail_info(element, context.negative))
            }
            ElementScan::Completed { matched } if contains_any(matched) => {
                ValidationOutcome::pass()
            }
            ElementScan::Completed { .. } => {
                ValidationOutcome::fail(self.fail_info(actual, context.negative))
            }
        }
    }
}

pub(crate) fn scan_elements<'a>(
    items: &'a [Value],
    matcher: &ContentMatcher,
    negative: bool,
) -> ElementScan<'a> {
    let mut matched = 0;
    for (index, element) in items.iter().enumerate() {
        if !matcher.matches(element, negative) {
            return ElementScan::Mismatch { index, element };
        }
        matched += 1;
    }
    ElementScan::Completed { matched }
}

/// Second pass: an exhausted scan passes only if something matched.
pub(crate) fn contains_any(matched: usize) -> bool {
    matched > 0
}
