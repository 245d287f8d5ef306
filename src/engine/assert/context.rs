use serde::Serialize;
use serde_json::Value;

use crate::domain::error::ContextError;

/// Per-invocation inputs shared by every validator.
#[derive(Debug, Clone, Copy)]
pub struct ValidateContext<'a> {
    pub docs: &'a [Value],
    /// Document to assert on; the first one when `None`.
    pub index: Option<usize>,
    pub negative: bool,
}

impl<'a> ValidateContext<'a> {
    pub fn new(docs: &'a [Value]) -> Self {
        Self {
            docs,
            index: None,
            negative: false,
        }
    }

    pub fn with_index(mut self, index: Option<usize>) -> Self {
        self.index = index;
        self
    }

    pub fn negated(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Target document of the assertion.
    pub fn manifest(&self) -> Result<&'a Value, ContextError> {
        if self.docs.is_empty() {
            return Err(ContextError::NoDocuments);
        }
        let index = self.index.unwrap_or(0);
        self.docs.get(index).ok_or(ContextError::IndexOutOfRange {
            index,
            len: self.docs.len(),
        })
    }
}

/// Result of one validator run. `messages` is empty when `passed`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub messages: Vec<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            messages: Vec::new(),
        }
    }

    pub fn fail(messages: Vec<String>) -> Self {
        Self {
            passed: false,
            messages,
        }
    }
}

/// Contract implemented by every assertion type.
pub trait Validatable {
    fn validate(&self, context: &ValidateContext<'_>) -> ValidationOutcome;
}
