use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Assertion suite loaded by the `check` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AssertionSuite {
    pub asserts: Vec<AssertionRule>,
}

/// One assertion entry: exactly one validator body plus shared modifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssertionRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_contains: Option<EveryContainsRule>,
    /// Inverts every field comparison of the validator.
    #[serde(default)]
    pub not: bool,
    /// Which rendered document to assert on; the first one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_index: Option<usize>,
}

/// Body of an `everyContains` assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EveryContainsRule {
    pub path: String,
    pub content: Value,
    #[serde(default)]
    pub regex: bool,
}
