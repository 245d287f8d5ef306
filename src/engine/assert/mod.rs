pub mod context;
pub mod every_contains;
pub mod matcher;
pub mod report;

use serde_json::Value;

use crate::domain::error::SuiteError;
use crate::domain::report::{AssertionResult, SuiteReport};
use crate::domain::rules::{AssertionRule, AssertionSuite};

pub use context::{Validatable, ValidateContext, ValidationOutcome};
pub use every_contains::EveryContainsValidator;
pub use matcher::{ContentMatcher, key_value_match};

/// A validator resolved from one suite entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    EveryContains(EveryContainsValidator),
}

impl Assertion {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EveryContains(_) => "everyContains",
        }
    }

    fn validator(&self) -> &dyn Validatable {
        match self {
            Self::EveryContains(validator) => validator,
        }
    }
}

impl Validatable for Assertion {
    fn validate(&self, context: &ValidateContext<'_>) -> ValidationOutcome {
        self.validator().validate(context)
    }
}

/// Checks that every suite entry declares a validator before anything runs.
pub fn compile_suite(suite: &AssertionSuite) -> Result<Vec<Assertion>, SuiteError> {
    suite
        .asserts
        .iter()
        .enumerate()
        .map(|(index, rule)| compile_rule(index, rule))
        .collect()
}

fn compile_rule(index: usize, rule: &AssertionRule) -> Result<Assertion, SuiteError> {
    match &rule.every_contains {
        Some(body) => Ok(Assertion::EveryContains(body.clone().into())),
        None => Err(SuiteError::MissingValidator { index }),
    }
}

/// Runs every assertion of `suite` against `docs`, in order.
pub fn execute_suite(docs: &[Value], suite: &AssertionSuite) -> Result<SuiteReport, SuiteError> {
    let assertions = compile_suite(suite)?;
    let results = assertions
        .iter()
        .zip(&suite.asserts)
        .enumerate()
        .map(|(index, (assertion, rule))| {
            let context = ValidateContext::new(docs)
                .with_index(rule.document_index)
                .negated(rule.not);
            let outcome = assertion.validate(&context);
            tracing::debug!(index, kind = assertion.kind(), passed = outcome.passed, "assertion evaluated");
            AssertionResult {
                index,
                kind: assertion.kind().to_string(),
                negative: rule.not,
                passed: outcome.passed,
                messages: outcome.messages,
            }
        })
        .collect();
    Ok(SuiteReport::from_results(results))
}
