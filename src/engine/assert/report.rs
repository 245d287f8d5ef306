use serde_json::Value;

use crate::domain::value::stringify;
use crate::util::sort::sort_value_keys;

/// Template for resolution errors (missing document, unresolvable path, wrong kind).
pub const ERROR_FORMAT: &str = "
Error:
%s
";

const PLACEHOLDER: &str = "%s";

/// Fills the `%s` markers of `template` in order and splits the result into lines.
///
/// The template is trimmed of surrounding blanks; each replacement is trimmed
/// and every one of its lines is prefixed with a tab. Markers without a
/// replacement are left in place.
pub fn split_infof(template: &str, replacements: &[&str]) -> Vec<String> {
    let template = template.trim_matches(is_blank);
    let mut replacements = replacements.iter();
    let mut filled = String::with_capacity(template.len());
    let mut parts = template.split(PLACEHOLDER).peekable();
    while let Some(part) = parts.next() {
        filled.push_str(part);
        if parts.peek().is_none() {
            break;
        }
        match replacements.next() {
            Some(replacement) => filled.push_str(&indent(replacement)),
            None => filled.push_str(PLACEHOLDER),
        }
    }
    filled.split('\n').map(ToOwned::to_owned).collect()
}

pub fn error_info(message: &str) -> Vec<String> {
    split_infof(ERROR_FORMAT, &[message])
}

/// Report for a failed contains-style assertion; `expected` renders as a
/// one-element sequence.
pub fn contains_fail_info(path: &str, expected: &Value, actual: &Value, negative: bool) -> Vec<String> {
    let not_annotation = if negative { " NOT" } else { "" };
    let template = format!(
        "
Path:%s
Expected{not_annotation} to contain:
%s
Actual:
%s
"
    );
    let expected = marshal_yaml(&Value::Array(vec![expected.clone()]));
    let actual = marshal_yaml(actual);
    split_infof(&template, &[path, expected.as_str(), actual.as_str()])
}

/// Deterministic YAML rendering with recursively sorted keys.
pub fn marshal_yaml(value: &Value) -> String {
    serde_yaml::to_string(&sort_value_keys(value)).unwrap_or_else(|error| {
        tracing::warn!(%error, "yaml rendering failed; falling back to canonical string");
        stringify(value)
    })
}

fn indent(replacement: &str) -> String {
    format!("\t{}", replacement.replace('\n', "\n\t").trim_matches(is_blank))
}

fn is_blank(character: char) -> bool {
    matches!(character, '\t' | '\n' | ' ')
}
