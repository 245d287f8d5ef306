use std::io::Cursor;

use docassert::engine::r#assert::{EveryContainsValidator, Validatable, ValidateContext};
use docassert::io::Format;
use docassert::io::reader::read_documents;
use serde_json::{Value, json};

const RENDERED: &str = "\
---
items:
  - name: a
    ready: true
  - name: b
    ready: true
---
kind: Deployment
spec:
  template:
    spec:
      containers:
        - name: web
          image: registry.local/web:1.4.2
          imagePullPolicy: IfNotPresent
        - name: sidecar
          image: registry.local/proxy:0.9.0
          imagePullPolicy: IfNotPresent
";

fn documents() -> Vec<Value> {
    read_documents(Cursor::new(RENDERED), Format::Yaml).expect("rendered documents")
}

#[test]
fn every_element_contains_content() {
    let docs = documents();
    let outcome = EveryContainsValidator::new("items", json!({"ready": true}))
        .validate(&ValidateContext::new(&docs));
    assert!(outcome.passed);
    assert!(outcome.messages.is_empty());
}

#[test]
fn first_offending_element_is_reported() {
    let docs = documents();
    let outcome = EveryContainsValidator::new("items", json!({"ready": false}))
        .validate(&ValidateContext::new(&docs));
    assert!(!outcome.passed);
    assert_eq!(
        outcome.messages,
        vec![
            "Path:\titems",
            "Expected to contain:",
            "\t- ready: false",
            "Actual:",
            "\tname: a",
            "\tready: true",
        ]
    );
}

#[test]
fn negation_inverts_each_field() {
    let docs = documents();
    let outcome = EveryContainsValidator::new("items", json!({"ready": false}))
        .validate(&ValidateContext::new(&docs).negated(true));
    assert!(outcome.passed);
}

#[test]
fn scalar_target_is_an_error_not_a_contains_failure() {
    let docs = documents();
    let outcome = EveryContainsValidator::new("items.0.name", json!({"ready": true}))
        .validate(&ValidateContext::new(&docs));
    assert!(!outcome.passed);
    assert_eq!(outcome.messages[0], "Error:");
    assert!(outcome.messages.iter().all(|line| !line.starts_with("Path:")));
    assert!(outcome.messages.iter().any(|line| line.contains("items.0.name")));
}

#[test]
fn bad_path_and_assertion_failure_use_distinct_templates() {
    let docs = documents();
    let content = json!({"ready": false});
    let resolution = EveryContainsValidator::new("itemz", content.clone())
        .validate(&ValidateContext::new(&docs));
    let assertion =
        EveryContainsValidator::new("items", content).validate(&ValidateContext::new(&docs));
    assert!(!resolution.passed && !assertion.passed);
    assert_eq!(resolution.messages[0], "Error:");
    assert_eq!(assertion.messages[0], "Path:\titems");
}

#[test]
fn selects_document_by_index() {
    let docs = documents();
    let validator = EveryContainsValidator::new(
        "spec.template.spec.containers",
        json!({"image": "^registry\\.local/", "imagePullPolicy": "IfNotPresent"}),
    )
    .with_regex(true);

    assert!(
        validator
            .validate(&ValidateContext::new(&docs).with_index(Some(1)))
            .passed
    );

    let outcome = validator.validate(&ValidateContext::new(&docs));
    assert_eq!(outcome.messages[0], "Error:");
}

#[test]
fn negated_regex_reports_the_matching_element() {
    let docs = documents();
    let outcome = EveryContainsValidator::new(
        "spec.template.spec.containers",
        json!({"image": "proxy"}),
    )
    .with_regex(true)
    .validate(&ValidateContext::new(&docs).with_index(Some(1)).negated(true));

    assert!(!outcome.passed);
    assert_eq!(outcome.messages[1], "Expected NOT to contain:");
    assert!(outcome.messages.contains(&"\tname: sidecar".to_string()));
    assert!(!outcome.messages.contains(&"\tname: web".to_string()));
}

#[test]
fn merged_anchor_fields_are_matched() {
    let rendered = "\
defaults: &defaults
  ready: true
items:
  - <<: *defaults
    name: a
  - <<: *defaults
    name: b
";
    let docs = read_documents(Cursor::new(rendered), Format::Yaml).expect("documents");
    let outcome = EveryContainsValidator::new("items", json!({"ready": true}))
        .validate(&ValidateContext::new(&docs));
    assert!(outcome.passed, "{:?}", outcome.messages);
}
