use std::io::Cursor;

use docassert::cmd::check::load_suite;
use docassert::engine::r#assert::execute_suite;
use docassert::io::Format;
use docassert::io::reader::read_documents;
use tempfile::tempdir;

const MANIFESTS: &str = "\
kind: ConfigMap
data:
  mode: strict
---
kind: Deployment
spec:
  template:
    spec:
      containers:
        - name: web
          securityContext:
            runAsNonRoot: true
        - name: metrics
          securityContext:
            runAsNonRoot: true
";

const SUITE: &str = "\
asserts:
  - everyContains:
      path: spec.template.spec.containers
      content:
        securityContext:
          runAsNonRoot: true
    documentIndex: 1
  - everyContains:
      path: spec.template.spec.containers
      content:
        name: ^debug
      regex: true
    not: true
    documentIndex: 1
  - everyContains:
      path: data
      content: {}
";

#[test]
fn runs_yaml_suite_against_rendered_manifests() {
    let dir = tempdir().expect("tempdir");
    let suite_path = dir.path().join("suite.yaml");
    std::fs::write(&suite_path, SUITE).expect("write suite");

    let suite = load_suite(&suite_path).expect("suite");
    let docs = read_documents(Cursor::new(MANIFESTS), Format::Yaml).expect("documents");
    let report = execute_suite(&docs, &suite).expect("report");

    assert_eq!(report.results.len(), 3);
    assert!(report.results[0].passed, "{:?}", report.results[0].messages);
    assert!(report.results[1].passed, "{:?}", report.results[1].messages);
    assert!(report.results[1].negative);

    let not_array = &report.results[2];
    assert!(!not_array.passed);
    assert_eq!(
        not_array.messages,
        vec![
            "Error:",
            "\texpect 'data' to be an array, got:",
            "\tmode: strict",
        ]
    );
    assert_eq!(report.failed_count, 1);
    assert!(!report.passed);
}

#[test]
fn report_serializes_in_assertion_order() {
    let dir = tempdir().expect("tempdir");
    let suite_path = dir.path().join("suite.json");
    std::fs::write(
        &suite_path,
        r#"{"asserts": [
            {"everyContains": {"path": "items", "content": {"ok": true}}},
            {"everyContains": {"path": "items", "content": {"ok": true}}, "not": true}
        ]}"#,
    )
    .expect("write suite");

    let suite = load_suite(&suite_path).expect("suite");
    let docs = read_documents(Cursor::new(r#"{"items": [{"ok": true}]}"#), Format::Json)
        .expect("documents");
    let report = execute_suite(&docs, &suite).expect("report");

    let as_json = serde_json::to_string(&report).expect("serialize");
    assert_eq!(
        as_json,
        r#"{"passed":false,"failed_count":1,"results":[{"index":0,"kind":"everyContains","negative":false,"passed":true,"messages":[]},{"index":1,"kind":"everyContains","negative":true,"passed":false,"messages":["Path:\titems","Expected NOT to contain:","\t- ok: true","Actual:","\tok: true"]}]}"#
    );
}
