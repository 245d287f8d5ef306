use docassert::domain::value::stringify;
use docassert::engine::r#assert::key_value_match;
use docassert::engine::r#assert::report::marshal_yaml;
use serde_json::{Map, Value, json};

fn object(entries: Vec<(&str, Value)>) -> Value {
    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<Map<String, Value>>(),
    )
}

fn pod_declared_spec_first() -> Value {
    object(vec![
        (
            "spec",
            object(vec![
                ("ports", Value::Array(vec![object(vec![("port", json!(80)), ("name", json!("http"))])])),
                ("affinity", Value::Null),
            ]),
        ),
        ("kind", json!("Pod")),
    ])
}

fn pod_declared_kind_first() -> Value {
    object(vec![
        ("kind", json!("Pod")),
        (
            "spec",
            object(vec![
                ("affinity", Value::Null),
                ("ports", Value::Array(vec![object(vec![("name", json!("http")), ("port", json!(80))])])),
            ]),
        ),
    ])
}

#[test]
fn stringify_ignores_insertion_order() {
    let expected = r#"{"kind":"Pod","spec":{"affinity":null,"ports":[{"name":"http","port":80}]}}"#;
    assert_eq!(stringify(&pod_declared_spec_first()), expected);
    assert_eq!(stringify(&pod_declared_kind_first()), expected);
}

#[test]
fn nested_content_matches_regardless_of_key_order() {
    let actual = object(vec![("pod", pod_declared_spec_first())]);
    let expected = object(vec![("pod", pod_declared_kind_first())]);
    assert!(key_value_match(&actual, &expected, false, false));
    assert!(!key_value_match(&actual, &expected, false, true));
}

#[test]
fn yaml_report_is_stable_across_insertion_orders() {
    let first = marshal_yaml(&pod_declared_spec_first());
    let second = marshal_yaml(&pod_declared_kind_first());
    assert_eq!(first, second);

    let position = |needle: &str| first.find(needle).expect(needle);
    assert!(position("kind: Pod") < position("spec:"));
    assert!(position("affinity: null") < position("ports:"));
    assert!(position("name: http") < position("port: 80"));
}
