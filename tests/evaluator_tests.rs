//! Value coercion and operator semantics, exercised through the public
//! `evaluate` entry point.

use criteria_eval::{evaluate, Attrs, Value};

fn host(pairs: &[(&str, Value)]) -> Attrs {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn missing_attributes_resolve_to_null_not_an_error() {
    let attrs = Attrs::default();
    assert!(!evaluate(r#"foo="x""#, &attrs).unwrap());
    assert!(evaluate("foo ISNULL", &attrs).unwrap());
    assert!(!evaluate("NOT foo ISNULL", &attrs).unwrap());
}

#[test]
fn numeric_strings_compare_numerically_falling_back_to_lexical() {
    let numeric = host(&[("x", Value::Str("10".into()))]);
    assert!(evaluate(r#"x>"9""#, &numeric).unwrap());

    let non_numeric = host(&[("x", Value::Str("10a".into()))]);
    assert!(!evaluate(r#"x>"9""#, &non_numeric).unwrap());
}

#[test]
fn booleans_coerce_to_one_and_zero() {
    let attrs = host(&[("flag", Value::Bool(true))]);
    assert!(evaluate("flag>0", &attrs).unwrap());
    assert!(evaluate("flag EQ 1", &attrs).unwrap());
}

#[test]
fn greater_zero_requires_a_numeric_operand() {
    let attrs = host(&[("name", Value::Str("not-a-number".into()))]);
    let err = evaluate("name GTZ", &attrs).unwrap_err();
    assert!(matches!(err, criteria_eval::Error::Eval(e) if e.kind == criteria_eval::EvalErrorKind::NotNumeric));
}

#[test]
fn any_on_a_scalar_is_not_a_collection() {
    let attrs = host(&[("name", Value::Str("x".into()))]);
    let err = evaluate("name ANY", &attrs).unwrap_err();
    match err {
        criteria_eval::Error::Eval(e) => assert_eq!(e.kind, criteria_eval::EvalErrorKind::NotACollection),
        other => panic!("expected an eval error, got {other:?}"),
    }
}

#[test]
fn like_pattern_wildcards_match_prefix_and_suffix() {
    let attrs = host(&[("name", Value::Str("web-01".into()))]);
    assert!(evaluate(r#"name LIKE "web-%""#, &attrs).unwrap());
    assert!(evaluate(r#"name LIKE "%-01""#, &attrs).unwrap());
    assert!(!evaluate(r#"name LIKE "db-%""#, &attrs).unwrap());
}

#[test]
fn logical_and_or_combine_two_clauses() {
    let attrs = host(&[("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert!(evaluate("a=1 AND b=2", &attrs).unwrap());
    assert!(!evaluate("a=1 AND b=3", &attrs).unwrap());
    assert!(evaluate("a=1 OR b=3", &attrs).unwrap());
}

#[test]
fn not_negates_the_following_clause() {
    let attrs = host(&[("a", Value::Int(1))]);
    assert!(!evaluate("NOT a=1", &attrs).unwrap());
    assert!(evaluate("NOT a=2", &attrs).unwrap());
}
