//! Transition enforcement, clause-shape validation, and lexer edge cases,
//! exercised end to end through the public `tokenize` entry point.

use criteria_eval::{tokenize, SyntaxErrorKind};

fn syntax_error_kind(criterion: &str) -> SyntaxErrorKind {
    match tokenize(criterion) {
        Ok(tokens) => panic!("expected a syntax error, got {tokens:?}"),
        Err(criteria_eval::Error::Syntax(e)) => e.kind,
        Err(other) => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn two_variables_back_to_back_is_illegal() {
    assert_eq!(syntax_error_kind("foo bar"), SyntaxErrorKind::UnexpectedToken);
}

#[test]
fn starting_an_expression_with_a_logical_operator_is_illegal() {
    assert_eq!(syntax_error_kind("AND foo=bar"), SyntaxErrorKind::IllegalTransition);
}

#[test]
fn and_mid_clause_is_rejected_as_clause_invalid() {
    // `AND` would otherwise be legal here, but not while a clause is open.
    assert_eq!(syntax_error_kind("foo AND bar=1"), SyntaxErrorKind::UnexpectedToken);
}

#[test]
fn a_clause_left_dangling_on_a_comparison_operator_is_malformed() {
    assert_eq!(syntax_error_kind("foo="), SyntaxErrorKind::MalformedClause);
}

#[test]
fn starting_an_expression_with_a_comparison_operator_is_illegal() {
    assert_eq!(syntax_error_kind("=foo"), SyntaxErrorKind::IllegalTransition);
}

#[test]
fn quoted_constants_may_contain_spaces_and_operators() {
    let tokens = tokenize(r#"name="web server 01""#).unwrap();
    assert_eq!(tokens[2].text, "web server 01");
}

#[test]
fn single_and_double_quotes_are_both_accepted() {
    let a = tokenize(r#"name="x""#).unwrap();
    let b = tokenize("name='x'").unwrap();
    assert_eq!(a[2].text, b[2].text);
}

#[test]
fn not_folds_into_a_following_unary_operator() {
    let tokens = tokenize("deprecated NOT ISNULL").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].text, "NOT");
}

#[test]
fn grouping_is_legal_at_the_start_of_an_expression_and_after_logical_operators() {
    tokenize("(a=1)").unwrap();
    tokenize("(a=1) AND (b=2)").unwrap();
}

#[test]
fn is_not_combinators_are_accepted_as_alternate_spellings() {
    let plain = tokenize("deprecated ISNOTNULL").unwrap();
    let spelled_out = tokenize("deprecated IS NOT NULL").unwrap();
    assert_eq!(plain.len(), spelled_out.len());
    for (a, b) in plain.iter().zip(spelled_out.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.op, b.op);
    }
}

#[test]
fn identifiers_may_contain_body_symbols() {
    let tokens = tokenize("host-01_region.a=1").unwrap();
    assert_eq!(tokens[0].text, "host-01_region.a");
}
