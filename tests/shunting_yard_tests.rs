//! Shunting-yard properties: grouping balance and the RPN law, exercised
//! through `tokenize` + `to_rpn`.

use criteria_eval::{to_rpn, tokenize, OperatorKind, SyntaxErrorKind, Token, TokenKind};

fn postfix(criterion: &str) -> Vec<Token> {
    let tokens = tokenize(criterion).unwrap();
    to_rpn(&tokens).unwrap()
}

#[test]
fn postfix_never_contains_grouping_tokens() {
    let rpn = postfix("(a=1 OR b=2) AND c=3");
    assert!(!rpn.iter().any(|t| t.kind == TokenKind::Grouping));
}

#[test]
fn postfix_carries_the_same_multiset_of_leaf_text() {
    let tokens = tokenize("(a=1 OR b=2) AND c=3").unwrap();
    let rpn = to_rpn(&tokens).unwrap();

    let mut infix_leaves: Vec<&str> = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Variable | TokenKind::Constant))
        .map(|t| t.text.as_str())
        .collect();
    infix_leaves.sort_unstable();

    let mut rpn_leaves: Vec<&str> = rpn
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Variable | TokenKind::Constant))
        .map(|t| t.text.as_str())
        .collect();
    rpn_leaves.sort_unstable();

    assert_eq!(infix_leaves, rpn_leaves);

    let grouping_count = tokens.iter().filter(|t| t.kind == TokenKind::Grouping).count();
    assert_eq!(tokens.len() - grouping_count, rpn.len(), "postfix drops parens but keeps every other token");
}

#[test]
fn and_outranks_or_in_postfix_emission_order() {
    let rpn = postfix("a=1 OR b=2 AND c=3");
    let ops: Vec<OperatorKind> = rpn.iter().map(|t| t.op).collect();
    let and_pos = ops.iter().position(|o| *o == OperatorKind::And).unwrap();
    let or_pos = ops.iter().position(|o| *o == OperatorKind::Or).unwrap();
    assert!(and_pos < or_pos);
}

#[test]
fn grouping_overrides_precedence_in_emission_order() {
    let rpn = postfix("(a=1 OR b=2) AND c=3");
    let ops: Vec<OperatorKind> = rpn.iter().map(|t| t.op).collect();
    let and_pos = ops.iter().position(|o| *o == OperatorKind::And).unwrap();
    let or_pos = ops.iter().position(|o| *o == OperatorKind::Or).unwrap();
    assert!(or_pos < and_pos);
}

#[test]
fn unmatched_opening_paren_fails_in_shunting_yard_not_later() {
    let tokens = vec![
        Token::new("(", TokenKind::Grouping, OperatorKind::GroupingStart),
        Token::new("a", TokenKind::Variable, OperatorKind::None),
    ];
    let err = to_rpn(&tokens).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MismatchedParentheses);
}

#[test]
fn unmatched_closing_paren_fails_in_shunting_yard_not_later() {
    let tokens = vec![
        Token::new("a", TokenKind::Variable, OperatorKind::None),
        Token::new(")", TokenKind::Grouping, OperatorKind::GroupingEnd),
    ];
    let err = to_rpn(&tokens).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::MismatchedParentheses);
}
