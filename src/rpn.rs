//! Infix-to-postfix conversion (shunting-yard), turning a flat token stream
//! into reverse-Polish order for the stack-based evaluator.
//!
//! Grounded on `CriteriaUtils.infix_to_postfix` in the original Python
//! `CriteriaUtils.py`.

use smallvec::SmallVec;

use crate::definitions::{self, OperatorKind, TokenKind};
use crate::errors::{SyntaxError, SyntaxErrorKind};
use crate::model::Token;

/// An operator stack rarely holds more than a handful of entries for
/// criteria of ordinary size, so inline the common case.
type OpStack = SmallVec<[Token; 8]>;

/// Convert an already-tokenized, already-validated token stream into
/// postfix order.
///
/// `tokens` is expected to come from [`crate::tokenizer::tokenize`]; this
/// function re-validates parenthesis balance but relies on the tokenizer
/// for clause/transition legality.
pub fn to_rpn(tokens: &[Token]) -> Result<Vec<Token>, SyntaxError> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: OpStack = SmallVec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Variable | TokenKind::Constant => {
                output.push(token.clone());
            }
            TokenKind::Grouping if token.op == OperatorKind::GroupingStart => {
                ops.push(token.clone());
            }
            TokenKind::Grouping if token.op == OperatorKind::GroupingEnd => {
                loop {
                    match ops.pop() {
                        Some(top) if top.op == OperatorKind::GroupingStart => break,
                        Some(top) => output.push(top),
                        None => {
                            return Err(SyntaxError::new(
                                i,
                                SyntaxErrorKind::MismatchedParentheses,
                                "unmatched closing parenthesis",
                            ));
                        }
                    }
                }
            }
            TokenKind::Grouping => unreachable!("Grouping token with neither GroupingStart nor GroupingEnd"),
            _ => {
                let prec = definitions::precedence(token.op);
                while let Some(top) = ops.last() {
                    if top.op == OperatorKind::GroupingStart {
                        break;
                    }
                    if definitions::precedence(top.op) >= prec {
                        output.push(ops.pop().expect("just peeked"));
                    } else {
                        break;
                    }
                }
                ops.push(token.clone());
            }
        }
    }

    while let Some(top) = ops.pop() {
        if top.op == OperatorKind::GroupingStart {
            return Err(SyntaxError::new(
                tokens.len(),
                SyntaxErrorKind::MismatchedParentheses,
                "unmatched opening parenthesis",
            ));
        }
        output.push(top);
    }

    tracing::trace!(count = output.len(), "converted to postfix");
    Ok(output)
}
