//! The stateful tokenizer: extracts raw lexemes, classifies them via
//! [`crate::definitions`], expands compound operators, and enforces the
//! transition/clause state machine.
//!
//! Grounded on `CriteriaTokenizer` in the original Python
//! `criteria_tokenizer.py`.

use crate::definitions::{self, TokenKind};
use crate::errors::{SyntaxError, SyntaxErrorKind};
use crate::lex;
use crate::model::Token;

/// Token budget enforced purely as a resource guard (spec: "expressions are
/// bounded in size by their token count").
const DEFAULT_MAX_TOKENS: usize = 4096;

struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
    tokens: Vec<Token>,
    previous_kind: Option<TokenKind>,
    clause_buffer: Vec<Token>,
    max_tokens: usize,
}

/// Tokenize `criterion` with the default token budget.
pub fn tokenize(criterion: &str) -> Result<Vec<Token>, SyntaxError> {
    tokenize_with_limit(criterion, DEFAULT_MAX_TOKENS)
}

pub(crate) fn tokenize_with_limit(criterion: &str, max_tokens: usize) -> Result<Vec<Token>, SyntaxError> {
    let mut t = Tokenizer {
        input: criterion,
        cursor: 0,
        tokens: Vec::new(),
        previous_kind: None,
        clause_buffer: Vec::new(),
        max_tokens,
    };
    t.run()
}

/// One raw lexeme pulled off the input, plus whether it came from a quoted
/// constant (relevant for classification).
struct RawLexeme {
    text: String,
    start: usize,
    was_quoted: bool,
}

impl<'a> Tokenizer<'a> {
    fn run(&mut self) -> Result<Vec<Token>, SyntaxError> {
        loop {
            self.cursor = lex::skip_whitespace(self.input, self.cursor);
            if self.cursor >= self.input.len() {
                break;
            }

            let lexeme = self.extract_raw_lexeme();
            tracing::trace!(text = %lexeme.text, start = lexeme.start, "extracted lexeme");

            let (kind, op) = self.classify(&lexeme)?;

            // `IS` is pure surface syntax (`deprecated IS NULL` reads the
            // same as `deprecated ISNULL`): it narrows what may legally
            // follow but never itself becomes a token the shunting-yard or
            // evaluator sees.
            if kind == TokenKind::IsOp {
                self.previous_kind = Some(TokenKind::IsOp);
                continue;
            }

            self.add_token(lexeme.text, kind, op);

            if definitions::clause_ending().contains(&kind) {
                self.finalize_clause()?;
            }

            if self.tokens.len() > self.max_tokens {
                return Err(SyntaxError::new(
                    lexeme.start,
                    SyntaxErrorKind::TooManyTokens,
                    format!("exceeded limit of {} tokens", self.max_tokens),
                ));
            }
        }

        self.finalize_clause()?;
        Ok(std::mem::take(&mut self.tokens))
    }

    /// Pull the next raw lexeme off `self.input` starting at `self.cursor`,
    /// advancing the cursor past it.
    fn extract_raw_lexeme(&mut self) -> RawLexeme {
        let start = self.cursor;
        let first = self.input[start..].chars().next().expect("checked non-empty above");

        if definitions::is_quote_symbol(first) {
            let (text, next) = lex::extract_quoted(self.input, start);
            self.cursor = next;
            return RawLexeme { text, start, was_quoted: true };
        }

        if definitions::is_stop_symbol(first) {
            self.cursor = start + first.len_utf8();
            return RawLexeme { text: first.to_string(), start, was_quoted: false };
        }

        let mut i = start;
        if first.is_alphanumeric() || definitions::is_body_symbol(first) {
            while let Some(c) = self.input[i..].chars().next() {
                if c.is_alphanumeric() || definitions::is_body_symbol(c) {
                    i += c.len_utf8();
                } else {
                    break;
                }
            }
        } else {
            while let Some(c) = self.input[i..].chars().next() {
                if definitions::is_stop_symbol(c) || c.is_alphanumeric() {
                    break;
                }
                i += c.len_utf8();
            }
        }
        self.cursor = i;
        RawLexeme { text: self.input[start..i].trim().to_string(), start, was_quoted: false }
    }

    fn in_clause(&self) -> bool {
        !self.clause_buffer.is_empty()
    }

    /// Classify one lexeme, handling compound-operator expansion by
    /// emitting all-but-the-last expansion element immediately and
    /// returning the kind/op for the final (caller-emitted) element.
    fn classify(&mut self, lexeme: &RawLexeme) -> Result<(TokenKind, definitions::OperatorKind), SyntaxError> {
        let expansion = definitions::expand_compound(&lexeme.text);
        if !expansion.is_empty() {
            let sequence: Vec<TokenKind> = expansion.iter().map(|(k, _)| *k).collect();
            if definitions::is_legal_sequence(self.in_clause(), self.previous_kind, &sequence) {
                for &(kind, op) in &expansion[..expansion.len() - 1] {
                    self.add_token("", kind, op);
                }
                let (kind, op) = expansion[expansion.len() - 1];
                return Ok((kind, op));
            }
            // Falls through to plain classification below, matching the
            // source: an invalid expansion is simply not applied.
        }

        self.classify_plain(lexeme)
    }

    fn classify_plain(&self, lexeme: &RawLexeme) -> Result<(TokenKind, definitions::OperatorKind), SyntaxError> {
        if let Some((kind, op)) = definitions::match_operator(&lexeme.text) {
            let clause_blocks = self.in_clause() && definitions::clause_invalid().contains(&kind);
            if !clause_blocks {
                return if definitions::allowed_next(self.previous_kind).contains(&kind) {
                    Ok((kind, op))
                } else {
                    Err(SyntaxError::new(
                        lexeme.start,
                        SyntaxErrorKind::IllegalTransition,
                        format!("{kind:?} may not follow {:?}", self.previous_kind),
                    ))
                };
            }
            // Only a clause-invalid hit (a keyword that would otherwise be
            // legal but isn't allowed mid-clause) is discarded in favor of
            // reinterpreting the lexeme as an identifier or literal.
        }

        for &candidate in definitions::allowed_next(self.previous_kind) {
            match candidate {
                TokenKind::Variable if !self.in_clause() => {
                    if Self::looks_like_identifier(&lexeme.text) {
                        if definitions::is_legal_transition(self.in_clause(), self.previous_kind, candidate) {
                            return Ok((candidate, definitions::OperatorKind::None));
                        }
                    }
                }
                TokenKind::Constant => {
                    if lexeme.was_quoted || Self::looks_like_identifier(&lexeme.text) {
                        if definitions::is_legal_transition(self.in_clause(), self.previous_kind, candidate) {
                            return Ok((candidate, definitions::OperatorKind::None));
                        }
                    }
                }
                _ => {}
            }
        }

        Err(SyntaxError::new(
            lexeme.start,
            SyntaxErrorKind::UnexpectedToken,
            format!("unexpected token '{}'", lexeme.text),
        ))
    }

    fn looks_like_identifier(text: &str) -> bool {
        text.chars().any(definitions::is_body_symbol) || (!text.is_empty() && text.chars().all(char::is_alphanumeric))
    }

    fn add_token(&mut self, text: impl Into<String>, kind: TokenKind, op: definitions::OperatorKind) {
        let text: String = text.into();
        let text = if matches!(kind, TokenKind::Constant | TokenKind::Variable) {
            text
        } else {
            text.to_ascii_uppercase()
        };
        let token = Token::new(text, kind, op);
        self.previous_kind = Some(kind);
        if kind == TokenKind::Variable || self.in_clause() {
            self.clause_buffer.push(token.clone());
        }
        tracing::debug!(%token, "added token");
        self.tokens.push(token);
    }

    fn finalize_clause(&mut self) -> Result<(), SyntaxError> {
        if self.clause_buffer.is_empty() {
            return Ok(());
        }
        let first = &self.clause_buffer[0];
        let last = &self.clause_buffer[self.clause_buffer.len() - 1];
        let ok = definitions::clause_starting().contains(&first.kind)
            && definitions::clause_ending().contains(&last.kind);
        if !ok {
            return Err(SyntaxError::new(
                self.cursor,
                SyntaxErrorKind::MalformedClause,
                format!("clause starting with {:?} ends with {:?}", first.kind, last.kind),
            ));
        }
        self.clause_buffer.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::OperatorKind;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_comparison() {
        let tokens = tokenize(r#"app=proxmox"#).unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Variable, TokenKind::ComparisonOp, TokenKind::Constant]
        );
        assert_eq!(tokens[1].op, OperatorKind::Equal);
        assert_eq!(tokens[2].text, "proxmox");
    }

    #[test]
    fn quoted_constant_preserves_case() {
        let tokens = tokenize(r#"ip="10.100.4.100""#).unwrap();
        assert_eq!(tokens[2].text, "10.100.4.100");
    }

    #[test]
    fn compound_operator_expands_to_not_then_equal() {
        let tokens = tokenize("app != proxmox").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::NotOp);
        assert_eq!(tokens[1].op, OperatorKind::Not);
        assert_eq!(tokens[2].kind, TokenKind::ComparisonOp);
        assert_eq!(tokens[2].op, OperatorKind::Equal);
    }

    #[test]
    fn isnotnull_expands_and_ends_clause() {
        let tokens = tokenize("deprecated ISNOTNULL").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Variable, TokenKind::NotOp, TokenKind::UnaryOp]
        );
        assert_eq!(tokens[2].op, OperatorKind::Null);
    }

    #[test]
    fn grouping_and_logical_combinators() {
        let tokens = tokenize("(app=proxmox && type=lxc) || ip=\"x\"").unwrap();
        assert_eq!(tokens.first().unwrap().kind, TokenKind::Grouping);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::LogicalOp && t.op == OperatorKind::Or));
    }

    #[test]
    fn illegal_transition_is_rejected() {
        // Two variables back to back is never legal.
        let err = tokenize("foo bar").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
    }

    #[test]
    fn malformed_clause_is_rejected() {
        // A clause that ends on a logical operator instead of a constant.
        let err = tokenize("foo AND").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
    }

    #[test]
    fn is_keyword_is_consumed_without_emitting_a_token() {
        let tokens = tokenize("deprecated IS NOT NULL").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Variable, TokenKind::NotOp, TokenKind::UnaryOp]
        );
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::IsOp));
    }

    #[test]
    fn any_is_a_collection_unary_ending_a_clause() {
        let tokens = tokenize("tags ANY").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![TokenKind::Variable, TokenKind::CollectionUnary]
        );
    }
}
