//! Error types produced by the tokenizer, shunting-yard converter, and
//! postfix evaluator.
//!
//! Both families are hand-rolled `Display`/`Error` impls rather than
//! `thiserror`-derived ones, matching the teacher crate's own `error.rs`
//! convention — see `DESIGN.md`.

use std::error::Error as StdError;
use std::fmt;

/// The specific reason a [`SyntaxError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No token kind could be assigned to a lexeme.
    UnexpectedToken,
    /// A token's kind is not legal given the previous token (or clause state).
    IllegalTransition,
    /// A clause did not start with a variable or end with a constant/unary operator.
    MalformedClause,
    /// `(` / `)` do not balance.
    MismatchedParentheses,
    /// The input produced more tokens than `Evaluator::max_tokens` allows.
    TooManyTokens,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnexpectedToken => "unexpected token",
            Self::IllegalTransition => "illegal token transition",
            Self::MalformedClause => "malformed clause",
            Self::MismatchedParentheses => "mismatched parentheses",
            Self::TooManyTokens => "too many tokens",
        };
        f.write_str(msg)
    }
}

/// A tokenization or shunting-yard failure.
///
/// `position` is the byte index into the original criterion string where
/// the offending lexeme began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub position: usize,
    pub kind: SyntaxErrorKind,
    pub detail: String,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, kind: SyntaxErrorKind, detail: impl Into<String>) -> Self {
        Self { position, kind, detail: detail.into() }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at byte {}: {} ({})", self.position, self.kind, self.detail)
    }
}

impl StdError for SyntaxError {}

/// The specific reason an [`EvalError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    UnderflowCompare,
    UnderflowLogical,
    UnderflowUnary,
    UnderflowNot,
    UnderflowCollection,
    /// Final stack size was not exactly 1.
    InvalidExpression,
    /// An RPN token kind reached the evaluator that it does not handle.
    UnsupportedToken,
    /// A `LIKE`/`MATCH`/`CMATCH` pattern did not compile as a regex.
    InvalidRegex,
    /// `GTZ`/`EQZ`/`LTZ` applied to an operand that does not coerce to a number.
    NotNumeric,
    /// `CAny`/`In`/`CMatch` applied to an operand that is not a collection.
    NotACollection,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnderflowCompare => "insufficient values in stack for comparison",
            Self::UnderflowLogical => "insufficient values in stack for logical operation",
            Self::UnderflowUnary => "insufficient values in stack for unary operation",
            Self::UnderflowNot => "insufficient values in stack for NOT operation",
            Self::UnderflowCollection => "insufficient values in stack for collection operation",
            Self::InvalidExpression => "invalid expression",
            Self::UnsupportedToken => "unsupported token kind",
            Self::InvalidRegex => "invalid regular expression",
            Self::NotNumeric => "operand is not numeric",
            Self::NotACollection => "operand is not a collection",
        };
        f.write_str(msg)
    }
}

/// A postfix-evaluation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub detail: String,
}

impl EvalError {
    pub(crate) fn new(kind: EvalErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evaluation error: {} ({})", self.kind, self.detail)
    }
}

impl StdError for EvalError {}

/// The unified error type returned by the convenience `evaluate` entry
/// point, the way the teacher's `Box<EvalAltResult>` unifies parse and
/// runtime errors for its own top-level `eval` functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Syntax(SyntaxError),
    Eval(EvalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "{e}"),
            Self::Eval(e) => write!(f, "{e}"),
        }
    }
}

impl StdError for Error {}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self {
        Self::Eval(e)
    }
}
