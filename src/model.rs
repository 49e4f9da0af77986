//! The [`Token`] record and the dynamic [`Value`] type attribute maps are
//! built from.

use std::fmt;

use smartstring::{LazyCompact, SmartString};

use crate::definitions::{OperatorKind, TokenKind};

/// An inline-optimized string: most token text and attribute names are a
/// handful of bytes, so this avoids a heap allocation for the common case.
pub type TokenText = SmartString<LazyCompact>;

/// An immutable, short-lived record produced by the tokenizer and consumed
/// by the shunting-yard converter and the evaluator.
///
/// Two tokens are equal iff all three fields match. Operator and keyword
/// tokens carry their canonicalized (uppercased) textual form; variable and
/// constant tokens carry their original text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: TokenText,
    pub kind: TokenKind,
    pub op: OperatorKind,
}

impl Token {
    pub fn new(text: impl Into<TokenText>, kind: TokenKind, op: OperatorKind) -> Self {
        Self { text: text.into(), kind, op }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Constant | TokenKind::Variable => write!(f, "[{:?}: {}]", self.kind, self.text),
            _ => write!(f, "[{:?}, {:?}]", self.kind, self.op),
        }
    }
}

/// A per-host attribute value: a dynamic scalar or an ordered collection of
/// such. Missing keys resolve to [`Value::Null`] rather than being modeled
/// here; see [`crate::eval::Attrs`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempt the "numeric-preferred" coercion used by comparisons:
    /// `Int`/`Float` coerce directly, `Bool` coerces the way Python's
    /// `float(bool)` does (`true -> 1.0`), and `Str` parses as a float.
    /// `Null` and `List` never coerce.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Null | Value::List(_) => None,
        }
    }

    /// Standard truthiness, used to coerce the evaluator's final stack
    /// value to a `bool`.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str(""),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
