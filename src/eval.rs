//! The postfix evaluator: walks a reverse-Polish token stream against a set
//! of host attributes and reduces it to a single boolean.
//!
//! Grounded on `CriteriaEvaluator.evaluate` in the original Python
//! `criteria_evaluator.py`, with comparison/unary/collection semantics
//! grounded on the corresponding helpers in `CriteriaUtils.py`.

use std::sync::RwLock;

use ahash::AHashMap;
use regex::Regex;

use crate::definitions::{OperatorKind, TokenKind};
use crate::errors::{EvalError, EvalErrorKind};
use crate::model::{Token, Value};

/// The attribute lookup an evaluation runs against: one host's worth of
/// named, dynamically-typed values. A missing key reads as [`Value::Null`].
/// Backed by `ahash` rather than the stdlib's SipHash, matching the
/// teacher's choice of hasher for its own hot-path maps.
pub type Attrs = AHashMap<String, Value>;

fn lookup<'a>(attrs: &'a Attrs, name: &str) -> &'a Value {
    attrs.get(name).unwrap_or(&Value::Null)
}

/// Compiled-pattern cache shared across evaluations so that criteria reused
/// across many hosts (the common case for inventory filtering) only pay the
/// `regex::Regex::new` cost once per distinct pattern.
#[derive(Default)]
pub(crate) struct RegexCache {
    compiled: RwLock<AHashMap<String, Regex>>,
}

impl RegexCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn get_or_compile(&self, pattern: &str) -> Result<Regex, EvalError> {
        if let Some(re) = self.compiled.read().expect("regex cache poisoned").get(pattern) {
            return Ok(re.clone());
        }
        let re = Regex::new(pattern)
            .map_err(|e| EvalError::new(EvalErrorKind::InvalidRegex, format!("`{pattern}`: {e}")))?;
        self.compiled
            .write()
            .expect("regex cache poisoned")
            .insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

/// Run a postfix token stream against `attrs`, returning the final
/// truthiness of the single value left on the stack.
pub(crate) fn evaluate_rpn(rpn: &[Token], attrs: &Attrs, cache: &RegexCache) -> Result<bool, EvalError> {
    let mut stack: Vec<Value> = Vec::with_capacity(rpn.len());

    for token in rpn {
        match token.kind {
            TokenKind::Variable => stack.push(lookup(attrs, &token.text).clone()),
            TokenKind::Constant => stack.push(classify_constant(&token.text)),
            TokenKind::ComparisonOp => {
                let b = pop(&mut stack, EvalErrorKind::UnderflowCompare)?;
                let a = pop(&mut stack, EvalErrorKind::UnderflowCompare)?;
                stack.push(Value::Bool(compare(token.op, &a, &b, cache)?));
            }
            TokenKind::LogicalOp => {
                let b = pop(&mut stack, EvalErrorKind::UnderflowLogical)?;
                let a = pop(&mut stack, EvalErrorKind::UnderflowLogical)?;
                let result = match token.op {
                    OperatorKind::And => a.truthy() && b.truthy(),
                    OperatorKind::Or => a.truthy() || b.truthy(),
                    other => {
                        return Err(EvalError::new(
                            EvalErrorKind::UnsupportedToken,
                            format!("{other:?} is not a logical operator"),
                        ))
                    }
                };
                stack.push(Value::Bool(result));
            }
            TokenKind::UnaryOp => {
                let a = pop(&mut stack, EvalErrorKind::UnderflowUnary)?;
                stack.push(Value::Bool(unary(token.op, &a)?));
            }
            TokenKind::CollectionOp => {
                let b = pop(&mut stack, EvalErrorKind::UnderflowCollection)?;
                let a = pop(&mut stack, EvalErrorKind::UnderflowCollection)?;
                stack.push(Value::Bool(collection(token.op, &a, &b, cache)?));
            }
            TokenKind::CollectionUnary => {
                let a = pop(&mut stack, EvalErrorKind::UnderflowCollection)?;
                stack.push(Value::Bool(collection_unary(token.op, &a)?));
            }
            TokenKind::NotOp => {
                let a = pop(&mut stack, EvalErrorKind::UnderflowNot)?;
                stack.push(Value::Bool(!a.truthy()));
            }
            TokenKind::IsOp | TokenKind::Grouping => {
                return Err(EvalError::new(
                    EvalErrorKind::UnsupportedToken,
                    format!("{:?} has no postfix evaluation rule", token.kind),
                ));
            }
        }
    }

    if stack.len() != 1 {
        return Err(EvalError::new(
            EvalErrorKind::InvalidExpression,
            format!("postfix evaluation left {} values on the stack, expected 1", stack.len()),
        ));
    }

    let result = stack.pop().expect("length checked above").truthy();
    tracing::debug!(result, "evaluated postfix expression");
    Ok(result)
}

/// Constants are always pushed as plain text; SPEC_FULL.md's evaluator table
/// has no case that special-cases a `Constant`'s text into `Value::Null` —
/// a variable reads as `Value::Null` only when the attribute is missing.
fn classify_constant(text: &str) -> Value {
    Value::Str(text.to_string())
}

/// Comparison semantics: the left operand is the `Variable` side of the
/// clause; if it's null the whole comparison is unconditionally `false`,
/// matching `_evaluate_condition`'s `if left_value is None: return False`
/// guard — this is checked before any numeric/string fallback, since a
/// missing attribute must never be treated as equal to an empty string.
/// Otherwise prefer a numeric comparison when both sides coerce to `f64`;
/// fall back to a string comparison when either side doesn't.
fn compare(op: OperatorKind, a: &Value, b: &Value, cache: &RegexCache) -> Result<bool, EvalError> {
    use OperatorKind::*;
    if a.is_null() {
        return Ok(false);
    }
    match op {
        Equal | Greater | GreaterEqual | Less | LessEqual => {
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                Ok(match op {
                    Equal => x == y,
                    Greater => x > y,
                    GreaterEqual => x >= y,
                    Less => x < y,
                    LessEqual => x <= y,
                    _ => unreachable!(),
                })
            } else {
                let x = a.to_string();
                let y = b.to_string();
                Ok(match op {
                    Equal => x == y,
                    Greater => x > y,
                    GreaterEqual => x >= y,
                    Less => x < y,
                    LessEqual => x <= y,
                    _ => unreachable!(),
                })
            }
        }
        Match => {
            let haystack = a.to_string();
            let pattern = format!("^(?:{})", b.to_string());
            let re = cache.get_or_compile(&pattern)?;
            Ok(re.is_match(&haystack))
        }
        Like => {
            let haystack = a.to_string();
            let pattern = like_to_regex(&b.to_string());
            let re = cache.get_or_compile(&pattern)?;
            Ok(re.is_match(&haystack))
        }
        other => Err(EvalError::new(
            EvalErrorKind::UnsupportedToken,
            format!("{other:?} is not a comparison operator"),
        )),
    }
}

/// Translate a `LIKE` pattern (`%`/`*` as multi-char wildcards) into a fully
/// anchored regex, escaping every other character literally.
fn like_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 2);
    out.push('^');
    for c in pattern.chars() {
        if crate::definitions::WILDCARD_SYMBOLS.contains(&c) {
            out.push_str(".*");
        } else {
            out.push_str(&regex::escape(&c.to_string()));
        }
    }
    out.push('$');
    out
}

fn unary(op: OperatorKind, a: &Value) -> Result<bool, EvalError> {
    use OperatorKind::*;
    match op {
        Null => Ok(a.is_null()),
        GreaterZero | EqualZero | LessZero => {
            let n = a.as_f64().ok_or_else(|| {
                EvalError::new(EvalErrorKind::NotNumeric, format!("{a} does not coerce to a number"))
            })?;
            Ok(match op {
                GreaterZero => n > 0.0,
                EqualZero => n == 0.0,
                LessZero => n < 0.0,
                _ => unreachable!(),
            })
        }
        other => Err(EvalError::new(
            EvalErrorKind::UnsupportedToken,
            format!("{other:?} is not a unary operator"),
        )),
    }
}

fn as_collection(a: &Value) -> Result<&[Value], EvalError> {
    match a {
        Value::List(items) => Ok(items),
        other => Err(EvalError::new(EvalErrorKind::NotACollection, format!("{other} is not a collection"))),
    }
}

/// `variable IN constant` / `variable CMATCH constant`: `haystack` is the
/// variable's (collection-valued) operand, `needle` the constant operand.
fn collection(op: OperatorKind, haystack: &Value, needle: &Value, cache: &RegexCache) -> Result<bool, EvalError> {
    use OperatorKind::*;
    let items = as_collection(haystack)?;
    match op {
        In => Ok(items.iter().any(|item| values_equal(needle, item))),
        CMatch => {
            let pattern = format!("^(?:{})", needle.to_string());
            let re = cache.get_or_compile(&pattern)?;
            Ok(items.iter().any(|item| re.is_match(&item.to_string())))
        }
        other => Err(EvalError::new(
            EvalErrorKind::UnsupportedToken,
            format!("{other:?} is not a collection operator"),
        )),
    }
}

/// `ANY`: true iff the collection has at least one element.
fn collection_unary(op: OperatorKind, a: &Value) -> Result<bool, EvalError> {
    match op {
        OperatorKind::CAny => Ok(!as_collection(a)?.is_empty()),
        other => Err(EvalError::new(
            EvalErrorKind::UnsupportedToken,
            format!("{other:?} is not a collection-unary operator"),
        )),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        x == y
    } else {
        a.to_string() == b.to_string()
    }
}

fn pop(stack: &mut Vec<Value>, kind: EvalErrorKind) -> Result<Value, EvalError> {
    stack.pop().ok_or_else(|| EvalError::new(kind, "operator stack underflow"))
}
