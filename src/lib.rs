//! Tokenizer, shunting-yard converter, and postfix evaluator for
//! SQL-flavored host-membership predicates.
//!
//! ```
//! use criteria_eval::{evaluate, Attrs, Value};
//!
//! let mut host = Attrs::default();
//! host.insert("app".to_string(), Value::from("proxmox"));
//! host.insert("type".to_string(), Value::from("bare-metal"));
//!
//! assert!(evaluate("app=proxmox && type=bare-metal", &host).unwrap());
//! ```

mod definitions;
mod errors;
mod eval;
mod evaluator;
mod lex;
mod model;
mod rpn;
mod tokenizer;

pub use definitions::{OperatorKind, TokenKind};
pub use errors::{Error, EvalError, EvalErrorKind, SyntaxError, SyntaxErrorKind};
pub use eval::Attrs;
pub use evaluator::Evaluator;
pub use model::{Token, Value};

use std::sync::OnceLock;

fn default_evaluator() -> &'static Evaluator {
    static DEFAULT: OnceLock<Evaluator> = OnceLock::new();
    DEFAULT.get_or_init(Evaluator::new)
}

/// Tokenize `criterion` using the default evaluator's resource limits.
pub fn tokenize(criterion: &str) -> Result<Vec<Token>, Error> {
    default_evaluator().tokenize(criterion)
}

/// Convert an already-tokenized stream to postfix order.
pub fn to_rpn(tokens: &[Token]) -> Result<Vec<Token>, Error> {
    default_evaluator().to_rpn(tokens)
}

/// Tokenize, convert, and evaluate `criterion` against `attrs` in one call.
///
/// This is the crate's single public contract: `evaluate(criterion,
/// host_attributes) -> bool`, backed by a process-wide [`Evaluator`] whose
/// regex cache is shared and safe to call from multiple threads.
pub fn evaluate(criterion: &str, attrs: &Attrs) -> Result<bool, Error> {
    default_evaluator().evaluate(criterion, attrs)
}
