//! The [`Evaluator`] builder: the crate's main configuration surface,
//! bundling the regex cache and resource limits the way the teacher's
//! `Engine` bundles its own settings (see `engine_settings.rs`).

use crate::errors::Error;
use crate::eval::{self, Attrs, RegexCache};
use crate::model::Token;
use crate::rpn;
use crate::tokenizer;

/// Tokenizes, converts, and evaluates criterion expressions against host
/// attribute maps. Holds no per-call state: a single `Evaluator` can run
/// concurrently from multiple threads (the regex cache is `RwLock`-guarded),
/// as the concurrency model requires.
pub struct Evaluator {
    max_tokens: usize,
    regex_cache: RegexCache,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self { max_tokens: 4096, regex_cache: RegexCache::new() }
    }
}

impl Evaluator {
    /// Create an evaluator with default resource limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of tokens a single criterion may expand to (0 disables
    /// the check). Guards against pathological inputs; it is not part of the
    /// expression language itself.
    pub fn with_max_tokens(&mut self, max_tokens: usize) -> &mut Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Tokenize `criterion` under this evaluator's token budget.
    pub fn tokenize(&self, criterion: &str) -> Result<Vec<Token>, Error> {
        let limit = if self.max_tokens == 0 { usize::MAX } else { self.max_tokens };
        tokenizer::tokenize_with_limit(criterion, limit).map_err(Error::from)
    }

    /// Convert an already-tokenized stream to postfix order.
    pub fn to_rpn(&self, tokens: &[Token]) -> Result<Vec<Token>, Error> {
        rpn::to_rpn(tokens).map_err(Error::from)
    }

    /// Tokenize, convert, and evaluate `criterion` against `attrs` in one call.
    pub fn evaluate(&self, criterion: &str, attrs: &Attrs) -> Result<bool, Error> {
        let tokens = self.tokenize(criterion)?;
        let postfix = self.to_rpn(&tokens)?;
        eval::evaluate_rpn(&postfix, attrs, &self.regex_cache).map_err(Error::from)
    }
}
