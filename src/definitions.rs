//! Static tables describing token kinds, operator kinds, their textual
//! aliases, precedence, legal state transitions, and the lexer's character
//! classes.
//!
//! Everything here is `const`/`static` data rather than a class hierarchy —
//! the state machine stays trivial to audit by reading the tables directly.

use std::fmt;

/// The closed set of syntactic roles a [`Token`](crate::token::Token) can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Variable,
    Constant,
    ComparisonOp,
    LogicalOp,
    UnaryOp,
    CollectionOp,
    CollectionUnary,
    NotOp,
    IsOp,
    Grouping,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The closed set of concrete operators, partitioned by the [`TokenKind`]
/// that carries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // Comparison
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Match,
    Like,
    // Logical
    And,
    Or,
    // Unary
    Null,
    GreaterZero,
    EqualZero,
    LessZero,
    // Collection
    In,
    CMatch,
    // Collection unary
    CAny,
    // Not modifier
    Not,
    // Is marker
    Is,
    // Grouping
    GroupingStart,
    GroupingEnd,
    /// Sentinel: no operator (carried by `Variable`/`Constant` tokens).
    None,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One row of the alias table: every textual spelling that resolves to a
/// given `(TokenKind, OperatorKind)` pair.
struct AliasRow {
    kind: TokenKind,
    op: OperatorKind,
    aliases: &'static [&'static str],
}

/// `TOKEN_OPERATOR_MAPPING` — every operator keyword alias, grouped by the
/// `(kind, op)` cell it resolves to. Alias strings are compared
/// case-insensitively against an already-uppercased lexeme.
const ALIASES: &[AliasRow] = &[
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::Equal, aliases: &["=", "==", "EQ", "EQUALS"] },
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::Greater, aliases: &[">", "GT"] },
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::GreaterEqual, aliases: &[">=", "GTE"] },
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::Less, aliases: &["<", "LT"] },
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::LessEqual, aliases: &["<=", "LTE"] },
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::Match, aliases: &["MATCH", "REX", "REGEX"] },
    AliasRow { kind: TokenKind::ComparisonOp, op: OperatorKind::Like, aliases: &["LIKE"] },
    AliasRow { kind: TokenKind::UnaryOp, op: OperatorKind::Null, aliases: &["ISNULL", "NULL", "NONE"] },
    AliasRow { kind: TokenKind::UnaryOp, op: OperatorKind::GreaterZero, aliases: &["GTZ", "GT0"] },
    AliasRow { kind: TokenKind::UnaryOp, op: OperatorKind::EqualZero, aliases: &["EQZ", "EQ0"] },
    AliasRow { kind: TokenKind::UnaryOp, op: OperatorKind::LessZero, aliases: &["LTZ", "LT0"] },
    AliasRow { kind: TokenKind::LogicalOp, op: OperatorKind::And, aliases: &["AND", "&&", "&"] },
    AliasRow { kind: TokenKind::LogicalOp, op: OperatorKind::Or, aliases: &["OR", "||", "|"] },
    AliasRow { kind: TokenKind::CollectionOp, op: OperatorKind::In, aliases: &["IN", "CONTAINS"] },
    AliasRow { kind: TokenKind::CollectionOp, op: OperatorKind::CMatch, aliases: &["CLIKE", "CMATCH"] },
    AliasRow { kind: TokenKind::CollectionUnary, op: OperatorKind::CAny, aliases: &["ANY"] },
    AliasRow { kind: TokenKind::Grouping, op: OperatorKind::GroupingStart, aliases: &["("] },
    AliasRow { kind: TokenKind::Grouping, op: OperatorKind::GroupingEnd, aliases: &[")"] },
    AliasRow { kind: TokenKind::NotOp, op: OperatorKind::Not, aliases: &["NOT"] },
    AliasRow { kind: TokenKind::IsOp, op: OperatorKind::Is, aliases: &["IS"] },
];

/// One row of the compound-operator expansion table: a single alias that
/// expands into a `NOT` token followed by one primitive operator token.
struct CompoundRow {
    alias: &'static str,
    tail_kind: TokenKind,
    tail_op: OperatorKind,
}

const COMPOUND: &[CompoundRow] = &[
    CompoundRow { alias: "NOTMATCH", tail_kind: TokenKind::ComparisonOp, tail_op: OperatorKind::Match },
    CompoundRow { alias: "NE", tail_kind: TokenKind::ComparisonOp, tail_op: OperatorKind::Equal },
    CompoundRow { alias: "!=", tail_kind: TokenKind::ComparisonOp, tail_op: OperatorKind::Equal },
    CompoundRow { alias: "ISNOTNULL", tail_kind: TokenKind::UnaryOp, tail_op: OperatorKind::Null },
    CompoundRow { alias: "NOTNULL", tail_kind: TokenKind::UnaryOp, tail_op: OperatorKind::Null },
    CompoundRow { alias: "NOTIN", tail_kind: TokenKind::CollectionOp, tail_op: OperatorKind::In },
    CompoundRow { alias: "NOMATCH", tail_kind: TokenKind::CollectionOp, tail_op: OperatorKind::CMatch },
];

/// Look up an operator keyword, trimming and uppercasing it first.
///
/// Returns the unique `(kind, op)` cell whose alias list contains the text,
/// or `None` if it matches nothing in [`ALIASES`].
pub fn match_operator(text: &str) -> Option<(TokenKind, OperatorKind)> {
    let needle = text.trim().to_ascii_uppercase();
    for row in ALIASES {
        if row.aliases.contains(&needle.as_str()) {
            return Some((row.kind, row.op));
        }
    }
    None
}

/// Expand a compound alias (e.g. `ISNOTNULL`) into its canonical
/// `(NotOp, Not)` head followed by one primitive tail element.
///
/// Returns an empty vector if `text` is not a compound alias.
pub fn expand_compound(text: &str) -> Vec<(TokenKind, OperatorKind)> {
    let needle = text.trim().to_ascii_uppercase();
    for row in COMPOUND {
        if row.alias == needle {
            return vec![(TokenKind::NotOp, OperatorKind::Not), (row.tail_kind, row.tail_op)];
        }
    }
    Vec::new()
}

/// Precedence used by the shunting-yard converter; higher binds tighter.
///
/// The grouping value is never compared against another operator's
/// precedence during a pop — it only exists so `GroupingStart` has an
/// entry in this table.
pub fn precedence(op: OperatorKind) -> u8 {
    use OperatorKind::*;
    match op {
        Or => 1,
        And => 2,
        Not => 3,
        Equal | Greater | GreaterEqual | Less | LessEqual | Match | Like | Null | GreaterZero
        | EqualZero | LessZero | In | CMatch | CAny | Is => 4,
        GroupingStart | GroupingEnd => 5,
        None => 0,
    }
}

/// Token kinds allowed to follow `prev` (or to start an expression, for `prev == None`).
pub fn allowed_next(prev: Option<TokenKind>) -> &'static [TokenKind] {
    use TokenKind::*;
    match prev {
        None => &[Variable, Grouping, NotOp],
        Some(Variable) => &[NotOp, ComparisonOp, UnaryOp, CollectionUnary, CollectionOp, IsOp],
        Some(ComparisonOp) => &[Constant],
        Some(UnaryOp) => &[LogicalOp, Grouping],
        Some(Constant) => &[LogicalOp, Grouping],
        Some(LogicalOp) => &[Variable, Grouping, NotOp],
        Some(Grouping) => &[LogicalOp, Grouping, NotOp, Variable],
        Some(CollectionOp) => &[Constant],
        Some(CollectionUnary) => &[LogicalOp, Grouping],
        Some(NotOp) => &[Variable, Constant, Grouping, UnaryOp, CollectionUnary, ComparisonOp, CollectionOp],
        Some(IsOp) => &[UnaryOp, NotOp, CollectionUnary],
    }
}

/// Token kinds that start a clause.
pub fn clause_starting() -> &'static [TokenKind] {
    &[TokenKind::Variable]
}

/// Token kinds that end a clause.
pub fn clause_ending() -> &'static [TokenKind] {
    &[TokenKind::Constant, TokenKind::UnaryOp, TokenKind::CollectionUnary]
}

/// Token kinds that are illegal while a clause is in progress.
pub fn clause_invalid() -> &'static [TokenKind] {
    &[TokenKind::Variable, TokenKind::LogicalOp, TokenKind::Grouping]
}

/// `true` if `kind` is legal given `in_clause` and the allowed-next set for `prev`.
pub fn is_legal_transition(in_clause: bool, prev: Option<TokenKind>, kind: TokenKind) -> bool {
    if in_clause && clause_invalid().contains(&kind) {
        return false;
    }
    allowed_next(prev).contains(&kind)
}

/// `true` if every step of `sequence` is a legal transition, threading
/// `prev` forward through the sequence. `in_clause` is evaluated once,
/// against the state *before* the sequence begins, matching the source
/// tokenizer's compound-operator validation.
pub fn is_legal_sequence(in_clause: bool, mut prev: Option<TokenKind>, sequence: &[TokenKind]) -> bool {
    if sequence.is_empty() {
        return false;
    }
    for &kind in sequence {
        if !is_legal_transition(in_clause, prev, kind) {
            return false;
        }
        prev = Some(kind);
    }
    true
}

/// Identifier/constant body symbols: alphanumerics plus these are kept as
/// part of the same run.
pub const BODY_SYMBOLS: &[char] = &['_', '-', '.', ':', '/', '\\', '*', '#', '%'];

/// Symbols that immediately stop an in-progress run.
pub const STOP_SYMBOLS: &[char] = &[' ', '(', ')', '"', '\''];

/// Symbols that open/close a quoted constant.
pub const QUOTE_SYMBOLS: &[char] = &['"', '\''];

/// Symbols treated as wildcards when translating a `LIKE` pattern to regex.
pub const WILDCARD_SYMBOLS: &[char] = &['%', '*'];

pub fn is_body_symbol(c: char) -> bool {
    BODY_SYMBOLS.contains(&c)
}

pub fn is_stop_symbol(c: char) -> bool {
    STOP_SYMBOLS.contains(&c)
}

pub fn is_quote_symbol(c: char) -> bool {
    QUOTE_SYMBOLS.contains(&c)
}
