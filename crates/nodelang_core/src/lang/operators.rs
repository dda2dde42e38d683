//! Binary operator vocabulary.
//!
//! Every operator in nodelang is an infix, left-associative binary operator. The `precedence` column is the
//! binding strength used by the precedence-climbing parser: higher binds tighter.
//!
//! | strength | operators |
//! |---|---|
//! | 1 | `\|` `\|\|` |
//! | 2 | `&&` `&` |
//! | 3 | `+` |
//! | 4 | `-` |
//! | 5 | `*` |
//! | 6 | `/` |
//! | 7 | `^` |
//! | 8 | `**` `^^` |
//! | 9 | `^/` |
//!
//! ## Examples
//! ```rust
//! use nodelang_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("**"), Some(OperatorId::StarStar));
//! assert!(operators::precedence(OperatorId::Star) > operators::precedence(OperatorId::Plus));
//! ```

/// How an operator associates when chained at equal strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
}

/// Stable identifier for every binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    Pipe,
    PipePipe,
    AmpAmp,
    Amp,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    StarStar,
    CaretCaret,
    CaretSlash,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
}

/// Lowest binding strength of any operator.
pub const MIN_PRECEDENCE: u8 = 1;

/// Registry of all operators, in `OperatorId` declaration order.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OperatorId::Pipe, "|", 1),
    op(OperatorId::PipePipe, "||", 1),
    op(OperatorId::AmpAmp, "&&", 2),
    op(OperatorId::Amp, "&", 2),
    op(OperatorId::Plus, "+", 3),
    op(OperatorId::Minus, "-", 4),
    op(OperatorId::Star, "*", 5),
    op(OperatorId::Slash, "/", 6),
    op(OperatorId::Caret, "^", 7),
    op(OperatorId::StarStar, "**", 8),
    op(OperatorId::CaretCaret, "^^", 8),
    op(OperatorId::CaretSlash, "^/", 9),
];

/// Return the full metadata entry for an operator.
pub const fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

/// Return the binding strength of an operator.
pub const fn precedence(id: OperatorId) -> u8 {
    info_for(id).precedence
}

/// Return the source spelling of an operator.
pub const fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Resolve an operator spelling to its identifier. Matching is exact.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

const fn op(id: OperatorId, spelling: &'static str, precedence: u8) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity: Associativity::Left,
    }
}
