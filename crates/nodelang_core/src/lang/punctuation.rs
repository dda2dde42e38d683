//! Punctuation vocabulary: delimiters, separators and access markers.
//!
//! ## Examples
//! ```rust
//! use nodelang_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("("), Some(PunctuationId::LParen));
//! assert_eq!(punctuation::as_str(PunctuationId::Eq), "=");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and parentheses.
    Delimiter,
    /// `,`, `:` and `=`.
    Separator,
    /// `.` (field access and named-argument marker).
    Access,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Eq,
    Dot,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation, in `PunctuationId` declaration order.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Eq, "=", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
];

/// Return the metadata entry for a punctuation token.
pub const fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    &PUNCTUATION[id as usize]
}

/// Return the canonical spelling of a punctuation token.
pub const fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a spelling to a punctuation token.
pub fn from_str(spelling: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == spelling).map(|p| p.id)
}

/// Resolve a single character to a punctuation token.
pub fn from_char(c: char) -> Option<PunctuationId> {
    PUNCTUATION
        .iter()
        .find(|p| p.canonical.len() == c.len_utf8() && p.canonical.starts_with(c))
        .map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_matches_ids() {
        for (idx, p) in PUNCTUATION.iter().enumerate() {
            assert_eq!(p.id as usize, idx, "PUNCTUATION out of order at {:?}", p.id);
        }
    }

    #[test]
    fn test_from_char_matches_from_str() {
        for p in PUNCTUATION {
            let c = p.canonical.chars().next().unwrap();
            assert_eq!(from_char(c), Some(p.id));
            assert_eq!(from_str(p.canonical), Some(p.id));
        }
        assert_eq!(from_char('{'), None);
    }
}
