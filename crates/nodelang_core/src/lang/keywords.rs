//! Reserved words of nodelang.
//!
//! Identifiers with these spellings never lex as identifiers; the serializer quotes any identifier whose
//! name collides with one of them.
//!
//! ## Examples
//! ```rust
//! use nodelang_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("const"), Some(KeywordId::Const));
//! assert_eq!(keywords::as_str(KeywordId::True), "true");
//! assert!(keywords::from_str("Const").is_none());
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    Const,
    True,
    False,
    Null,
}

/// What a reserved word does in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Introduces a declaration.
    Declaration,
    /// Spells a literal value.
    Literal,
}

/// Metadata for a reserved word.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved words, in `KeywordId` declaration order.
pub const KEYWORDS: &[KeywordInfo] = &[
    info(KeywordId::Const, "const", KeywordCategory::Declaration),
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
];

/// Return the metadata entry for a keyword.
pub const fn info_for(id: KeywordId) -> &'static KeywordInfo {
    &KEYWORDS[id as usize]
}

/// Return the canonical spelling of a keyword.
pub const fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a spelling to a keyword. Matching is case-sensitive.
pub fn from_str(spelling: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == spelling).map(|k| k.id)
}

/// Return `true` if `spelling` is reserved.
pub fn is_reserved(spelling: &str) -> bool {
    from_str(spelling).is_some()
}

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}
