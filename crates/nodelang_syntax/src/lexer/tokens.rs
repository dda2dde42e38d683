//! Token types for the nodelang lexer.
//!
//! Vocabulary tokens carry registry ids from `nodelang_core::lang`; data-bearing tokens carry their decoded
//! payload. Every token also keeps the exact source slice it was lexed from.
//!
//! ## Notes
//! - Use `crate::token_helpers` for tag-based matching at call sites.

use crate::ast::{Ident, Span};
use nodelang_core::lang::keywords::{self, KeywordId};
use nodelang_core::lang::operators::OperatorId;
use nodelang_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    /// Bare or `'quoted'` identifier, already unescaped.
    Ident(Ident),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,

    // ========== Trivia that survives ==========
    /// `/// text`, with the marker and one leading space removed.
    DocComment(String),
}

/// A token with its kind, source span, and source slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub slice: &'src str,
}

impl<'src> Token<'src> {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span, slice: &'src str) -> Self {
        Self { kind, span, slice }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
