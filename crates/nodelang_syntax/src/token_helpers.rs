//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! The parser speculates on token *kinds* without caring about payloads; [`TokenTag`] is that payload-free
//! view.

use crate::lexer::{Token, TokenKind};
use nodelang_core::lang::keywords::{self, KeywordId};
use nodelang_core::lang::operators::{self, OperatorId};
use nodelang_core::lang::punctuation::{self, PunctuationId};

/// Payload-free token kind, used to ask "is the next token one of these?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenTag {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),
    Ident,
    Int,
    Float,
    String,
    Bool,
    Null,
    DocComment,
}

impl TokenTag {
    /// Human-readable description for error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenTag::Keyword(id) => keyword_description(id),
            TokenTag::Operator(_) => "an operator",
            TokenTag::Punctuation(id) => punctuation_description(id),
            TokenTag::Ident => "an identifier",
            TokenTag::Int => "an integer",
            TokenTag::Float => "a float",
            TokenTag::String => "a string",
            TokenTag::Bool => "a boolean",
            TokenTag::Null => "`null`",
            TokenTag::DocComment => "a doc comment",
        }
    }
}

fn keyword_description(id: KeywordId) -> &'static str {
    match id {
        KeywordId::Const => "`const`",
        KeywordId::True => "`true`",
        KeywordId::False => "`false`",
        KeywordId::Null => "`null`",
    }
}

fn punctuation_description(id: PunctuationId) -> &'static str {
    match id {
        PunctuationId::LParen => "`(`",
        PunctuationId::RParen => "`)`",
        PunctuationId::LBracket => "`[`",
        PunctuationId::RBracket => "`]`",
        PunctuationId::Colon => "`:`",
        PunctuationId::Comma => "`,`",
        PunctuationId::Eq => "`=`",
        PunctuationId::Dot => "`.`",
    }
}

impl TokenKind {
    /// Payload-free view of this kind.
    pub fn tag(&self) -> TokenTag {
        match self {
            TokenKind::Keyword(id) => TokenTag::Keyword(*id),
            TokenKind::Operator(id) => TokenTag::Operator(*id),
            TokenKind::Punctuation(id) => TokenTag::Punctuation(*id),
            TokenKind::Ident(_) => TokenTag::Ident,
            TokenKind::Int(_) => TokenTag::Int,
            TokenKind::Float(_) => TokenTag::Float,
            TokenKind::String(_) => TokenTag::String,
            TokenKind::Bool(_) => TokenTag::Bool,
            TokenKind::Null => TokenTag::Null,
            TokenKind::DocComment(_) => TokenTag::DocComment,
        }
    }

    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` if this token starts a literal (including a `-` sign).
    pub fn is_literal_start(&self) -> bool {
        matches!(
            self,
            TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::String(_) | TokenKind::Bool(_) | TokenKind::Null
        ) || self.is_operator(OperatorId::Minus)
            || self.is_punctuation(PunctuationId::LBracket)
    }

    /// Canonical spelling for vocabulary tokens.
    pub fn spelling(&self) -> Option<&'static str> {
        match self {
            TokenKind::Keyword(id) => Some(keywords::as_str(*id)),
            TokenKind::Operator(id) => Some(operators::as_str(*id)),
            TokenKind::Punctuation(id) => Some(punctuation::as_str(*id)),
            _ => None,
        }
    }
}

impl Token<'_> {
    /// Convenience wrapper for `self.kind.tag()`.
    pub fn tag(&self) -> TokenTag {
        self.kind.tag()
    }

    /// Convenience wrapper for `self.kind.operator_id()`.
    pub fn operator_id(&self) -> Option<OperatorId> {
        self.kind.operator_id()
    }

    /// Convenience wrapper for `self.kind.punctuation_id()`.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        self.kind.punctuation_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ident;

    #[test]
    fn test_tag_ignores_payload() {
        assert_eq!(TokenKind::Int(1).tag(), TokenKind::Int(99).tag());
        assert_eq!(
            TokenKind::Ident(Ident::new("a")).tag(),
            TokenKind::Ident(Ident::new("b")).tag()
        );
        assert_ne!(
            TokenKind::Operator(OperatorId::Caret).tag(),
            TokenKind::Operator(OperatorId::CaretCaret).tag()
        );
    }

    #[test]
    fn test_vocabulary_spelling() {
        assert_eq!(TokenKind::Keyword(KeywordId::Const).spelling(), Some("const"));
        assert_eq!(TokenKind::Operator(OperatorId::CaretSlash).spelling(), Some("^/"));
        assert_eq!(TokenKind::Null.spelling(), None);
    }

    #[test]
    fn test_literal_start() {
        assert!(TokenKind::Operator(OperatorId::Minus).is_literal_start());
        assert!(TokenKind::Punctuation(PunctuationId::LBracket).is_literal_start());
        assert!(!TokenKind::Punctuation(PunctuationId::LParen).is_literal_start());
    }
}
