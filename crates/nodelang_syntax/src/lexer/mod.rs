//! Lexer for nodelang
//!
//! The lexer is pull-based: [`Lexer::next_token`] takes a byte cursor and returns the single token that starts
//! there (after skipping whitespace and `#` comments), so the parser can speculate by simply re-reading from an
//! older cursor. Nothing is buffered and nothing backtracks inside the lexer.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - `"string"` and `'quoted ident'` scanning, escapes
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::{Ident, Span};
use crate::diagnostics::TokenizeError;
use nodelang_core::lang::keywords::KeywordId;
use nodelang_core::lang::operators::OperatorId;
use nodelang_core::lang::punctuation;

// ============================================================================
// LEXER
// ----------------------------------------------------------------------------
// Dispatch order at a token start:
//
//   '^'          → `^^` | `^/` | `^`
//   '*' '&' '|'  → doubled form first (`**` `&&` `||`), then single
//   '/'          → `///` doc comment | `/`
//   '"' '\''     → string literal | quoted identifier
//   digit        → number
//   letter, '_'  → keyword | bool | null | identifier
//   punctuation  → `( ) [ ] : , = .`
//   otherwise    → UnknownTok
// ============================================================================

/// Cursor-driven lexer over a borrowed source buffer.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'src> {
    source: &'src str,
}

impl<'src> Lexer<'src> {
    /// Create a lexer for `source`.
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Return the cursor after any whitespace (space, tab, `\n`, `\r`) and `#` line comments at `cursor`.
    pub fn skip_trivia(&self, cursor: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut pos = cursor;
        while let Some(&b) = bytes.get(pos) {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => pos += 1,
                b'#' => {
                    while bytes.get(pos).is_some_and(|&b| b != b'\n') {
                        pos += 1;
                    }
                }
                _ => break,
            }
        }
        pos
    }

    /// Return `true` if only trivia remains at `cursor`.
    pub fn is_at_end(&self, cursor: usize) -> bool {
        self.skip_trivia(cursor) >= self.source.len()
    }

    /// Lex the token starting at `cursor` (after trivia).
    ///
    /// Returns `Ok(None)` only at end of input. The returned token's `span.end` is the cursor to continue from.
    ///
    /// ## Errors
    /// - [`TokenizeError::UnknownTok`] if no token starts here or a numeric literal does not parse.
    /// - [`TokenizeError::UnterminatedString`] / [`TokenizeError::UnterminatedIdent`] for an open quote.
    /// - [`TokenizeError::InvalidEscape`] for an unsupported backslash escape.
    pub fn next_token(&self, cursor: usize) -> Result<Option<Token<'src>>, TokenizeError> {
        let start = self.skip_trivia(cursor);
        if start >= self.source.len() {
            return Ok(None);
        }
        if !self.source.is_char_boundary(start) {
            return Err(TokenizeError::UnknownTok {
                slice: String::new(),
                span: Span::new(start, start),
            });
        }

        let mut scanner = Scanner::new(self.source, start);
        let kind = scanner.scan_token()?;
        Ok(Some(Token::new(kind, scanner.span(), scanner.slice())))
    }
}

/// Lex the token at `cursor` in `source`.
pub fn next_token(source: &str, cursor: usize) -> Result<Option<Token<'_>>, TokenizeError> {
    Lexer::new(source).next_token(cursor)
}

/// Convenience function to lex a whole source string.
///
/// Stops at the first lexical error.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, TokenizeError> {
    let lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while let Some(token) = lexer.next_token(cursor)? {
        cursor = token.span.end;
        tokens.push(token);
    }
    tracing::trace!(token_count = tokens.len(), "lexed source");
    Ok(tokens)
}

// ============================================================================
// Scanner (one token)
// ============================================================================

/// Scanning state for a single token.
struct Scanner<'src> {
    source: &'src str,
    start: usize,
    pos: usize,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str, start: usize) -> Self {
        Self {
            source,
            start,
            pos: start,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn slice(&self) -> &'src str {
        &self.source[self.start..self.pos]
    }

    fn unknown(&self) -> TokenizeError {
        TokenizeError::UnknownTok {
            slice: self.slice().to_string(),
            span: self.span(),
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Result<TokenKind, TokenizeError> {
        let Some(c) = self.advance() else {
            return Err(self.unknown());
        };

        let kind = match c {
            '^' => self.operator(
                OperatorId::Caret,
                &[('^', OperatorId::CaretCaret), ('/', OperatorId::CaretSlash)],
            ),
            '*' => self.operator(OperatorId::Star, &[('*', OperatorId::StarStar)]),
            '&' => self.operator(OperatorId::Amp, &[('&', OperatorId::AmpAmp)]),
            '|' => self.operator(OperatorId::Pipe, &[('|', OperatorId::PipePipe)]),
            '+' => TokenKind::Operator(OperatorId::Plus),
            '-' => TokenKind::Operator(OperatorId::Minus),
            '/' => self.scan_slash(),

            '"' => self.scan_string()?,
            '\'' => self.scan_quoted_ident()?,

            '0'..='9' => self.scan_number(c)?,

            _ if is_ident_start(c) => self.scan_identifier(),

            _ => match punctuation::from_char(c) {
                Some(id) => TokenKind::Punctuation(id),
                None => return Err(self.unknown()),
            },
        };
        Ok(kind)
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    /// Try to match a two-character operator, fall back to the single one.
    fn operator(&mut self, simple: OperatorId, compounds: &[(char, OperatorId)]) -> TokenKind {
        for (c, id) in compounds {
            if self.match_char(*c) {
                return TokenKind::Operator(*id);
            }
        }
        TokenKind::Operator(simple)
    }

    /// Scan `/` or a `///` doc comment running to the end of the line.
    fn scan_slash(&mut self) -> TokenKind {
        if !(self.peek() == Some('/') && self.peek_next() == Some('/')) {
            return TokenKind::Operator(OperatorId::Slash);
        }
        self.advance();
        self.advance();
        let text_start = self.pos;
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }

        let text = &self.source[text_start..self.pos];
        let text = text.strip_suffix('\r').unwrap_or(text);
        let text = text.strip_prefix(' ').unwrap_or(text);
        TokenKind::DocComment(text.to_string())
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self) -> TokenKind {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let spelling = self.slice();
        match keyword_id(spelling) {
            Some(KeywordId::Const) => TokenKind::Keyword(KeywordId::Const),
            Some(KeywordId::True) => TokenKind::Bool(true),
            Some(KeywordId::False) => TokenKind::Bool(false),
            Some(KeywordId::Null) => TokenKind::Null,
            None => TokenKind::Ident(Ident::new(spelling)),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ============================================================================
// TESTS
// ============================================================================
