//! Quoted scanning for the nodelang lexer
//!
//! `"..."` is a string literal and `'...'` is a quoted identifier. Both share one escape set:
//! `\\`, `\"`, `\'`, `\n`, `\r`, `\t`, `\0` and `\u{XXXX}` (1 to 6 hex digits). Any other escape is an error,
//! and raw newlines are allowed inside the quotes.

use super::Scanner;
use super::tokens::TokenKind;
use crate::ast::{Ident, Span};
use crate::diagnostics::TokenizeError;

impl<'src> Scanner<'src> {
    pub(super) fn scan_string(&mut self) -> Result<TokenKind, TokenizeError> {
        self.scan_quoted('"').map(TokenKind::String)
    }

    pub(super) fn scan_quoted_ident(&mut self) -> Result<TokenKind, TokenizeError> {
        self.scan_quoted('\'').map(|name| TokenKind::Ident(Ident::new(name)))
    }

    /// Scan up to and including the closing `quote`; the opening quote is already consumed.
    fn scan_quoted(&mut self, quote: char) -> Result<String, TokenizeError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(self.unterminated(quote)),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => value.push(self.scan_escape(quote)?),
                Some(c) => value.push(c),
            }
        }
    }

    /// Decode one escape; the backslash is already consumed.
    fn scan_escape(&mut self, quote: char) -> Result<char, TokenizeError> {
        let escape_start = self.pos - 1;
        match self.advance() {
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('0') => Ok('\0'),
            Some(c @ ('\\' | '"' | '\'')) => Ok(c),
            Some('u') => self.scan_unicode_escape(escape_start),
            Some(_) => Err(self.invalid_escape(escape_start)),
            None => Err(self.unterminated(quote)),
        }
    }

    fn scan_unicode_escape(&mut self, escape_start: usize) -> Result<char, TokenizeError> {
        if !self.match_char('{') {
            return Err(self.invalid_escape(escape_start));
        }
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
        }
        let digits = &self.source[digits_start..self.pos];
        if digits.is_empty() || digits.len() > 6 || !self.match_char('}') {
            return Err(self.invalid_escape(escape_start));
        }
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.invalid_escape(escape_start))
    }

    fn invalid_escape(&self, escape_start: usize) -> TokenizeError {
        TokenizeError::InvalidEscape {
            escape: self.source[escape_start..self.pos].to_string(),
            span: Span::new(escape_start, self.pos),
        }
    }

    fn unterminated(&self, quote: char) -> TokenizeError {
        let span = self.span();
        if quote == '\'' {
            TokenizeError::UnterminatedIdent { span }
        } else {
            TokenizeError::UnterminatedString { span }
        }
    }
}
