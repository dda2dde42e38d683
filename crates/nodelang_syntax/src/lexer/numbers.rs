//! Number scanning for the nodelang lexer
//!
//! Handles decimal integers, floats with a single `.`, `_` digit separators, and `0x` / `0o` / `0b` prefixed
//! integers. A letter right after the first digit and before another digit is always part of the literal, so
//! `5f3` is one bad token. A slice that does not parse is reported as an unknown token.

use super::Scanner;
use super::tokens::TokenKind;
use crate::diagnostics::TokenizeError;

impl<'src> Scanner<'src> {
    pub(super) fn scan_number(&mut self, first: char) -> Result<TokenKind, TokenizeError> {
        if first == '0' {
            if let Some(radix) = self.peek().and_then(radix_for_prefix) {
                if self.peek_next().is_some_and(|c| c.is_digit(radix)) {
                    self.advance(); // prefix letter
                    return self.scan_radix_int(radix);
                }
            }
        }

        // Any other letter in prefix position still belongs to the literal, which then cannot parse.
        if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.scan_decimal_run();
            return Err(self.unknown());
        }

        let points = self.scan_decimal_run();

        let digits: String = self.slice().chars().filter(|c| *c != '_').collect();
        let kind = match points {
            0 => digits.parse::<i64>().ok().map(TokenKind::Int),
            1 => digits.parse::<f64>().ok().filter(|v| v.is_finite()).map(TokenKind::Float),
            _ => None,
        };
        kind.ok_or_else(|| self.unknown())
    }

    /// Consume digits, `_` and `.`, returning how many `.` were seen.
    fn scan_decimal_run(&mut self) -> usize {
        let mut points = 0;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '_' => {}
                '.' => points += 1,
                _ => break,
            }
            self.advance();
        }
        points
    }

    /// Scan the digits after a radix prefix. The whole alphanumeric run is taken so that `0b102` is one bad
    /// token rather than `0b10` followed by `2`.
    fn scan_radix_int(&mut self, radix: u32) -> Result<TokenKind, TokenizeError> {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let digits: String = self.slice()[2..].chars().filter(|c| *c != '_').collect();
        i64::from_str_radix(&digits, radix)
            .map(TokenKind::Int)
            .map_err(|_| self.unknown())
    }
}

fn radix_for_prefix(c: char) -> Option<u32> {
    match c {
        'x' => Some(16),
        'o' => Some(8),
        'b' => Some(2),
        _ => None,
    }
}
