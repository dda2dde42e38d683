/// Miscellaneous parser utilities.
///
/// Identifier parsing and error construction shared by the other chunks.
impl<'src> Parser<'src> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&self, cursor: usize, expected: &'static str) -> Parsed<(Ident, Span)> {
        let (token, after) = self.next(cursor, expected)?;
        match token.kind {
            TokenKind::Ident(name) => Ok(((name, token.span), after)),
            _ => Err(self.unexpected(&token, expected)),
        }
    }

    fn unexpected(&self, token: &Token<'_>, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            found: token.slice.to_string(),
            expected,
            span: token.span,
        }
    }

    /// Zero-width span at the end of the source.
    fn eof_span(&self) -> Span {
        let end = self.lexer.source().len();
        Span::new(end, end)
    }
}
