/// Token-stream helpers and speculation.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Reading the token at a cursor (`next`, `try_consume`, `expect`, `peek_operator`)
/// - Bounding recursion into calls and array literals (`nested`)
/// - Rolling back arena allocations of failed productions (`speculate`)
impl<'src> Parser<'src> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Read the token at `cursor`; running out of input is an error naming `expected`.
    fn next(&self, cursor: usize, expected: &'static str) -> Result<(Token<'src>, usize), ParseError> {
        match self.lexer.next_token(cursor)? {
            Some(token) => {
                let end = token.span.end;
                Ok((token, end))
            }
            None => Err(ParseError::UnexpectedEof {
                expected,
                span: self.eof_span(),
            }),
        }
    }

    /// Consume the token at `cursor` if it has the given tag.
    ///
    /// On a mismatch (or at end of input) returns `None`; the caller keeps using its old cursor.
    fn try_consume(&self, cursor: usize, tag: TokenTag) -> Result<Option<(Token<'src>, usize)>, ParseError> {
        match self.lexer.next_token(cursor)? {
            Some(token) if token.tag() == tag => {
                let end = token.span.end;
                Ok(Some((token, end)))
            }
            _ => Ok(None),
        }
    }

    /// Return `true` if the token at `cursor` has the given tag, without consuming it.
    fn check(&self, cursor: usize, tag: TokenTag) -> Result<bool, ParseError> {
        Ok(self.try_consume(cursor, tag)?.is_some())
    }

    /// Require a token with the given tag at `cursor`.
    fn expect(&self, cursor: usize, tag: TokenTag) -> Result<(Token<'src>, usize), ParseError> {
        let expected = tag.describe();
        let (token, next) = self.next(cursor, expected)?;
        if token.tag() == tag {
            Ok((token, next))
        } else {
            Err(self.unexpected(&token, expected))
        }
    }

    /// Return the binary operator at `cursor` and the cursor after it, if there is one.
    fn peek_operator(&self, cursor: usize) -> Result<Option<(OperatorId, usize)>, ParseError> {
        Ok(self
            .lexer
            .next_token(cursor)?
            .and_then(|token| token.operator_id().map(|op| (op, token.span.end))))
    }

    /// Run `production` one nesting level deeper. `span` is the token that opened the level.
    fn nested<T>(&mut self, span: Span, production: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Run `production` at `cursor`; if it fails, drop every node it allocated.
    fn speculate<T>(&mut self, cursor: usize, production: impl FnOnce(&mut Self, usize) -> Parsed<T>) -> Parsed<T> {
        let mark = self.module.mark();
        let result = production(self, cursor);
        if let Err(err) = &result {
            tracing::trace!(cursor, error = %err, "rolling back production");
            self.module.rollback(mark);
        }
        result
    }
}
