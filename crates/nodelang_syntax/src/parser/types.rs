/// Type annotation parsing.
///
/// `typename := ident ('[' int ']')*`
///
/// Bare primitive tags resolve through `nodelang_core::lang::types`; any other name, and any quoted name,
/// becomes a struct reference. At most [`MAX_NESTING_DEPTH`] array suffixes are accepted.
impl<'src> Parser<'src> {
    fn typename(&self, cursor: usize) -> Parsed<Type> {
        let (token, mut cursor) = self.next(cursor, "a type name")?;
        let mut ty = match token.kind {
            // A quoted name never resolves to a primitive tag.
            TokenKind::Ident(name) if token.slice.starts_with('\'') => Type::Struct(StructType {
                name,
                members: Vec::new(),
            }),
            TokenKind::Ident(name) => Type::named(name),
            _ => return Err(self.unexpected(&token, "a type name")),
        };

        let mut dims = 0;
        while let Some((bracket, after_bracket)) = self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::LBracket))? {
            if dims == MAX_NESTING_DEPTH {
                return Err(ParseError::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                    span: bracket.span,
                });
            }
            dims += 1;
            let (len_token, after_len) = self.expect(after_bracket, TokenTag::Int)?;
            let len = match len_token.kind {
                TokenKind::Int(n) => usize::try_from(n).ok(),
                _ => None,
            }
            .ok_or_else(|| self.unexpected(&len_token, "an array length"))?;
            let (_, after_close) = self.expect(after_len, TokenTag::Punctuation(PunctuationId::RBracket))?;
            ty = Type::array(ty, len);
            cursor = after_close;
        }
        Ok((ty, cursor))
    }
}
