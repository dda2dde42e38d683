/// Declaration parsing.
///
/// `decl := doc* 'const' ident (':' typename)? '=' expr`
///
/// ## Notes
/// - A declaration is all-or-nothing: on any failure its nodes are rolled back and nothing is appended.
impl<'src> Parser<'src> {
    // ========================================================================
    // Declarations
    // ========================================================================

    fn decl(&mut self, cursor: usize) -> Parsed<DeclId> {
        self.speculate(cursor, |p, cursor| p.const_decl(cursor))
    }

    fn const_decl(&mut self, cursor: usize) -> Parsed<DeclId> {
        let (comment, cursor) = self.doc_comments(cursor)?;
        let (_, cursor) = self.expect(cursor, TokenTag::Keyword(KeywordId::Const))?;
        let ((name, name_span), cursor) = self.identifier(cursor, "a declaration name")?;

        let (ty, cursor) = match self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::Colon))? {
            Some((_, after_colon)) => {
                let (ty, cursor) = self.typename(after_colon)?;
                (Some(ty), cursor)
            }
            None => (None, cursor),
        };

        let (_, cursor) = self.expect(cursor, TokenTag::Punctuation(PunctuationId::Eq))?;
        let (value, cursor) = self.expr(cursor)?;

        let duplicate = name.as_str().to_string();
        let decl = ConstDecl {
            name,
            value,
            comment,
            ty,
        };
        let id = self
            .module
            .append_decl(decl)
            .map_err(|_| ParseError::DuplicateDecl {
                name: duplicate,
                span: name_span,
            })?;
        Ok((id, cursor))
    }

    /// Collect consecutive `///` lines. A lone empty `///` is an empty comment, not a missing one.
    fn doc_comments(&self, mut cursor: usize) -> Parsed<Option<String>> {
        let mut lines = Vec::new();
        while let Some((token, after)) = self.try_consume(cursor, TokenTag::DocComment)? {
            if let TokenKind::DocComment(text) = token.kind {
                lines.push(text);
            }
            cursor = after;
        }
        let comment = (!lines.is_empty()).then(|| lines.join("\n"));
        Ok((comment, cursor))
    }
}
