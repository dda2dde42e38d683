/// An entry on the explicit stack of [`Parser::expr`].
#[derive(Debug, Clone, Copy)]
enum Pending {
    /// An open `(` group.
    Group,
    /// `lhs op`, waiting for its right operand.
    Operator { lhs: ExprId, op: OperatorId },
}

/// Expression parsing methods.
///
/// Binary expressions are folded with an explicit operator stack ordered by the binding strengths in
/// `nodelang_core::lang::operators`; everything between operators is a `primary`:
///
/// ```text
/// expr        := group* primary ')'* (binop expr)?     // groups balanced
/// primary     := ident (call-suffix | derefs) | literal
/// call-suffix := '(' (arg (',' arg)* ','?)? ')'
/// arg         := ('.' ident '=')? expr
/// literal     := '-'? number | string | bool | null | '[' (literal (',' literal)* ','?)? ']'
/// ```
///
/// ## Notes
/// - Parenthesized groups sit on the same stack as pending operators, so grouping depth costs no call stack.
/// - Calls and array literals recurse and count against [`MAX_NESTING_DEPTH`].
impl<'src> Parser<'src> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr(&mut self, mut cursor: usize) -> Parsed<ExprId> {
        let mut pending = Vec::new();
        let mut open_groups = 0usize;
        loop {
            while let Some((_, after_paren)) = self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::LParen))? {
                pending.push(Pending::Group);
                open_groups += 1;
                cursor = after_paren;
            }
            let (mut operand, after_operand) = self.primary(cursor)?;
            cursor = after_operand;

            // Close groups until an operator continues the expression or the expression ends.
            loop {
                if let Some((op, after_op)) = self.peek_operator(cursor)? {
                    let lhs = self.fold(&mut pending, operand, operators::precedence(op));
                    pending.push(Pending::Operator { lhs, op });
                    cursor = after_op;
                    break;
                }
                if open_groups == 0 {
                    let expr = self.fold(&mut pending, operand, operators::MIN_PRECEDENCE);
                    return Ok((expr, cursor));
                }
                let (_, after_paren) = self.expect(cursor, TokenTag::Punctuation(PunctuationId::RParen))?;
                operand = self.fold(&mut pending, operand, operators::MIN_PRECEDENCE);
                pending.pop(); // the group `fold` stopped at
                open_groups -= 1;
                cursor = after_paren;
            }
        }
    }

    /// Pop pending operators binding at least `min_precedence`, folding each onto `rhs`.
    ///
    /// Stops at an open group. Folding equal strengths before pushing makes every operator left-associative.
    fn fold(&mut self, pending: &mut Vec<Pending>, mut rhs: ExprId, min_precedence: u8) -> ExprId {
        while let Some(&Pending::Operator { lhs, op }) = pending.last() {
            if operators::precedence(op) < min_precedence {
                break;
            }
            pending.pop();
            rhs = self.module.bin_op(op, lhs, rhs);
        }
        rhs
    }

    fn primary(&mut self, cursor: usize) -> Parsed<ExprId> {
        let (token, after) = self.next(cursor, "an expression")?;
        match &token.kind {
            TokenKind::Ident(name) => self.reference_or_call(name.clone(), after),
            kind if kind.is_literal_start() => {
                let (value, cursor) = self.literal(cursor)?;
                Ok((self.module.literal(value), cursor))
            }
            _ => Err(self.unexpected(&token, "an expression")),
        }
    }

    /// After an identifier: `(` makes it a call, otherwise it is a reference with optional `.field` derefs.
    fn reference_or_call(&mut self, name: Ident, cursor: usize) -> Parsed<ExprId> {
        if let Some((paren, after_paren)) = self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::LParen))? {
            let (args, cursor) = self.nested(paren.span, |p| {
                let (args, cursor) = p.arglist(after_paren)?;
                let (_, cursor) = p.expect(cursor, TokenTag::Punctuation(PunctuationId::RParen))?;
                Ok((args, cursor))
            })?;
            return Ok((self.module.call(name, args), cursor));
        }

        let (derefs, cursor) = self.derefs(cursor)?;
        Ok((self.module.var_ref(VarRef { name, derefs }), cursor))
    }

    fn derefs(&self, mut cursor: usize) -> Parsed<Vec<Ident>> {
        let mut derefs = Vec::new();
        while let Some((_, after_dot)) = self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::Dot))? {
            let ((field, _), after_field) = self.identifier(after_dot, "a field name")?;
            derefs.push(field);
            cursor = after_field;
        }
        Ok((derefs, cursor))
    }

    // ========================================================================
    // Call arguments
    // ========================================================================

    /// Comma-separated arguments up to (not including) `)`. A trailing comma is allowed.
    fn arglist(&mut self, mut cursor: usize) -> Parsed<Vec<Arg>> {
        let mut args = Vec::new();
        while !self.check(cursor, TokenTag::Punctuation(PunctuationId::RParen))? {
            let (arg, after_arg) = self.arg(cursor)?;
            args.push(arg);
            match self.try_consume(after_arg, TokenTag::Punctuation(PunctuationId::Comma))? {
                Some((_, after_comma)) => cursor = after_comma,
                None => return Ok((args, after_arg)),
            }
        }
        Ok((args, cursor))
    }

    fn arg(&mut self, cursor: usize) -> Parsed<Arg> {
        if let Some((_, after_dot)) = self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::Dot))? {
            let ((name, _), after_name) = self.identifier(after_dot, "an argument name")?;
            let (_, after_eq) = self.expect(after_name, TokenTag::Punctuation(PunctuationId::Eq))?;
            let (value, cursor) = self.expr(after_eq)?;
            return Ok((Arg::Named(NamedArg { name, value }), cursor));
        }

        let (value, cursor) = self.expr(cursor)?;
        Ok((Arg::Positional(value), cursor))
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn literal(&mut self, cursor: usize) -> Parsed<Literal> {
        let (token, after) = self.next(cursor, "a literal")?;
        let value = match &token.kind {
            TokenKind::Int(v) => Literal::Int(*v),
            TokenKind::Float(v) => Literal::Float(*v),
            TokenKind::String(s) => Literal::Str(s.clone()),
            TokenKind::Bool(b) => Literal::Bool(*b),
            TokenKind::Null => Literal::Null,
            TokenKind::Operator(OperatorId::Minus) => return self.negative_number(after),
            TokenKind::Punctuation(PunctuationId::LBracket) => {
                return self.nested(token.span, |p| p.array_literal(after));
            }
            _ => return Err(self.unexpected(&token, "a literal")),
        };
        Ok((value, after))
    }

    /// The number after a leading `-`.
    fn negative_number(&self, cursor: usize) -> Parsed<Literal> {
        let expected = "a number after `-`";
        let (token, after) = self.next(cursor, expected)?;
        match token.kind {
            TokenKind::Int(v) => Ok((Literal::Int(-v), after)),
            TokenKind::Float(v) => Ok((Literal::Float(-v), after)),
            _ => Err(self.unexpected(&token, expected)),
        }
    }

    /// Array elements up to and including `]`. A trailing comma is allowed.
    fn array_literal(&mut self, mut cursor: usize) -> Parsed<Literal> {
        let mut items = Vec::new();
        loop {
            if let Some((_, after)) = self.try_consume(cursor, TokenTag::Punctuation(PunctuationId::RBracket))? {
                return Ok((Literal::Array(items), after));
            }
            let (item, after_item) = self.literal(cursor)?;
            items.push(item);
            match self.try_consume(after_item, TokenTag::Punctuation(PunctuationId::Comma))? {
                Some((_, after_comma)) => cursor = after_comma,
                None => {
                    let (_, after) = self.expect(after_item, TokenTag::Punctuation(PunctuationId::RBracket))?;
                    return Ok((Literal::Array(items), after));
                }
            }
        }
    }
}
