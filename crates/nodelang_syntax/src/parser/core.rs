/// Parser core types and the module loop.
///
/// This chunk defines the [`Parser`] type and the result type of a lenient module parse.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.
/// - `Parsed<T>` is the value of a production plus the cursor just past it.
type Parsed<T> = Result<(T, usize), ParseError>;

/// Outcome of a lenient module parse.
///
/// `module` holds every declaration parsed before the loop stopped; `cursor` is where it stopped and `error` is
/// the failure of the declaration attempted there, if the input did not simply run out.
#[derive(Debug)]
pub struct ModuleParse {
    pub module: Module,
    pub cursor: usize,
    pub error: Option<ParseError>,
}

impl ModuleParse {
    /// Strict view: the module if the whole input was consumed, otherwise the stopping error.
    pub fn into_result(self) -> Result<Module, ParseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.module),
        }
    }
}

/// How deep calls, array literals and array type suffixes may nest.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser state: the token source and the module under construction.
///
/// ## Notes
/// - There is no mutable cursor here. Productions thread it by value.
/// - Nodes allocated by a production that later fails are discarded via [`Parser::speculate`].
/// - `depth` counts the calls and array literals currently open.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    module: Module,
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Create a parser over `source` with an empty module.
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            module: Module::new(),
            depth: 0,
        }
    }

    /// Parse declarations until the input runs out or a declaration fails.
    ///
    /// A failing declaration is not escalated: it ends the loop and is reported in [`ModuleParse::error`].
    pub fn parse_module(mut self) -> ModuleParse {
        let mut cursor = 0;
        let error = loop {
            if self.lexer.is_at_end(cursor) {
                break None;
            }
            match self.decl(cursor) {
                Ok((_, next)) => cursor = next,
                Err(err) => {
                    tracing::debug!(cursor, error = %err, "declaration loop stopped");
                    break Some(err);
                }
            }
        };
        ModuleParse {
            module: self.module,
            cursor,
            error,
        }
    }

    /// Parse exactly one expression spanning the whole input.
    pub fn parse_expr(mut self) -> Result<(Module, ExprId), ParseError> {
        let (expr, cursor) = self.expr(0)?;
        if let Some(token) = self.lexer.next_token(cursor)? {
            return Err(self.unexpected(&token, "end of input"));
        }
        Ok((self.module, expr))
    }
}
