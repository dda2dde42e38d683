/// Parse a source text into a [`Module`].
///
/// This is the main public entrypoint for parsing. It is strict: every byte of non-trivia input must belong to a
/// declaration.
///
/// ## Errors
/// Returns the error of the first declaration that failed to parse.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse(source: &str) -> Result<Module, ParseError> {
    Parser::new(source).parse_module().into_result()
}

/// Parse as many declarations as possible.
///
/// Never fails: the returned [`ModuleParse`] carries the declarations parsed so far, the cursor where the loop
/// stopped, and the error that stopped it (if any).
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn parse_module(source: &str) -> ModuleParse {
    Parser::new(source).parse_module()
}

/// Parse a single expression spanning the whole source.
///
/// The expression's nodes live in the returned [`Module`], which has no declarations.
pub fn parse_expr(source: &str) -> Result<(Module, ExprId), ParseError> {
    Parser::new(source).parse_expr()
}
