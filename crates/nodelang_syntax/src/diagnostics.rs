//! Error values for the nodelang front end.
//!
//! Three disjoint families:
//! - [`TokenizeError`]: the lexer could not form a token at a cursor position.
//! - [`ParseError`]: a production failed (wrong token, early end of input, duplicate name, nesting too deep), or
//!   a lexical error surfaced while parsing.
//! - [`AstError`]: a construction-API call was rejected by the [`Module`](crate::ast::Module).
//!
//! All of them are plain values that derive [`miette::Diagnostic`], so tooling can render them against the
//! source with labelled spans.

// miette's derive expands to assignments the compiler considers unused
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Span;

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

// ============================================================================
// Lexical errors
// ============================================================================

/// The lexer could not produce a token.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TokenizeError {
    /// The text at the cursor does not start any token.
    #[error("unknown token `{slice}`")]
    #[diagnostic(code(nodelang::lex::unknown_token))]
    UnknownTok {
        slice: String,
        #[label("not a nodelang token")]
        span: Span,
    },

    /// A `"` string literal runs to the end of the input.
    #[error("unterminated string literal")]
    #[diagnostic(code(nodelang::lex::unterminated_string))]
    UnterminatedString {
        #[label("string starts here")]
        span: Span,
    },

    /// A `'` quoted identifier runs to the end of the input.
    #[error("unterminated quoted identifier")]
    #[diagnostic(code(nodelang::lex::unterminated_ident))]
    UnterminatedIdent {
        #[label("identifier starts here")]
        span: Span,
    },

    /// A backslash escape that the lexer does not understand.
    #[error("invalid escape sequence `{escape}`")]
    #[diagnostic(
        code(nodelang::lex::invalid_escape),
        help("supported escapes are \\\\, \\\", \\', \\n, \\r, \\t, \\0 and \\u{{XXXX}}")
    )]
    InvalidEscape {
        escape: String,
        #[label("here")]
        span: Span,
    },
}

impl TokenizeError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            TokenizeError::UnknownTok { span, .. }
            | TokenizeError::UnterminatedString { span }
            | TokenizeError::UnterminatedIdent { span }
            | TokenizeError::InvalidEscape { span, .. } => *span,
        }
    }
}

// ============================================================================
// Syntax errors
// ============================================================================

/// A production could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// Input ran out in the middle of a production.
    #[error("unexpected end of input, expected {expected}")]
    #[diagnostic(code(nodelang::parse::unexpected_eof))]
    UnexpectedEof {
        expected: &'static str,
        #[label("input ends here")]
        span: Span,
    },

    /// A token is present but no production accepts it here.
    #[error("unexpected `{found}`, expected {expected}")]
    #[diagnostic(code(nodelang::parse::unexpected_token))]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        #[label("unexpected token")]
        span: Span,
    },

    /// Lexical error surfaced while parsing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tokenize(#[from] TokenizeError),

    /// A declaration reuses a name already declared in the module.
    #[error("duplicate declaration `{name}`")]
    #[diagnostic(code(nodelang::parse::duplicate_decl))]
    DuplicateDecl {
        name: String,
        #[label("already declared earlier in this module")]
        span: Span,
    },

    /// Calls, array literals or array types nest deeper than the parser allows.
    #[error("nesting deeper than {limit} levels")]
    #[diagnostic(
        code(nodelang::parse::nesting_too_deep),
        help("split the expression into separate declarations")
    )]
    NestingTooDeep {
        limit: usize,
        #[label("this level is too deep")]
        span: Span,
    },
}

impl ParseError {
    /// Source location of the error.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedEof { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::DuplicateDecl { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
            ParseError::Tokenize(err) => err.span(),
        }
    }
}

// ============================================================================
// Construction errors
// ============================================================================

/// A construction-API call on a [`Module`](crate::ast::Module) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum AstError {
    /// The name is already declared in the module.
    #[error("a declaration named `{name}` already exists")]
    #[diagnostic(
        code(nodelang::ast::duplicate_decl),
        help("use `Module::fresh_name` to pick an unused name")
    )]
    DuplicateDecl { name: String },

    /// The expression id does not belong to this module.
    #[error("expression #{index} does not exist in this module")]
    #[diagnostic(code(nodelang::ast::unknown_expr))]
    UnknownExpr { index: usize },

    /// The declaration id does not belong to this module.
    #[error("declaration #{index} does not exist in this module")]
    #[diagnostic(code(nodelang::ast::unknown_decl))]
    UnknownDecl { index: usize },
}
