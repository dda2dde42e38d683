//! Parser for nodelang
//!
//! Recursive descent for declarations, precedence climbing for binary expressions. The parser pulls tokens from
//! the [`Lexer`] on demand; every production takes the cursor by value and returns the cursor after it, so
//! "try and roll back" is just dropping a cursor.
//!
//! ## Examples
//!
//! ```rust
//! use nodelang_syntax::parser;
//!
//! let module = parser::parse("/// base roughness\nconst rough: f32 = 0.25").unwrap();
//! assert_eq!(module.len(), 1);
//! assert_eq!(module.lookup("rough").and_then(|d| d.comment.as_deref()), Some("base roughness"));
//! ```

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::token_helpers::TokenTag;
use nodelang_core::lang::keywords::KeywordId;
use nodelang_core::lang::operators::{self, OperatorId};
use nodelang_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
