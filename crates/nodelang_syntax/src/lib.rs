//! Syntax frontend for nodelang: lexer, AST, parser, serializer, diagnostics.
//!
//! nodelang programs are flat lists of named constant declarations built from literals, references, calls
//! and binary operators:
//!
//! ```text
//! /// roughness of the base layer
//! const rough: f32 = 0.25
//! const shader = pbr_shader(.roughness = rough, .base_color = [0.8, 0.1, 0.1, 1.0])
//! ```
//!
//! ## Notes
//! - This crate is "syntax-only": it does no name resolution and no type checking; type annotations are data.
//! - Vocabulary identity (keywords/operators/punctuation/primitive types) comes from `nodelang_core::lang`.
//! - Nodes live in an arena owned by [`ast::Module`]; holders store ids, which is what makes promotion
//!   (turning an inline expression into a named declaration) visible to every holder.
//!
//! ## Examples
//! ```rust
//! use nodelang_syntax::{parser, serialize};
//!
//! let module = parser::parse("const x = 1 + 2 * 3").unwrap();
//! assert_eq!(serialize::serialize_module(&module), "const x = (1 + (2 * 3))");
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod namespace;
pub mod parser;
pub mod serialize;
pub mod token_helpers;
