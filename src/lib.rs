#![forbid(unsafe_code)]
//! nodelang: a small declarative language for shader-node graphs.
//!
//! The syntax frontend (lexer, parser, AST, serializer) lives in `nodelang_syntax`; this crate adds the
//! tooling around it: graph-builder bookkeeping, extraction descriptors and host mapping tables, the
//! formatter API, and the CLI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod builder;
pub mod cli;
pub mod extract;
pub mod format;
pub mod version;

pub use nodelang_syntax::ast;
pub use nodelang_syntax::diagnostics;
pub use nodelang_syntax::lexer;
pub use nodelang_syntax::parser;
pub use nodelang_syntax::serialize;

pub use builder::{GraphCodeMap, NodeCode, Referrer, SocketType};
pub use extract::{MappingTable, NodeDescriptor, describe};
pub use format::{FormatConfig, check_formatted, format_diff, format_source, format_source_with_config};
