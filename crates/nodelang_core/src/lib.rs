//! Canonical language vocabulary for nodelang.
//!
//! This crate is intentionally tiny and dependency-free. It holds the registries that both the syntax crate
//! (lexer, parser, serializer) and tooling consult, so no spelling or binding strength is ever hard-coded twice.
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global mutable state, and no AST types.
//! - Every registry is a `const` table plus a stable `*Id` enum.

pub mod lang;
