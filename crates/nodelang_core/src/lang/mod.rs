//! nodelang vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `OperatorId`, `PunctuationId`, `PrimitiveTypeId`) and look
//! up spellings and metadata through the registry tables instead of matching on strings.
//!
//! ## Examples
//! ```rust
//! use nodelang_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("^/"), Some(OperatorId::CaretSlash));
//! assert_eq!(operators::precedence(OperatorId::CaretSlash), 9);
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
