//! Abstract Syntax Tree definitions for nodelang.
//!
//! Expression nodes do not own their children. Every expression lives in the arena of the [`Module`] that
//! created it and is addressed by an [`ExprId`]; declarations are addressed by [`DeclId`]. Overwriting an arena
//! slot (see [`Module::promote`]) is therefore observed by every holder of the id.

use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use nodelang_core::lang::keywords;
use nodelang_core::lang::operators::OperatorId;
use nodelang_core::lang::types::{self, PrimitiveTypeId};

pub use crate::namespace::{Group, Module, Namespace, Promotion};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// A name, plus whether it has to be written inside single quotes.
///
/// Equality and hashing only look at the name, so an `Ident` can key a map and be looked up by `&str`.
#[derive(Debug, Clone, Eq)]
pub struct Ident {
    name: String,
    quoted: bool,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let quoted = needs_quotes(&name);
        Self { name, quoted }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// `true` if the name is not a bare identifier and serializes as `'...'`.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    pub fn into_string(self) -> String {
        self.name
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Ident {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Borrow<str> for Ident {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::new(name)
    }
}

/// Return `true` unless `name` matches `[A-Za-z][A-Za-z0-9_]*` and is not a reserved word.
pub fn needs_quotes(name: &str) -> bool {
    let mut chars = name.chars();
    let bare = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    !bare || keywords::is_reserved(name)
}

// ============================================================================
// Literals
// ============================================================================

/// Literal value. Arrays nest arbitrarily.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Array(Vec<Literal>),
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(i64::from(v))
    }
}

impl From<u32> for Literal {
    fn from(v: u32) -> Self {
        Literal::Int(i64::from(v))
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<f32> for Literal {
    /// Widens through the shortest decimal form, so `0.8f32` becomes `0.8` and not `0.800000011920929`.
    fn from(v: f32) -> Self {
        Literal::Float(v.to_string().parse::<f64>().unwrap_or(f64::from(v)))
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Str(v)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(v: Option<T>) -> Self {
        v.map_or(Literal::Null, Into::into)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(v: Vec<T>) -> Self {
        Literal::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Literal>, const N: usize> From<[T; N]> for Literal {
    fn from(v: [T; N]) -> Self {
        Literal::Array(v.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Types
// ============================================================================

/// Type annotation. Carried as data only; nothing checks it.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveTypeId),
    Struct(StructType),
    /// Fixed-size array, `elem[len]`.
    Array(Box<Type>, usize),
}

/// A named, ordered list of member types. A parsed struct name has no members.
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub name: Ident,
    pub members: Vec<Type>,
}

impl Type {
    /// Resolve a type name: primitive tags map to [`Type::Primitive`], anything else is a struct reference.
    pub fn named(name: impl Into<Ident>) -> Type {
        let name = name.into();
        match types::from_str(name.as_str()) {
            Some(id) => Type::Primitive(id),
            None => Type::Struct(StructType {
                name,
                members: Vec::new(),
            }),
        }
    }

    pub fn array(elem: Type, len: usize) -> Type {
        Type::Array(Box::new(elem), len)
    }
}

// ============================================================================
// Expressions
// ============================================================================

/// Index of an expression in its [`Module`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub(crate) u32);

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a declaration in its [`Module`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub(crate) u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reference to a declaration, with field accesses applied left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    pub name: Ident,
    pub derefs: Vec<Ident>,
}

impl VarRef {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            derefs: Vec::new(),
        }
    }

    pub fn with_deref(mut self, field: impl Into<Ident>) -> Self {
        self.derefs.push(field.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<Arg>,
}

/// Call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(ExprId),
    Named(NamedArg),
}

impl Arg {
    pub fn value(&self) -> ExprId {
        match self {
            Arg::Positional(id) => *id,
            Arg::Named(named) => named.value,
        }
    }
}

/// `.name = value`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArg {
    pub name: Ident,
    pub value: ExprId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub op: OperatorId,
    pub left: ExprId,
    pub right: ExprId,
}

/// Expression node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    VarRef(VarRef),
    Literal(Literal),
    Call(Call),
    BinOp(BinOp),
}

impl Expr {
    /// Short lowercase name of the node kind, for logs and messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::VarRef(_) => "reference",
            Expr::Literal(_) => "literal",
            Expr::Call(_) => "call",
            Expr::BinOp(_) => "binary operation",
        }
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// `/// comment` + `const name: ty = value`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: Ident,
    pub value: ExprId,
    /// Doc comment text, one `///` line per `\n`-separated line. Lines never end in `\r`.
    pub comment: Option<String>,
    pub ty: Option<Type>,
}

impl ConstDecl {
    pub fn new(name: impl Into<Ident>, value: ExprId) -> Self {
        Self {
            name: name.into(),
            value,
            comment: None,
            ty: None,
        }
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Attach a doc comment. A `\r` at the end of any line is dropped, as the lexer does for source.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment: String = comment.into();
        let normalized = comment
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");
        self.comment = Some(normalized);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_ident_quoting_rule() {
        assert!(!Ident::new("foo_2").is_quoted());
        assert!(!Ident::new("A").is_quoted());
        assert!(Ident::new("my var").is_quoted());
        assert!(Ident::new("_private").is_quoted());
        assert!(Ident::new("2fast").is_quoted());
        assert!(Ident::new("").is_quoted());
        assert!(Ident::new("const").is_quoted());
        assert!(Ident::new("null").is_quoted());
    }

    #[test]
    fn test_ident_keys_a_map_by_name() {
        let mut map = HashMap::new();
        map.insert(Ident::new("rough"), 1);
        assert_eq!(map.get("rough"), Some(&1));
        assert_eq!(Ident::new("a b"), Ident::from("a b".to_string()));
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(Literal::from(3), Literal::Int(3));
        assert_eq!(Literal::from(0.8f32), Literal::Float(0.8));
        assert_eq!(Literal::from(None::<i64>), Literal::Null);
        assert_eq!(
            Literal::from([0.5f64, 1.0]),
            Literal::Array(vec![Literal::Float(0.5), Literal::Float(1.0)])
        );
        assert_eq!(
            Literal::from(vec!["a", "b"]),
            Literal::Array(vec![Literal::Str("a".into()), Literal::Str("b".into())])
        );
    }

    #[test]
    fn test_type_named_resolves_primitives() {
        assert_eq!(Type::named("f32"), Type::Primitive(PrimitiveTypeId::F32));
        assert_eq!(
            Type::named("Test"),
            Type::Struct(StructType {
                name: Ident::new("Test"),
                members: Vec::new(),
            })
        );
    }

    #[test]
    fn test_with_comment_drops_carriage_returns() {
        let decl = ConstDecl::new("a", ExprId(0)).with_comment("first\r\nsecond\r");
        assert_eq!(decl.comment.as_deref(), Some("first\nsecond"));
        let decl = ConstDecl::new("a", ExprId(0)).with_comment("");
        assert_eq!(decl.comment.as_deref(), Some(""));
    }

    #[test]
    fn test_span_merge() {
        assert_eq!(Span::new(4, 6).merge(Span::new(1, 5)), Span::new(1, 6));
    }
}
