//! Namespaces, the [`Module`] arena, and promotion.
//!
//! A [`Namespace`] is the ordered declaration list plus its name index. A [`Module`] owns the expression and
//! declaration arenas and the top-level namespace; it is the only construction API the parser and external
//! graph builders use.
//!
//! ## Notes
//! - Names are unique per namespace. Inserting a taken name fails with [`AstError::DuplicateDecl`] and leaves
//!   the namespace unchanged, so the order and the index always agree.
//! - Arena slots are never freed except by the parser rolling back a failed speculative production.

use std::collections::HashMap;
use std::ops::Index;

use crate::ast::{Arg, BinOp, Call, ConstDecl, DeclId, Expr, ExprId, Ident, Literal, VarRef};
use crate::diagnostics::AstError;
use nodelang_core::lang::operators::OperatorId;

// ============================================================================
// Namespace
// ============================================================================

/// Ordered declarations plus a name → declaration index.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    order: Vec<DeclId>,
    by_name: HashMap<Ident, DeclId>,
}

/// An inner namespace.
///
/// Nothing in the text syntax opens a group yet, so the parser never builds one. Graph builders that nest
/// node groups keep one per group and resolve names against it with the same rules as the module level.
pub type Group = Namespace;

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    /// Declarations in stored order.
    pub fn iter(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.order.iter().copied()
    }

    /// Position of `id` in the ordered sequence (linear scan).
    pub fn position(&self, id: DeclId) -> Option<usize> {
        self.order.iter().position(|d| *d == id)
    }

    /// Append `id` under `name`.
    pub fn push(&mut self, name: &Ident, id: DeclId) -> Result<(), AstError> {
        self.insert_at(self.order.len(), name, id)
    }

    /// Insert `id` under `name` immediately before `target`, or at the front when `target` is `None` or not
    /// in this namespace.
    pub fn insert_before(&mut self, name: &Ident, id: DeclId, target: Option<DeclId>) -> Result<(), AstError> {
        let pos = target.and_then(|t| self.position(t)).unwrap_or(0);
        self.insert_at(pos, name, id)
    }

    fn insert_at(&mut self, pos: usize, name: &Ident, id: DeclId) -> Result<(), AstError> {
        if self.by_name.contains_key(name.as_str()) {
            return Err(AstError::DuplicateDecl {
                name: name.as_str().to_string(),
            });
        }
        self.order.insert(pos, id);
        self.by_name.insert(name.clone(), id);
        Ok(())
    }
}

// ============================================================================
// Module
// ============================================================================

/// Outcome of [`Module::promote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// The payload moved into the new declaration and the original slot now holds a reference to it.
    Promoted(DeclId),
    /// The node is a reference or a call and was left alone.
    Unchanged,
}

/// Top-level namespace of one program, plus the arenas its nodes live in.
#[derive(Debug, Clone, Default)]
pub struct Module {
    exprs: Vec<Expr>,
    decls: Vec<ConstDecl>,
    namespace: Namespace,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node constructors
    // ========================================================================

    /// Allocate an expression node.
    pub fn expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    pub fn literal(&mut self, value: impl Into<Literal>) -> ExprId {
        self.expr(Expr::Literal(value.into()))
    }

    pub fn var_ref(&mut self, var: VarRef) -> ExprId {
        self.expr(Expr::VarRef(var))
    }

    pub fn call(&mut self, callee: impl Into<Ident>, args: Vec<Arg>) -> ExprId {
        self.expr(Expr::Call(Call {
            callee: callee.into(),
            args,
        }))
    }

    pub fn bin_op(&mut self, op: OperatorId, left: ExprId, right: ExprId) -> ExprId {
        self.expr(Expr::BinOp(BinOp { op, left, right }))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Append a declaration at the end of the module.
    pub fn append_decl(&mut self, decl: ConstDecl) -> Result<DeclId, AstError> {
        let id = DeclId(self.decls.len() as u32);
        self.namespace.push(&decl.name, id)?;
        self.decls.push(decl);
        Ok(id)
    }

    /// Insert a declaration immediately before `target`, or at the front when `target` is `None` or absent.
    pub fn prepend_decl(&mut self, decl: ConstDecl, target: Option<DeclId>) -> Result<DeclId, AstError> {
        let id = DeclId(self.decls.len() as u32);
        self.namespace.insert_before(&decl.name, id, target)?;
        self.decls.push(decl);
        Ok(id)
    }

    pub fn get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn decl(&self, id: DeclId) -> Option<&ConstDecl> {
        self.decls.get(id.index())
    }

    /// Resolve a declaration by name.
    pub fn lookup(&self, name: &str) -> Option<&ConstDecl> {
        self.namespace.get(name).and_then(|id| self.decl(id))
    }

    pub fn lookup_id(&self, name: &str) -> Option<DeclId> {
        self.namespace.get(name)
    }

    /// Declarations in stored order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &ConstDecl)> + '_ {
        self.namespace.iter().map(|id| (id, &self.decls[id.index()]))
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn len(&self) -> usize {
        self.namespace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Return `base` if no declaration uses it, otherwise the first free `base_N` for N = 1, 2, ...
    pub fn fresh_name(&self, base: &str) -> Ident {
        if !self.namespace.contains(base) {
            return Ident::new(base);
        }
        (1u32..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.namespace.contains(candidate))
            .map(Ident::new)
            .unwrap_or_else(|| Ident::new(base))
    }

    // ========================================================================
    // Promotion
    // ========================================================================

    /// Overwrite the node at `id` in place. Every holder of `id` observes the new node.
    pub fn replace_expr(&mut self, id: ExprId, expr: Expr) -> Result<Expr, AstError> {
        let slot = self
            .exprs
            .get_mut(id.index())
            .ok_or(AstError::UnknownExpr { index: id.index() })?;
        Ok(std::mem::replace(slot, expr))
    }

    /// Turn the literal or binary operation at `id` into a declaration named `name`, inserted before
    /// `referrer` (or at the front), and leave a reference to it in the original slot.
    ///
    /// References and calls are already nameable and are left unchanged.
    ///
    /// ## Errors
    /// - [`AstError::UnknownExpr`] if `id` is not in this module.
    /// - [`AstError::DuplicateDecl`] if `name` is taken; the module is not modified.
    pub fn promote(&mut self, id: ExprId, name: Ident, referrer: Option<DeclId>) -> Result<Promotion, AstError> {
        let expr = self
            .get_expr(id)
            .ok_or(AstError::UnknownExpr { index: id.index() })?;
        match expr {
            Expr::VarRef(_) | Expr::Call(_) => {
                tracing::trace!(kind = expr.kind_name(), "promotion skipped");
                return Ok(Promotion::Unchanged);
            }
            Expr::Literal(_) | Expr::BinOp(_) => {}
        }
        if self.namespace.contains(name.as_str()) {
            return Err(AstError::DuplicateDecl {
                name: name.into_string(),
            });
        }

        let payload = self.replace_expr(id, Expr::VarRef(VarRef::new(name.clone())))?;
        let moved = self.expr(payload);
        let decl = self.prepend_decl(ConstDecl::new(name, moved), referrer)?;
        tracing::debug!(expr = id.index(), decl = decl.index(), "promoted expression");
        Ok(Promotion::Promoted(decl))
    }

    // ========================================================================
    // Parser support
    // ========================================================================

    /// Arena watermark for speculative parsing.
    pub(crate) fn mark(&self) -> usize {
        self.exprs.len()
    }

    /// Drop every expression allocated since `mark`.
    pub(crate) fn rollback(&mut self, mark: usize) {
        self.exprs.truncate(mark);
    }

    // ========================================================================
    // Structural equality
    // ========================================================================

    /// Compare two expression trees with an explicit worklist, so operator chains of any length compare.
    fn expr_eq(&self, a: ExprId, other: &Module, b: ExprId) -> bool {
        let mut pending = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            let same = match (self.get_expr(a), other.get_expr(b)) {
                (Some(Expr::VarRef(x)), Some(Expr::VarRef(y))) => x == y,
                (Some(Expr::Literal(x)), Some(Expr::Literal(y))) => x == y,
                (Some(Expr::Call(x)), Some(Expr::Call(y))) => {
                    x.callee == y.callee
                        && x.args.len() == y.args.len()
                        && x.args.iter().zip(&y.args).all(|pair| match pair {
                            (Arg::Positional(l), Arg::Positional(r)) => {
                                pending.push((*l, *r));
                                true
                            }
                            (Arg::Named(l), Arg::Named(r)) if l.name == r.name => {
                                pending.push((l.value, r.value));
                                true
                            }
                            _ => false,
                        })
                }
                (Some(Expr::BinOp(x)), Some(Expr::BinOp(y))) => {
                    pending.push((x.left, y.left));
                    pending.push((x.right, y.right));
                    x.op == y.op
                }
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }
}

impl Index<ExprId> for Module {
    type Output = Expr;

    /// Panics if `id` was not allocated by this module.
    fn index(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }
}

impl Index<DeclId> for Module {
    type Output = ConstDecl;

    fn index(&self, id: DeclId) -> &ConstDecl {
        &self.decls[id.index()]
    }
}

/// Two modules are equal when their declarations match in order, comparing expression trees by shape rather
/// than by arena layout.
impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.decls().zip(other.decls()).all(|((_, a), (_, b))| {
                a.name == b.name && a.comment == b.comment && a.ty == b.ty && self.expr_eq(a.value, other, b.value)
            })
    }
}
