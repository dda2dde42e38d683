//! Bookkeeping for building a nodelang [`Module`] from a host node graph.
//!
//! The graph walk itself belongs to the host integration. It visits nodes depth-first from the output nodes and
//! reports each visit here. [`GraphCodeMap`] remembers which AST node each host node became, and when a node is
//! reached a second time it promotes the inline expression to a named declaration so both consumers can refer
//! to it by name.
//!
//! ```rust
//! use nodelang::builder::{GraphCodeMap, NodeCode, Referrer};
//! use nodelang::ast::ConstDecl;
//! use nodelang_core::lang::operators::OperatorId;
//!
//! let mut map = GraphCodeMap::new();
//! let (a, b) = (map.module_mut().literal(1.5), map.module_mut().literal(2.0));
//! let sum = map.module_mut().bin_op(OperatorId::Plus, a, b);
//! map.insert_expr("add", sum);
//!
//! // `out` is the first consumer of `add` and holds the expression inline.
//! map.declare("out", ConstDecl::new("out", sum)).unwrap();
//! assert_eq!(map.module().to_string(), "const out = (1.5 + 2.0)");
//!
//! // A second consumer of `add` promotes it to a declaration placed before `out`.
//! let code = map.ref_node_and_get(&"add", &Referrer::new("out", "Value")).unwrap();
//! assert_eq!(code, Some(NodeCode::Expr(sum)));
//! assert_eq!(map.module().to_string(), "const Value = (1.5 + 2.0)\nconst out = Value");
//! ```

mod socket;

pub use socket::{SocketType, UnknownSocketType};

use std::collections::HashMap;
use std::hash::Hash;

use nodelang_syntax::ast::{ConstDecl, DeclId, ExprId, Ident, Module, Promotion, VarRef};
use nodelang_syntax::diagnostics::AstError;

/// The consumer side of a graph link: the node that reads a value and the name of the socket it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referrer<K> {
    pub node: K,
    pub name: String,
}

impl<K> Referrer<K> {
    pub fn new(node: K, name: impl Into<String>) -> Self {
        Self {
            node,
            name: name.into(),
        }
    }
}

/// What a visited host node turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCode {
    /// An inline expression (math nodes, literals). May later be promoted.
    Expr(ExprId),
    /// A named declaration.
    Decl(DeclId),
}

/// Map from host nodes (`K`) to the code they produced, plus the module being built.
#[derive(Debug, Clone)]
pub struct GraphCodeMap<K> {
    module: Module,
    node_to_code: HashMap<K, NodeCode>,
}

impl<K: Eq + Hash> Default for GraphCodeMap<K> {
    fn default() -> Self {
        Self::with_module(Module::new())
    }
}

impl<K: Eq + Hash> GraphCodeMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(module: Module) -> Self {
        Self {
            module,
            node_to_code: HashMap::new(),
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    pub fn into_module(self) -> Module {
        self.module
    }

    pub fn get(&self, node: &K) -> Option<NodeCode> {
        self.node_to_code.get(node).copied()
    }

    pub fn contains(&self, node: &K) -> bool {
        self.node_to_code.contains_key(node)
    }

    /// Record that `node` produced an inline expression.
    pub fn insert_expr(&mut self, node: K, expr: ExprId) {
        self.node_to_code.insert(node, NodeCode::Expr(expr));
    }

    /// Append `decl` to the module and record it as the code for `node`.
    pub fn declare(&mut self, node: K, decl: ConstDecl) -> Result<DeclId, AstError> {
        let id = self.module.append_decl(decl)?;
        self.node_to_code.insert(node, NodeCode::Decl(id));
        Ok(id)
    }

    /// Look up a node that is being referenced again, promoting it first if it is an inline expression.
    ///
    /// Returns `None` if `node` has not been visited yet; the caller builds it then.
    pub fn ref_node_and_get(&mut self, node: &K, referrer: &Referrer<K>) -> Result<Option<NodeCode>, AstError> {
        let Some(code) = self.get(node) else {
            return Ok(None);
        };
        self.promote(code, referrer)?;
        Ok(Some(code))
    }

    fn promote(&mut self, code: NodeCode, referrer: &Referrer<K>) -> Result<Promotion, AstError> {
        let NodeCode::Expr(expr) = code else {
            return Ok(Promotion::Unchanged);
        };
        // The referrer may not be declared yet (it is still collecting its inputs); then the new
        // declaration goes to the front of the module.
        let target = match self.get(&referrer.node) {
            Some(NodeCode::Decl(id)) => Some(id),
            _ => None,
        };
        let name = self.module.fresh_name(&referrer.name);
        self.module.promote(expr, name, target)
    }

    /// An expression usable as a call argument for `code`.
    ///
    /// Inline expressions are shared as-is. Declarations get a fresh reference, with `field` as a deref when
    /// the consumer reads a specific output socket.
    pub fn expr_for(&mut self, code: NodeCode, field: Option<&str>) -> Result<ExprId, AstError> {
        match code {
            NodeCode::Expr(id) => Ok(id),
            NodeCode::Decl(id) => {
                let name: Ident = self
                    .module
                    .decl(id)
                    .ok_or(AstError::UnknownDecl { index: id.index() })?
                    .name
                    .clone();
                let var = match field {
                    Some(field) => VarRef::new(name).with_deref(field),
                    None => VarRef::new(name),
                };
                Ok(self.module.var_ref(var))
            }
        }
    }
}
