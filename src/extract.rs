//! Read-only views of AST nodes, for the layer that turns declarations back into host graph nodes.
//!
//! [`describe`] flattens one expression into a [`NodeDescriptor`]: its kind plus the values or child ids a
//! host node needs. [`MappingTable`] says which host node type implements each operator and function; it is
//! plain JSON so integrations can ship their own.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nodelang_core::lang::operators::{self, OperatorId};
use nodelang_syntax::ast::{Arg, Expr, ExprId, Ident, Literal, Module};
use nodelang_syntax::diagnostics::AstError;

// ============================================================================
// Descriptors
// ============================================================================

/// One expression node, as seen by the rematerialization layer.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeDescriptor<'m> {
    Reference { name: &'m Ident, derefs: &'m [Ident] },
    Literal(&'m Literal),
    Call { function: &'m Ident, args: Vec<ArgDescriptor<'m>> },
    BinOp { operator: OperatorId, left: ExprId, right: ExprId },
}

/// A call argument. Children are ids; describe them in turn to walk the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgDescriptor<'m> {
    pub name: Option<&'m Ident>,
    pub value: ExprId,
}

impl NodeDescriptor<'_> {
    /// Node kind tag: `reference`, `literal`, `call` or `binary operation`.
    pub fn kind(&self) -> &'static str {
        match self {
            NodeDescriptor::Reference { .. } => "reference",
            NodeDescriptor::Literal(_) => "literal",
            NodeDescriptor::Call { .. } => "call",
            NodeDescriptor::BinOp { .. } => "binary operation",
        }
    }

    /// Function name or operator spelling, for operation nodes.
    pub fn operation(&self) -> Option<&str> {
        match self {
            NodeDescriptor::Call { function, .. } => Some(function.as_str()),
            NodeDescriptor::BinOp { operator, .. } => Some(operators::as_str(*operator)),
            NodeDescriptor::Reference { .. } | NodeDescriptor::Literal(_) => None,
        }
    }
}

/// Describe the expression at `expr`.
pub fn describe(module: &Module, expr: ExprId) -> Result<NodeDescriptor<'_>, AstError> {
    let node = module
        .get_expr(expr)
        .ok_or(AstError::UnknownExpr { index: expr.index() })?;
    Ok(match node {
        Expr::VarRef(var) => NodeDescriptor::Reference {
            name: &var.name,
            derefs: &var.derefs,
        },
        Expr::Literal(value) => NodeDescriptor::Literal(value),
        Expr::Call(call) => NodeDescriptor::Call {
            function: &call.callee,
            args: call
                .args
                .iter()
                .map(|arg| match arg {
                    Arg::Positional(value) => ArgDescriptor {
                        name: None,
                        value: *value,
                    },
                    Arg::Named(named) => ArgDescriptor {
                        name: Some(&named.name),
                        value: named.value,
                    },
                })
                .collect(),
        },
        Expr::BinOp(bin) => NodeDescriptor::BinOp {
            operator: bin.op,
            left: bin.left,
            right: bin.right,
        },
    })
}

// ============================================================================
// Mapping table
// ============================================================================

const BUILTIN_SHADER_MAPPING: &str = include_str!("../assets/shader_mapping.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// `operation` is an operator spelling (`+`, `^^`, ...).
    Binary,
    /// `operation` is a function name.
    Function,
}

/// One host node type and the nodelang operation it implements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationMapping {
    pub node_type: String,
    /// Node properties that must match for this entry to apply (for example a math node's `operation`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
    pub kind: OperationKind,
    pub operation: String,
    /// Arguments are passed as `.socket = value` rather than positionally.
    #[serde(default)]
    pub named_args: bool,
}

impl OperationMapping {
    fn matches_node(&self, node_type: &str, properties: &BTreeMap<String, serde_json::Value>) -> bool {
        self.node_type == node_type
            && self
                .properties
                .iter()
                .all(|(key, value)| properties.get(key) == Some(value))
    }
}

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("failed to read mapping table {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mapping for node type `{node_type}` names unknown operator `{operation}`")]
    UnknownOperator { node_type: String, operation: String },
}

/// Table from host node types to nodelang operations, usable in both directions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingTable {
    #[serde(default)]
    pub operations: Vec<OperationMapping>,
}

impl MappingTable {
    /// The shader-node table that ships with this crate.
    pub fn builtin() -> Result<Self, MappingError> {
        Self::from_json_str(BUILTIN_SHADER_MAPPING)
    }

    pub fn from_json_str(json: &str) -> Result<Self, MappingError> {
        let table: MappingTable = serde_json::from_str(json)?;
        table.validate()?;
        tracing::debug!(entries = table.operations.len(), "loaded mapping table");
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), MappingError> {
        for entry in &self.operations {
            if entry.kind == OperationKind::Binary && operators::from_str(&entry.operation).is_none() {
                return Err(MappingError::UnknownOperator {
                    node_type: entry.node_type.clone(),
                    operation: entry.operation.clone(),
                });
            }
        }
        Ok(())
    }

    /// First entry for a host node of `node_type` whose required properties all match.
    pub fn for_node(
        &self,
        node_type: &str,
        properties: &BTreeMap<String, serde_json::Value>,
    ) -> Option<&OperationMapping> {
        self.operations
            .iter()
            .find(|entry| entry.matches_node(node_type, properties))
    }

    /// Host node entry implementing a described call or binary operation.
    pub fn for_descriptor(&self, descriptor: &NodeDescriptor<'_>) -> Option<&OperationMapping> {
        let (kind, operation) = match descriptor {
            NodeDescriptor::Call { function, .. } => (OperationKind::Function, function.as_str()),
            NodeDescriptor::BinOp { operator, .. } => (OperationKind::Binary, operators::as_str(*operator)),
            NodeDescriptor::Reference { .. } | NodeDescriptor::Literal(_) => return None,
        };
        self.operations
            .iter()
            .find(|entry| entry.kind == kind && entry.operation == operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodelang_syntax::parser::parse;

    fn value_of(module: &Module, name: &str) -> ExprId {
        module.lookup(name).unwrap().value
    }

    #[test]
    fn test_describe_each_kind() {
        let module = parse("const a = 1.5\nconst b = a.x + 2\nconst c = mix(.f = a, b)").unwrap();

        let a = describe(&module, value_of(&module, "a")).unwrap();
        assert_eq!(a, NodeDescriptor::Literal(&Literal::Float(1.5)));
        assert_eq!(a.kind(), "literal");
        assert_eq!(a.operation(), None);

        let b = describe(&module, value_of(&module, "b")).unwrap();
        let NodeDescriptor::BinOp { operator, left, .. } = b else {
            panic!("expected a binary operation");
        };
        assert_eq!(operator, OperatorId::Plus);
        let left = describe(&module, left).unwrap();
        assert!(matches!(
            left,
            NodeDescriptor::Reference { name, derefs } if name.as_str() == "a" && derefs.len() == 1
        ));

        let c = describe(&module, value_of(&module, "c")).unwrap();
        assert_eq!(c.operation(), Some("mix"));
        let NodeDescriptor::Call { args, .. } = c else {
            panic!("expected a call");
        };
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name.map(Ident::as_str), Some("f"));
        assert_eq!(args[1].name, None);
    }

    #[test]
    fn test_describe_unknown_expr() {
        let module = Module::new();
        let other = {
            let mut m = Module::new();
            m.literal(1)
        };
        assert_eq!(describe(&module, other), Err(AstError::UnknownExpr { index: 0 }));
    }

    #[test]
    fn test_builtin_table_lookups() {
        let table = MappingTable::builtin().unwrap();
        let props = BTreeMap::from([("operation".to_string(), serde_json::json!("MULTIPLY"))]);
        let entry = table.for_node("MATH", &props).unwrap();
        assert_eq!(entry.kind, OperationKind::Binary);
        assert_eq!(entry.operation, "*");

        let principled = table.for_node("BSDF_PRINCIPLED", &BTreeMap::new()).unwrap();
        assert_eq!(principled.operation, "pbr_shader");
        assert!(principled.named_args);

        assert!(table.for_node("MATH", &BTreeMap::new()).is_none());
        assert!(table.for_node("TEX_NOISE", &BTreeMap::new()).is_none());
    }

    #[test]
    fn test_for_descriptor() {
        let table = MappingTable::builtin().unwrap();
        let module = parse("const s = sin(1.0)\nconst d = 4 / 2\nconst p = 2 ** 3").unwrap();

        let sin = describe(&module, value_of(&module, "s")).unwrap();
        let entry = table.for_descriptor(&sin).unwrap();
        assert_eq!(entry.node_type, "MATH");
        assert_eq!(entry.properties["operation"], "SIN");

        let div = describe(&module, value_of(&module, "d")).unwrap();
        assert_eq!(table.for_descriptor(&div).unwrap().properties["operation"], "DIV");

        let pow = describe(&module, value_of(&module, "p")).unwrap();
        assert!(table.for_descriptor(&pow).is_none());
    }

    #[test]
    fn test_rejects_unknown_operator() {
        let json = r#"{ "operations": [ { "node_type": "MATH", "kind": "binary", "operation": "%" } ] }"#;
        let err = MappingTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, MappingError::UnknownOperator { ref operation, .. } if operation == "%"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = MappingTable::from_json_str(r#"{ "operations": [ { "kind": "unary" } ] }"#).unwrap_err();
        assert!(matches!(err, MappingError::Json(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mapping.json");
        fs::write(&path, r#"{ "operations": [] }"#).unwrap();
        let table = MappingTable::from_path(&path).unwrap();
        assert!(table.operations.is_empty());

        let err = MappingTable::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, MappingError::Io { .. }));
    }
}
