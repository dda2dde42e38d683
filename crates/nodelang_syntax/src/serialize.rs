//! Canonical source rendering for nodelang ASTs.
//!
//! Serialization is pure and total over the nodes of a [`Module`]. Output re-parses to a structurally equal
//! module (see `tests/property_tests.rs` at the workspace root).
//!
//! Layout rules:
//! - Identifiers are bare when they match `[A-Za-z][A-Za-z0-9_]*` and are not reserved, else `'quoted'`. Struct
//!   type names that spell a primitive tag are quoted too.
//! - Binary operations are always fully parenthesized: `(l op r)`, and printed without recursion.
//! - Calls with more than [`SerializeOptions::max_inline_args`] arguments put one argument per line, indented
//!   by [`SerializeOptions::indent_width`] spaces, with the closing `)` on its own line.
//! - Floats always contain a `.`.
//! - Declarations are joined by `\n`, with no trailing newline.

use std::fmt::{self, Write as _};

use crate::ast::{Arg, Call, ConstDecl, Expr, ExprId, Ident, Literal, Module, Type};
use nodelang_core::lang::operators::{self, OperatorId};
use nodelang_core::lang::types;

/// Layout knobs for the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Calls with at most this many arguments stay on one line.
    pub max_inline_args: usize,
    /// Indentation of wrapped call arguments.
    pub indent_width: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            max_inline_args: 4,
            indent_width: 2,
        }
    }
}

/// Serialize every declaration of `module`, in stored order.
pub fn serialize_module(module: &Module) -> String {
    serialize_module_with(module, &SerializeOptions::default())
}

#[tracing::instrument(skip_all, fields(decl_count = module.len()))]
pub fn serialize_module_with(module: &Module, options: &SerializeOptions) -> String {
    let printer = Printer { module, options };
    module
        .decls()
        .map(|(_, decl)| printer.decl(decl))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn serialize_decl(module: &Module, decl: &ConstDecl) -> String {
    Printer {
        module,
        options: &SerializeOptions::default(),
    }
    .decl(decl)
}

pub fn serialize_expr(module: &Module, expr: ExprId) -> String {
    Printer {
        module,
        options: &SerializeOptions::default(),
    }
    .expr(expr)
}

// ============================================================================
// Printer
// ============================================================================

struct Printer<'m> {
    module: &'m Module,
    options: &'m SerializeOptions,
}

impl Printer<'_> {
    fn decl(&self, decl: &ConstDecl) -> String {
        let mut out = String::new();
        if let Some(comment) = decl.comment.as_deref() {
            for line in comment.split('\n') {
                out.push_str("///");
                if !line.is_empty() {
                    out.push(' ');
                    out.push_str(line);
                }
                out.push('\n');
            }
        }
        let _ = write!(out, "const {}", decl.name);
        if let Some(ty) = &decl.ty {
            let _ = write!(out, ": {ty}");
        }
        let _ = write!(out, " = {}", self.expr(decl.value));
        out
    }

    fn expr(&self, id: ExprId) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, id);
        out
    }

    /// Binary operations are walked with an explicit stack; only call arguments recurse.
    fn write_expr(&self, out: &mut String, id: ExprId) {
        let mut stack = vec![Piece::Expr(id)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Open => out.push('('),
                Piece::Close => out.push(')'),
                Piece::Operator(op) => {
                    let _ = write!(out, " {} ", operators::as_str(op));
                }
                Piece::Expr(id) => match &self.module[id] {
                    Expr::BinOp(bin) => {
                        stack.extend([
                            Piece::Close,
                            Piece::Expr(bin.right),
                            Piece::Operator(bin.op),
                            Piece::Expr(bin.left),
                            Piece::Open,
                        ]);
                    }
                    Expr::VarRef(var) => {
                        let _ = write!(out, "{}", var.name);
                        for field in &var.derefs {
                            let _ = write!(out, ".{field}");
                        }
                    }
                    Expr::Literal(value) => {
                        let _ = write!(out, "{value}");
                    }
                    Expr::Call(call) => out.push_str(&self.call(call)),
                },
            }
        }
    }

    fn call(&self, call: &Call) -> String {
        let args: Vec<String> = call.args.iter().map(|arg| self.arg(arg)).collect();
        if args.len() <= self.options.max_inline_args {
            format!("{}({})", call.callee, args.join(", "))
        } else {
            let indent = " ".repeat(self.options.indent_width);
            let body = args
                .iter()
                .map(|arg| indent_lines(arg, &indent))
                .collect::<Vec<_>>()
                .join(",\n");
            format!("{}(\n{body}\n)", call.callee)
        }
    }

    fn arg(&self, arg: &Arg) -> String {
        match arg {
            Arg::Positional(value) => self.expr(*value),
            Arg::Named(named) => format!(".{} = {}", named.name, self.expr(named.value)),
        }
    }
}

/// Pending output of [`Printer::write_expr`], popped last-in first-out.
enum Piece {
    Open,
    Close,
    Operator(OperatorId),
    Expr(ExprId),
}

/// Prefix every line of `text` with `indent`. Nested wrapped calls are the only multi-line arguments.
fn indent_lines(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Leaf rendering
// ============================================================================

/// Escape `text` for a `quote`-delimited string or identifier.
pub fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Float text that always lexes back as a float. Non-finite values have no literal form.
fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_quoted() {
            write!(f, "'{}'", escape(self.as_str(), '\''))
        } else {
            f.write_str(self.as_str())
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "\"{}\"", escape(s, '"')),
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Float(v) => f.write_str(&format_float(*v)),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
            Literal::Array(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(id) => f.write_str(types::as_str(*id)),
            // A bare primitive tag would read back as the primitive.
            Type::Struct(st) if types::from_str(st.name.as_str()).is_some() => {
                write!(f, "'{}'", escape(st.name.as_str(), '\''))
            }
            Type::Struct(st) => write!(f, "{}", st.name),
            Type::Array(elem, len) => write!(f, "{elem}[{len}]"),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_module(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NamedArg, StructType, VarRef};
    use nodelang_core::lang::operators::OperatorId;
    use nodelang_core::lang::types::PrimitiveTypeId;

    fn call_with(count: usize) -> (Module, ExprId) {
        let mut module = Module::new();
        let args = (1..=count as i64).map(|n| Arg::Positional(module.literal(n))).collect();
        let call = module.call("f", args);
        (module, call)
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(Ident::new("my var").to_string(), "'my var'");
        assert_eq!(Ident::new("foo_2").to_string(), "foo_2");
        assert_eq!(Ident::new("it's").to_string(), r"'it\'s'");
        assert_eq!(Ident::new("const").to_string(), "'const'");
        assert_eq!(Ident::new("tab\there").to_string(), r"'tab\there'");
    }

    #[test]
    fn test_four_args_stay_inline() {
        let (module, call) = call_with(4);
        assert_eq!(serialize_expr(&module, call), "f(1, 2, 3, 4)");
    }

    #[test]
    fn test_five_args_wrap() {
        let (module, call) = call_with(5);
        assert_eq!(serialize_expr(&module, call), "f(\n  1,\n  2,\n  3,\n  4,\n  5\n)");
    }

    #[test]
    fn test_custom_wrap_options() {
        let (mut module, call) = call_with(2);
        module.append_decl(ConstDecl::new("x", call)).unwrap();
        let options = SerializeOptions {
            max_inline_args: 1,
            indent_width: 4,
        };
        assert_eq!(serialize_module_with(&module, &options), "const x = f(\n    1,\n    2\n)");
    }

    #[test]
    fn test_nested_wrapped_call_is_indented() {
        let mut module = Module::new();
        let inner_args = (1..=5).map(|n| Arg::Positional(module.literal(n))).collect();
        let inner = module.call("g", inner_args);
        let mut outer_args = vec![Arg::Positional(inner)];
        for n in 0..4 {
            outer_args.push(Arg::Positional(module.literal(n)));
        }
        let outer = module.call("f", outer_args);
        assert_eq!(
            serialize_expr(&module, outer),
            "f(\n  g(\n    1,\n    2,\n    3,\n    4,\n    5\n  ),\n  0,\n  1,\n  2,\n  3\n)"
        );
    }

    #[test]
    fn test_bin_op_and_named_args() {
        let mut module = Module::new();
        let a = module.var_ref(VarRef::new("uv").with_deref("x"));
        let b = module.literal(2.0);
        let mul = module.bin_op(OperatorId::Star, a, b);
        let call = module.call(
            "noise",
            vec![Arg::Named(NamedArg {
                name: Ident::new("scale"),
                value: mul,
            })],
        );
        assert_eq!(serialize_expr(&module, call), "noise(.scale = (uv.x * 2.0))");
    }

    #[test]
    fn test_literals() {
        assert_eq!(Literal::Float(1.0).to_string(), "1.0");
        assert_eq!(Literal::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Literal::Float(0.25).to_string(), "0.25");
        assert_eq!(Literal::Float(1e21).to_string(), "1000000000000000000000.0");
        assert_eq!(Literal::Str("a\"b\\\n".into()).to_string(), r#""a\"b\\\n""#);
        assert_eq!(Literal::Str("\u{7}".into()).to_string(), r#""\u{0007}""#);
        assert_eq!(Literal::Null.to_string(), "null");
        assert_eq!(
            Literal::from(vec![Literal::Int(1), Literal::Array(vec![])]).to_string(),
            "[1, []]"
        );
    }

    #[test]
    fn test_types() {
        assert_eq!(Type::Primitive(PrimitiveTypeId::Bsdf).to_string(), "bsdf");
        assert_eq!(Type::array(Type::Primitive(PrimitiveTypeId::F32), 3).to_string(), "f32[3]");
        assert_eq!(Type::named("Material Params").to_string(), "'Material Params'");
    }

    #[test]
    fn test_struct_named_like_a_primitive_is_quoted() {
        let shadow = Type::Struct(StructType {
            name: "f32".into(),
            members: Vec::new(),
        });
        assert_eq!(shadow.to_string(), "'f32'");
        assert_eq!(Type::array(shadow, 2).to_string(), "'f32'[2]");
    }

    #[test]
    fn test_long_operator_chains_serialize() {
        let mut module = Module::new();
        let mut right_deep = module.literal(1);
        let mut left_deep = module.literal(2);
        for _ in 0..100_000 {
            let one = module.literal(1);
            right_deep = module.bin_op(OperatorId::Plus, one, right_deep);
            let two = module.literal(2);
            left_deep = module.bin_op(OperatorId::Star, left_deep, two);
        }

        let text = serialize_expr(&module, right_deep);
        assert!(text.starts_with("(1 + (1 + "));
        assert!(text.ends_with(" 1))"));
        assert_eq!(text.matches('(').count(), 100_000);

        let text = serialize_expr(&module, left_deep);
        assert!(text.starts_with(&"(".repeat(100_000)));
        assert!(text[100_000..].starts_with("2 * 2) * 2)"));
        assert_eq!(text.matches(')').count(), 100_000);
    }

    #[test]
    fn test_decl_with_comment_and_type() {
        let mut module = Module::new();
        let v = module.literal(5);
        let decl = ConstDecl::new("x", v)
            .with_type(Type::named("Test"))
            .with_comment("first\n\nthird");
        assert_eq!(serialize_decl(&module, &decl), "/// first\n///\n/// third\nconst x: Test = 5");
    }

    #[test]
    fn test_empty_comment_keeps_its_marker() {
        let mut module = Module::new();
        let v = module.literal(5);
        let decl = ConstDecl::new("x", v).with_comment("");
        assert_eq!(serialize_decl(&module, &decl), "///\nconst x = 5");
    }

    #[test]
    fn test_module_joins_with_newlines() {
        let mut module = Module::new();
        let one = module.literal(1);
        let two = module.literal(2);
        module.append_decl(ConstDecl::new("a", one)).unwrap();
        module.append_decl(ConstDecl::new("b", two)).unwrap();
        assert_eq!(module.to_string(), "const a = 1\nconst b = 2");
        assert_eq!(serialize_module(&Module::new()), "");
    }
}
