//! End-to-end tests across the public API: parse, build, promote, extract, serialize.

use std::collections::BTreeMap;

use nodelang::ast::{ConstDecl, Expr, Literal, Module, Promotion, Span, Type};
use nodelang::builder::{GraphCodeMap, NodeCode, Referrer, SocketType};
use nodelang::diagnostics::{AstError, ParseError, TokenizeError};
use nodelang::extract::{MappingTable, NodeDescriptor, OperationKind, describe};
use nodelang::serialize::serialize_module;
use nodelang::{lexer, parser};
use nodelang_core::lang::operators::OperatorId;
use nodelang_core::lang::types::PrimitiveTypeId;

// ============================================================================
// Lexing
// ============================================================================

#[test]
fn test_caret_operators_lex_longest_first() {
    let kinds = |src: &str| -> Vec<_> { lexer::lex(src).unwrap().into_iter().map(|t| t.kind).collect() };
    assert_eq!(kinds("^^"), vec![lexer::TokenKind::Operator(OperatorId::CaretCaret)]);
    assert_eq!(kinds("^/"), vec![lexer::TokenKind::Operator(OperatorId::CaretSlash)]);
    assert_eq!(
        kinds("^x"),
        vec![
            lexer::TokenKind::Operator(OperatorId::Caret),
            lexer::TokenKind::Ident("x".into())
        ]
    );
}

#[test]
fn test_next_token_is_driven_by_cursor() {
    let source = "const x = 1";
    let first = lexer::next_token(source, 0).unwrap().unwrap();
    assert_eq!(first.slice, "const");
    let second = lexer::next_token(source, first.span.end).unwrap().unwrap();
    assert_eq!(second.slice, "x");
    assert_eq!(second.span, Span::new(6, 7));
    assert_eq!(lexer::next_token(source, source.len()).unwrap(), None);
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_precedence_examples() {
    let module = parser::parse("const a = 1 + 2 * 3\nconst b = 1 - 2 - 3").unwrap();
    assert_eq!(serialize_module(&module), "const a = (1 + (2 * 3))\nconst b = ((1 - 2) - 3)");

    let a = module.lookup("a").unwrap();
    let Expr::BinOp(top) = &module[a.value] else {
        panic!("expected a binary operation");
    };
    assert_eq!(top.op, OperatorId::Plus);
    assert_eq!(module[top.left], Expr::Literal(Literal::Int(1)));
    assert!(matches!(&module[top.right], Expr::BinOp(inner) if inner.op == OperatorId::Star));
}

#[test]
fn test_typed_declaration() {
    let module = parser::parse("const x: Test = 5").unwrap();
    let decl = module.lookup("x").unwrap();
    assert_eq!(decl.ty, Some(Type::named("Test")));
    assert_eq!(module[decl.value], Expr::Literal(Literal::Int(5)));

    let module = parser::parse("const c: f32[4] = [1.0, 1.0, 1.0, 1.0]").unwrap();
    assert_eq!(
        module.lookup("c").unwrap().ty,
        Some(Type::array(Type::Primitive(PrimitiveTypeId::F32), 4))
    );
}

#[test]
fn test_lenient_parse_keeps_prefix() {
    let source = "const a = 1\nconst b = 2\nconst c = ";
    let parsed = parser::parse_module(source);
    assert_eq!(parsed.module.len(), 2);
    assert_eq!(parsed.cursor, "const a = 1\nconst b = 2".len());
    assert!(matches!(parsed.error, Some(ParseError::UnexpectedEof { .. })));
    assert!(parsed.into_result().is_err());
}

#[test]
fn test_strict_parse_reports_lexical_errors_with_span() {
    let err = parser::parse("const s = \"abc").unwrap_err();
    assert_eq!(
        err,
        ParseError::Tokenize(TokenizeError::UnterminatedString { span: Span::new(10, 14) })
    );
}

#[test]
fn test_parse_expr_entry_point() {
    let (module, expr) = parser::parse_expr("f(.x = 1, 2) ^^ y.z").unwrap();
    assert_eq!(
        nodelang::serialize::serialize_expr(&module, expr),
        "(f(.x = 1, 2) ^^ y.z)"
    );
    assert!(module.is_empty());
}

// ============================================================================
// Construction API
// ============================================================================

#[test]
fn test_prepend_before_target() {
    let mut module = Module::new();
    let one = module.literal(1);
    let two = module.literal(2);
    let three = module.literal(3);
    module.append_decl(ConstDecl::new("a", one)).unwrap();
    let t = module.append_decl(ConstDecl::new("t", two)).unwrap();
    module.prepend_decl(ConstDecl::new("d", three), Some(t)).unwrap();

    let names: Vec<&str> = module.decls().map(|(_, d)| d.name.as_str()).collect();
    assert_eq!(names, ["a", "d", "t"]);
    assert!(module.lookup("d").is_some());
    assert!(module.lookup("t").is_some());
}

#[test]
fn test_promotion_onto_existing_name_is_rejected() {
    let mut module = parser::parse("const taken = 1\nconst b = 2 + 3").unwrap();
    let value = module.lookup("b").unwrap().value;
    let before = serialize_module(&module);

    let err = module.promote(value, "taken".into(), None).unwrap_err();
    assert_eq!(err, AstError::DuplicateDecl { name: "taken".into() });
    assert_eq!(serialize_module(&module), before);

    let mut call = parser::parse("const c = f(1)").unwrap();
    let value = call.lookup("c").unwrap().value;
    assert_eq!(call.promote(value, "fresh".into(), None).unwrap(), Promotion::Unchanged);
}

// ============================================================================
// Graph building and rematerialization
// ============================================================================

/// Host node ids in a tiny shader graph:
/// `value(0.5) -> multiply -> principled.Roughness` and `multiply -> output.Displacement`.
const MULTIPLY: &str = "Math";
const PRINCIPLED: &str = "Principled BSDF";
const OUTPUT: &str = "Material Output";

#[test]
fn test_graph_walk_promotes_shared_math_node() {
    let mut map: GraphCodeMap<&str> = GraphCodeMap::new();

    // Visit the output node's inputs depth-first, as a host integration would.
    assert_eq!(map.ref_node_and_get(&PRINCIPLED, &Referrer::new(OUTPUT, "BSDF")).unwrap(), None);

    assert_eq!(map.ref_node_and_get(&MULTIPLY, &Referrer::new(PRINCIPLED, "Value")).unwrap(), None);
    let lhs = map.module_mut().literal(0.5);
    let rhs = map.module_mut().literal(2.0);
    let product = map.module_mut().bin_op(OperatorId::Star, lhs, rhs);
    map.insert_expr(MULTIPLY, product);

    let roughness = map.expr_for(NodeCode::Expr(product), None).unwrap();
    let shader = map.module_mut().call(
        "pbr_shader",
        vec![nodelang::ast::Arg::Named(nodelang::ast::NamedArg {
            name: "Roughness".into(),
            value: roughness,
        })],
    );
    let mut principled = ConstDecl::new(PRINCIPLED, shader);
    principled.ty = SocketType::Shader.primitive_type();
    let principled_id = map.declare(PRINCIPLED, principled).unwrap();

    let surface = map.expr_for(NodeCode::Decl(principled_id), Some("BSDF")).unwrap();
    let shared = map
        .ref_node_and_get(&MULTIPLY, &Referrer::new(OUTPUT, "Value"))
        .unwrap()
        .unwrap();
    let displacement = map.expr_for(shared, None).unwrap();
    let output = map.module_mut().call(
        "output",
        vec![
            nodelang::ast::Arg::Named(nodelang::ast::NamedArg {
                name: "Surface".into(),
                value: surface,
            }),
            nodelang::ast::Arg::Named(nodelang::ast::NamedArg {
                name: "Displacement".into(),
                value: displacement,
            }),
        ],
    );
    map.declare(OUTPUT, ConstDecl::new(OUTPUT, output)).unwrap();

    let module = map.into_module();
    let text = serialize_module(&module);
    assert_eq!(
        text,
        "const Value = (0.5 * 2.0)\n\
         const 'Principled BSDF': bsdf = pbr_shader(.Roughness = Value)\n\
         const 'Material Output' = output(.Surface = 'Principled BSDF'.BSDF, .Displacement = Value)"
    );
    assert_eq!(parser::parse(&text).unwrap(), module);
}

#[test]
fn test_rematerialization_lookup() {
    let table = MappingTable::builtin().unwrap();
    let module = parser::parse("const m = a * 2\nconst s = pbr_shader(.Roughness = m)").unwrap();

    let m = describe(&module, module.lookup("m").unwrap().value).unwrap();
    let entry = table.for_descriptor(&m).unwrap();
    assert_eq!(entry.node_type, "MATH");
    assert_eq!(entry.kind, OperationKind::Binary);

    let s = describe(&module, module.lookup("s").unwrap().value).unwrap();
    let NodeDescriptor::Call { args, .. } = &s else {
        panic!("expected a call");
    };
    assert_eq!(args[0].name.map(|n| n.as_str()), Some("Roughness"));
    let entry = table.for_descriptor(&s).unwrap();
    assert_eq!(entry.node_type, "BSDF_PRINCIPLED");
    assert!(entry.named_args);

    // And back: host node properties select the same entry.
    let props = BTreeMap::from([("operation".to_string(), serde_json::json!("MULTIPLY"))]);
    assert_eq!(table.for_node("MATH", &props), table.for_descriptor(&m));
}
