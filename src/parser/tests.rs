//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Function, parameter, variable and array definitions
//! - Statements and control flow
//! - Expression precedence and associativity
//! - Conditions, including parenthesised comparisons
//! - Syntax errors

use std::rc::Rc;

use super::parser::parse;
use crate::{
    ast::{
        ast::{ArithOp, CompareOp, Cond, Expr, LValue, LocalDef, LogicOp, Sign, Stmt},
        definitions::FuncDef,
        types::{ArrayType, DataType, Primitive},
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<FuncDef, Error> {
    let tokens = tokenize(source.to_string(), Some("test.alan".to_string())).unwrap();
    parse(tokens, Rc::new("test.alan".to_string()))
}

/// Parses `source` as the only statement of an empty procedure.
fn parse_single_stmt(source: &str) -> Stmt {
    let program = parse_source(&format!("main() : proc x : int; {{ {} }}", source)).unwrap();
    assert_eq!(program.body.body.len(), 1);
    program.body.body[0].clone()
}

fn assigned_expr(source: &str) -> Expr {
    match parse_single_stmt(&format!("x = {};", source)) {
        Stmt::Assign(assign) => assign.expr,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn if_cond(source: &str) -> Cond {
    match parse_single_stmt(&format!("if ({}) ;", source)) {
        Stmt::If(if_stmt) => if_stmt.cond,
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_minimal_program() {
    let program = parse_source("main() : proc { }").unwrap();

    assert_eq!(program.name, "main");
    assert!(program.parameters.is_empty());
    assert_eq!(program.return_type, None);
    assert!(program.locals.is_empty());
    assert!(program.body.body.is_empty());
}

#[test]
fn test_parse_function_header() {
    let source = "main() : proc f(n : int, reference s : byte) : proc { } { }";
    assert!(parse_source(source).is_err());

    let source = "main() : proc f(n : int, s : reference byte[], c : byte) : int { return n; } { }";
    let program = parse_source(source).unwrap();

    let function = match &program.locals[0] {
        LocalDef::Func(function) => function,
        other => panic!("expected a function, got {:?}", other),
    };
    assert_eq!(function.name, "f");
    assert_eq!(function.return_type, Some(Primitive::Int));
    assert_eq!(function.parameters.len(), 3);

    assert_eq!(function.parameters[0].data_type, DataType::Primitive(Primitive::Int));
    assert!(!function.parameters[0].by_reference);

    assert_eq!(
        function.parameters[1].data_type,
        DataType::Array(ArrayType {
            element: Primitive::Byte,
            size: None
        })
    );
    assert!(function.parameters[1].by_reference);

    assert_eq!(function.parameters[2].name, "c");
}

#[test]
fn test_parse_local_definitions_in_order() {
    let source = r#"
        main() : proc
            a : int;
            buffer : byte[32];
            helper() : proc { }
            b : byte;
        { }
    "#;
    let program = parse_source(source).unwrap();

    let names: Vec<&str> = program.locals.iter().map(|local| local.get_name()).collect();
    assert_eq!(names, vec!["a", "buffer", "helper", "b"]);

    match &program.locals[1] {
        LocalDef::Array(array) => {
            assert_eq!(array.element_type, Primitive::Byte);
            assert_eq!(array.size, 32);
        }
        other => panic!("expected an array, got {:?}", other),
    }
    assert!(matches!(&program.locals[0], LocalDef::PrimVar(var) if var.data_type == Primitive::Int));
}

#[test]
fn test_parse_deeply_nested_functions() {
    let source = "main() : proc a() : proc b() : proc c() : proc { } { } { } { }";
    let program = parse_source(source).unwrap();

    let a = match &program.locals[0] {
        LocalDef::Func(function) => function,
        _ => panic!("expected a function"),
    };
    let b = match &a.locals[0] {
        LocalDef::Func(function) => function,
        _ => panic!("expected a function"),
    };
    assert!(matches!(&b.locals[0], LocalDef::Func(c) if c.name == "c"));
}

#[test]
fn test_sized_array_parameter_is_rejected() {
    let error = parse_source("main() : proc f(s : byte[4]) : proc { } { }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_unsized_array_variable_is_rejected() {
    let error = parse_source("main() : proc s : byte[]; { }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_array_return_type_is_rejected() {
    let error = parse_source("main() : proc f() : int[] { } { }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_two_dimensional_array_is_rejected() {
    assert!(parse_source("main() : proc m : int[2][2]; { }").is_err());
}

#[test]
fn test_trailing_tokens_are_rejected() {
    let error = parse_source("main() : proc { } extra").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_missing_semicolon() {
    let error = parse_source("main() : proc x : int; { x = 1 }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_unclosed_body() {
    assert!(parse_source("main() : proc { writeInteger(1);").is_err());
}

#[test]
fn test_number_too_large() {
    let error = parse_source("main() : proc x : int; { x = 99999999999; }").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_negated_literal_uses_full_int_range() {
    assert!(matches!(assigned_expr("-2147483648"), Expr::IntLit(literal) if literal.value == i32::MIN));
    assert!(matches!(assigned_expr("-7"), Expr::IntLit(literal) if literal.value == -7));
    assert!(matches!(assigned_expr("2147483647"), Expr::IntLit(literal) if literal.value == i32::MAX));

    let error = parse_source("main() : proc x : int; { x = 2147483648; }").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");

    let error = parse_source("main() : proc x : int; { x = -2147483649; }").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_empty_statement_is_empty_compound() {
    match parse_single_stmt(";") {
        Stmt::Compound(compound) => assert!(compound.body.is_empty()),
        other => panic!("expected an empty compound, got {:?}", other),
    }
}

#[test]
fn test_parse_call_statement() {
    match parse_single_stmt("strcpy(s, \"abc\");") {
        Stmt::Call(call) => {
            assert_eq!(call.call.name, "strcpy");
            assert_eq!(call.call.args.len(), 2);
            assert!(matches!(&call.call.args[1], Expr::StrLit(literal) if literal.value == b"abc"));
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_parse_array_element_assignment() {
    match parse_single_stmt("buffer[i + 1] = 'z';") {
        Stmt::Assign(assign) => {
            assert!(matches!(&assign.lvalue, LValue::ArrayElem(elem) if elem.name == "buffer"));
            assert!(matches!(&assign.expr, Expr::CharLit(literal) if literal.value == b'z'));
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_return_forms() {
    assert!(matches!(parse_single_stmt("return;"), Stmt::Return(ret) if ret.expr.is_none()));
    assert!(matches!(parse_single_stmt("return x;"), Stmt::Return(ret) if ret.expr.is_some()));
}

#[test]
fn test_dangling_else_binds_innermost() {
    match parse_single_stmt("if (x > 0) if (x > 1) x = 2; else x = 3;") {
        Stmt::If(outer) => assert!(matches!(*outer.stmt, Stmt::IfElse(_))),
        other => panic!("expected an if without else, got {:?}", other),
    }
}

#[test]
fn test_parse_while_with_compound_body() {
    match parse_single_stmt("while (x < 10) { x = x + 1; writeInteger(x); }") {
        Stmt::While(while_stmt) => {
            assert!(matches!(&*while_stmt.stmt, Stmt::Compound(body) if body.body.len() == 2))
        }
        other => panic!("expected a while loop, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    match assigned_expr("1 + 2 * 3") {
        Expr::BinaryArith(add) => {
            assert_eq!(add.op, ArithOp::Add);
            assert!(matches!(*add.left, Expr::IntLit(ref literal) if literal.value == 1));
            assert!(matches!(*add.right, Expr::BinaryArith(ref mul) if mul.op == ArithOp::Mul));
        }
        other => panic!("expected an addition, got {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    match assigned_expr("10 - 4 - 3") {
        Expr::BinaryArith(outer) => {
            assert_eq!(outer.op, ArithOp::Sub);
            assert!(matches!(*outer.left, Expr::BinaryArith(ref inner) if inner.op == ArithOp::Sub));
            assert!(matches!(*outer.right, Expr::IntLit(ref literal) if literal.value == 3));
        }
        other => panic!("expected a subtraction, got {:?}", other),
    }
}

#[test]
fn test_unary_sign_binds_tightest() {
    match assigned_expr("-x * 2") {
        Expr::BinaryArith(mul) => {
            assert_eq!(mul.op, ArithOp::Mul);
            assert!(matches!(*mul.left, Expr::UnaryArith(ref unary) if unary.sign == Sign::Minus));
        }
        other => panic!("expected a multiplication, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    match assigned_expr("(1 + 2) % n") {
        Expr::BinaryArith(modulo) => {
            assert_eq!(modulo.op, ArithOp::Mod);
            assert!(matches!(*modulo.left, Expr::BinaryArith(ref add) if add.op == ArithOp::Add));
        }
        other => panic!("expected a modulo, got {:?}", other),
    }
}

#[test]
fn test_call_inside_expression() {
    match assigned_expr("strlen(s) + a[f(1, 2)]") {
        Expr::BinaryArith(add) => {
            assert!(matches!(*add.left, Expr::Call(ref call) if call.name == "strlen"));
            assert!(matches!(*add.right, Expr::ArrayElem(ref elem) if elem.name == "a"));
        }
        other => panic!("expected an addition, got {:?}", other),
    }
}

#[test]
fn test_condition_constants() {
    assert!(matches!(if_cond("true"), Cond::Const(cond) if cond.value));
    assert!(matches!(if_cond("false"), Cond::Const(cond) if !cond.value));
}

#[test]
fn test_and_binds_tighter_than_or() {
    match if_cond("a < 1 | b < 2 & c < 3") {
        Cond::Logic(or) => {
            assert_eq!(or.op, LogicOp::Or);
            assert!(matches!(*or.left, Cond::Compare(_)));
            assert!(matches!(*or.right, Cond::Logic(ref and) if and.op == LogicOp::And));
        }
        other => panic!("expected a disjunction, got {:?}", other),
    }
}

#[test]
fn test_not_binds_tighter_than_and() {
    match if_cond("!a == 1 & true") {
        Cond::Logic(and) => {
            assert_eq!(and.op, LogicOp::And);
            assert!(matches!(*and.left, Cond::Not(_)));
        }
        other => panic!("expected a conjunction, got {:?}", other),
    }
}

#[test]
fn test_parenthesised_condition() {
    match if_cond("!(a == 1 | b == 2)") {
        Cond::Not(not) => assert!(matches!(*not.cond, Cond::Logic(ref or) if or.op == LogicOp::Or)),
        other => panic!("expected a negation, got {:?}", other),
    }
}

#[test]
fn test_parenthesised_expression_in_comparison() {
    match if_cond("(a + 1) * 2 >= b") {
        Cond::Compare(compare) => {
            assert_eq!(compare.op, CompareOp::Ge);
            assert!(matches!(*compare.left, Expr::BinaryArith(ref mul) if mul.op == ArithOp::Mul));
        }
        other => panic!("expected a comparison, got {:?}", other),
    }
}

#[test]
fn test_nested_parentheses_in_comparison() {
    match if_cond("((a)) != 0") {
        Cond::Compare(compare) => {
            assert_eq!(compare.op, CompareOp::Ne);
            assert!(matches!(*compare.left, Expr::VarRef(ref var) if var.name == "a"));
        }
        other => panic!("expected a comparison, got {:?}", other),
    }
}

#[test]
fn test_comparison_requires_operator() {
    let error = parse_source("main() : proc x : int; { if (x) ; }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_string_literal_lvalue() {
    match parse_single_stmt("\"abc\" = x;") {
        Stmt::Assign(assign) => assert!(matches!(assign.lvalue, LValue::Str(_))),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_spans_cover_source() {
    let source = "main() : proc { writeInteger(42); }";
    let program = parse_source(source).unwrap();

    assert_eq!(program.span.start.0, 0);
    assert_eq!(program.span.end.0 as usize, source.len());

    let call = program.body.body[0].get_span();
    assert_eq!(call.start.0, 16);
    assert_eq!(call.end.0, 33);
}
