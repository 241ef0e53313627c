//! Tests for scalar expressions: literals, operators, precedence,
//! function calls and value lists.

mod common;
use common::*;

use ddlparse_core::ast::{BinaryOp, Expr, FunctionCall, Literal};
use ddlparse_core::Render;
use pretty_assertions::assert_eq;

// ===================================================================
// Literals
// ===================================================================

#[test]
fn integer_literal() {
    assert_eq!(parse_expr("1"), Expr::Literal(Literal::Integer(1)));
    assert_eq!(parse_expr("-42"), Expr::integer(-42));
    assert_eq!(parse_expr("+7"), Expr::integer(7));
}

#[test]
fn string_literal_keeps_backslashes() {
    assert_eq!(parse_expr(r"'\ \n '' '"), Expr::string(r"\ \n ' "));
}

#[test]
fn blob_literal() {
    assert_eq!(parse_expr("X'41'"), Expr::blob(vec![0x41]));
    assert_eq!(parse_expr("x'deadBEEF'"), Expr::blob(vec![0xde, 0xad, 0xbe, 0xef]));
    assert_eq!(parse_expr("X''"), Expr::blob(Vec::new()));
}

#[test]
fn null_literal() {
    assert_eq!(parse_expr("NULL"), Expr::null());
    assert_eq!(parse_expr("null"), Expr::null());
}

#[test]
fn booleans_are_identifiers_in_expressions() {
    assert_eq!(parse_expr("TRUE"), Expr::ident("TRUE"));
}

#[test]
fn quoted_identifiers() {
    assert_eq!(parse_expr("\"my column\""), Expr::ident("my column"));
    assert_eq!(parse_expr("[my column]"), Expr::ident("my column"));
    assert_eq!(parse_expr("`tick`"), Expr::ident("tick"));
    assert_eq!(parse_expr("\"say \"\"hi\"\"\""), Expr::ident("say \"hi\""));
}

// ===================================================================
// Operators
// ===================================================================

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(
        parse_expr("1+2*3"),
        Expr::integer(1).binary(
            BinaryOp::Add,
            Expr::integer(2).binary(BinaryOp::Mul, Expr::integer(3))
        )
    );
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(
        parse_expr("(1 + 2) * 3"),
        Expr::integer(1)
            .binary(BinaryOp::Add, Expr::integer(2))
            .binary(BinaryOp::Mul, Expr::integer(3))
    );
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(
        parse_expr("a OR b AND c"),
        Expr::ident("a").or(Expr::ident("b").and(Expr::ident("c")))
    );
}

#[test]
fn ordering_binds_tighter_than_equality() {
    assert_eq!(
        parse_expr("a < b = c"),
        Expr::ident("a")
            .binary(BinaryOp::Lt, Expr::ident("b"))
            .binary(BinaryOp::Eq, Expr::ident("c"))
    );
}

#[test]
fn concat_binds_tightest() {
    assert_eq!(
        parse_expr("a || b * c"),
        Expr::ident("a")
            .binary(BinaryOp::Concat, Expr::ident("b"))
            .binary(BinaryOp::Mul, Expr::ident("c"))
    );
}

#[test]
fn same_precedence_is_left_associative() {
    assert_eq!(
        parse_expr("x << 2 & 3"),
        Expr::ident("x")
            .binary(BinaryOp::LeftShift, Expr::integer(2))
            .binary(BinaryOp::BitAnd, Expr::integer(3))
    );
    assert_eq!(
        parse_expr("8 / 4 / 2"),
        Expr::integer(8)
            .binary(BinaryOp::Div, Expr::integer(4))
            .binary(BinaryOp::Div, Expr::integer(2))
    );
}

#[test]
fn every_comparison_operator() {
    let cases = [
        ("a = b", BinaryOp::Eq),
        ("a == b", BinaryOp::Eq),
        ("a != b", BinaryOp::NotEq),
        ("a <> b", BinaryOp::NotEq),
        ("a < b", BinaryOp::Lt),
        ("a <= b", BinaryOp::LtEq),
        ("a > b", BinaryOp::Gt),
        ("a >= b", BinaryOp::GtEq),
        ("a IS b", BinaryOp::Is),
        ("a LIKE b", BinaryOp::Like),
        ("a GLOB b", BinaryOp::Glob),
        ("a MATCH b", BinaryOp::Match),
        ("a REGEXP b", BinaryOp::Regexp),
        ("a >> b", BinaryOp::RightShift),
        ("a | b", BinaryOp::BitOr),
        ("a % b", BinaryOp::Mod),
    ];
    for (sql, op) in cases {
        assert_eq!(
            parse_expr(sql),
            Expr::ident("a").binary(op, Expr::ident("b")),
            "{sql}"
        );
    }
}

#[test]
fn negated_operators() {
    let cases = [
        ("a IS NOT b", BinaryOp::IsNot),
        ("a NOT LIKE b", BinaryOp::NotLike),
        ("a NOT GLOB b", BinaryOp::NotGlob),
        ("a NOT MATCH b", BinaryOp::NotMatch),
        ("a NOT REGEXP b", BinaryOp::NotRegexp),
        ("a not in b", BinaryOp::NotIn),
    ];
    for (sql, op) in cases {
        assert_eq!(
            parse_expr(sql),
            Expr::ident("a").binary(op, Expr::ident("b")),
            "{sql}"
        );
    }
}

#[test]
fn is_not_null() {
    assert_eq!(
        parse_expr("name IS NOT NULL"),
        Expr::ident("name").binary(BinaryOp::IsNot, Expr::null())
    );
}

#[test]
fn in_list() {
    assert_eq!(
        parse_expr("status IN ('a', 'b', 'c')"),
        Expr::ident("status").binary(
            BinaryOp::In,
            Expr::List(vec![Expr::string("a"), Expr::string("b"), Expr::string("c")])
        )
    );
}

#[test]
fn single_parenthesized_value_is_not_a_list() {
    assert_eq!(parse_expr("(1)"), Expr::integer(1));
    assert_eq!(
        parse_expr("(1, 2)"),
        Expr::List(vec![Expr::integer(1), Expr::integer(2)])
    );
}

// ===================================================================
// Function calls
// ===================================================================

#[test]
fn nested_calls() {
    assert_eq!(
        parse_expr("foo(1,2) + bar(3, baz(4))"),
        Expr::call("foo", vec![Expr::integer(1), Expr::integer(2)]).binary(
            BinaryOp::Add,
            Expr::call(
                "bar",
                vec![Expr::integer(3), Expr::call("baz", vec![Expr::integer(4)])]
            )
        )
    );
}

#[test]
fn call_without_arguments() {
    assert_eq!(parse_expr("random()"), Expr::call("random", vec![]));
}

#[test]
fn count_star() {
    assert_eq!(parse_expr("count(*)"), Expr::Call(FunctionCall::star("count")));
}

#[test]
fn count_distinct() {
    assert_eq!(
        parse_expr("count(DISTINCT x)"),
        Expr::Call(FunctionCall::distinct("count", Expr::ident("x")))
    );
}

#[test]
fn call_arguments_are_expressions() {
    assert_eq!(
        parse_expr("length(a || b) > 3"),
        Expr::call(
            "length",
            vec![Expr::ident("a").binary(BinaryOp::Concat, Expr::ident("b"))]
        )
        .binary(BinaryOp::Gt, Expr::integer(3))
    );
}

// ===================================================================
// Select lists and rendering
// ===================================================================

#[test]
fn select_list() {
    let select = parse_select("SELECT 1, 'two', x'03', four");
    assert_eq!(
        select.columns,
        vec![
            Expr::integer(1),
            Expr::string("two"),
            Expr::blob(vec![3]),
            Expr::ident("four"),
        ]
    );
}

#[test]
fn rendering_parenthesizes_operands() {
    let expr = parse_expr("1 + 2 * 3");
    assert_eq!(expr.to_string(), "1 + (2 * 3)");
    assert_eq!(expr.render(true), "(1 + (2 * 3))");
    assert_eq!(expr.render(false), "1 + (2 * 3)");
}

#[test]
fn rendering_canonicalizes_operators() {
    assert_eq!(parse_expr("a <> b").to_string(), r#""a" != "b""#);
    assert_eq!(parse_expr("a == b").to_string(), r#""a" = "b""#);
    assert_eq!(parse_expr("a not like 'x'").to_string(), r#""a" NOT LIKE 'x'"#);
}

#[test]
fn expressions_round_trip() {
    for sql in [
        "SELECT 1 + 2 * 3",
        "SELECT a OR b AND c",
        "SELECT foo(1, 2) + bar(3, baz(4))",
        "SELECT count(*), count(DISTINCT x)",
        "SELECT 'it''s', X'00FF', NULL",
        "SELECT a NOT IN (1, 2, 3)",
        "SELECT \"odd \"\"name\"\"\" IS NOT NULL",
        "SELECT 1 - -2",
    ] {
        round_trip(sql);
    }
}
