#![allow(dead_code)]

use ddlparse_core::ast::{
    Column, CreateIndexStatement, CreateTableStatement, Expr, SelectStatement, Statement,
};
use ddlparse_core::{ParseError, ParseOptions};

pub fn parse(sql: &str) -> Vec<Statement> {
    ddlparse_core::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_verbatim(sql: &str) -> Vec<Statement> {
    ddlparse_core::parse_with(sql, &ParseOptions::new().verbatim(true))
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    ddlparse_core::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_one(sql: &str) -> Statement {
    let mut statements = parse(sql);
    assert_eq!(statements.len(), 1, "Expected one statement in: {sql}");
    statements.remove(0)
}

pub fn parse_table(sql: &str) -> CreateTableStatement {
    match parse_one(sql) {
        Statement::CreateTable(t) => t,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_index(sql: &str) -> CreateIndexStatement {
    match parse_one(sql) {
        Statement::CreateIndex(i) => i,
        other => panic!("Expected CREATE INDEX, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse_one(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Parses `SELECT <expr>` and returns the single expression.
pub fn parse_expr(expr: &str) -> Expr {
    let mut select = parse_select(&format!("SELECT {expr}"));
    assert_eq!(select.columns.len(), 1, "Expected one expression in: {expr}");
    select.columns.remove(0)
}

pub fn column(sql: &str) -> Column {
    ddlparse_core::parse_column(sql)
        .unwrap_or_else(|e| panic!("Failed to parse column: {sql}\nError: {e:?}"))
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse_one(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse_one(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
    assert_eq!(ast1, ast2, "Re-parsed tree differs for: {sql}");
}
