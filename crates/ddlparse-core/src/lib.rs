//! # ddlparse-core
//!
//! A parser for SQLite's Data Definition Language: `CREATE TABLE`,
//! `CREATE INDEX` and the scalar expressions used inside defaults, `CHECK`
//! clauses, generated columns and `SELECT` expression lists.
//!
//! This crate provides:
//! - A hand-written, on-demand lexer with one token of pushback
//! - A recursive descent parser with precedence-climbing expressions
//! - An owned syntax tree that renders back to canonical SQL and can be
//!   traversed with a visitor
//!
//! ## Parsing a schema
//!
//! ```rust
//! use ddlparse_core::ast::Statement;
//!
//! let statements = ddlparse_core::parse(
//!     "CREATE TABLE people(id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
//! )
//! .unwrap();
//!
//! let Statement::CreateTable(table) = &statements[0] else {
//!     panic!("expected CREATE TABLE");
//! };
//! assert_eq!(table.name.name(), "people");
//! assert_eq!(table.columns.len(), 2);
//! assert_eq!(
//!     table.to_string(),
//!     r#"CREATE TABLE "people"("id" INTEGER PRIMARY KEY, "name" TEXT NOT NULL)"#
//! );
//! ```
//!
//! ## Verbatim expressions
//!
//! Expressions outside the structural grammar (subqueries, `CASE`, ...) can
//! be kept as raw source text:
//!
//! ```rust
//! use ddlparse_core::{ast::{Expr, Statement}, ParseOptions};
//!
//! let options = ParseOptions::new().verbatim(true);
//! let statements = ddlparse_core::parse_with(
//!     "CREATE INDEX i ON t(c) WHERE c IS NOT NULL;",
//!     &options,
//! )
//! .unwrap();
//!
//! let Statement::CreateIndex(index) = &statements[0] else {
//!     panic!("expected CREATE INDEX");
//! };
//! assert_eq!(index.where_clause, Some(Expr::verbatim("c IS NOT NULL")));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
mod quote;

use tracing::debug;

pub use ast::{Column, Expr, Render, Statement};
pub use lexer::{Lexer, Scanner, Token, TokenKind};
pub use parser::{ParseError, ParseOptions, Parser, Result};
pub use quote::quote;

/// Parses zero or more `;`-separated statements with default options.
///
/// # Errors
///
/// Returns the first syntax error; no partial result is produced.
pub fn parse(source: &str) -> Result<Vec<Statement>> {
    parse_with(source, &ParseOptions::default())
}

/// Parses zero or more `;`-separated statements.
///
/// # Errors
///
/// Returns the first syntax error; no partial result is produced.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Vec<Statement>> {
    let statements = Parser::with_options(source, *options)?.parse()?;
    debug!(
        statements = statements.len(),
        bytes = source.len(),
        verbatim = options.verbatim,
        "parsed schema"
    );
    Ok(statements)
}

/// Parses exactly one column definition, such as `name TEXT NOT NULL`.
///
/// # Errors
///
/// Returns a syntax error for malformed input or trailing text.
pub fn parse_column(source: &str) -> Result<Column> {
    parse_column_with(source, &ParseOptions::default())
}

/// Parses exactly one column definition with the given options.
///
/// # Errors
///
/// Returns a syntax error for malformed input or trailing text.
pub fn parse_column_with(source: &str, options: &ParseOptions) -> Result<Column> {
    Parser::with_options(source, *options)?.parse_column()
}
