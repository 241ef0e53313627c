//! Abstract Syntax Tree (AST) types for SQLite DDL statements.
//!
//! Nodes are plain owned data built bottom-up by the parser. Every node
//! renders back to canonical SQL through `Display` (and [`Render`]), and can
//! be traversed with a [`Visitor`].

mod constraint;
mod display;
mod expression;
mod statement;
mod types;
mod visitor;

pub use constraint::{
    CheckConstraint, CollateConstraint, Constraint, ForeignKeyConstraint,
    GeneratedColumnConstraint, NamedConstraint, NotNullConstraint, PrimaryKeyConstraint,
    PrimaryKeyTableConstraint, UniqueConstraint, UniqueTableConstraint,
};
pub use display::Render;
pub use expression::{BinaryOp, Expr, FunctionCall, Identifier, Infix, Literal};
pub use statement::{
    Column, ColumnDefinition, CreateIndexStatement, CreateTableStatement, DefaultValue,
    SelectStatement, Statement,
};
pub use types::{
    CollatingSequence, ColumnType, DefaultValueKeyword, ForeignKeyMatch, GeneratedColumnStorage,
    ObjectName, OnConflict, OnDeleteOrUpdateAction, QualifiedName,
};
pub use visitor::{walk, Node, Visitor};
