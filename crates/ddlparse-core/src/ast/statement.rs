//! SQL statement AST types.

use super::constraint::Constraint;
use super::expression::Expr;
use super::types::{ColumnType, DefaultValueKeyword, ObjectName};

/// The value of a `DEFAULT` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DefaultValue {
    /// A literal or parenthesized expression.
    Expr(Expr),
    /// `CURRENT_TIME`, `CURRENT_DATE` or `CURRENT_TIMESTAMP`.
    Keyword(DefaultValueKeyword),
}

impl From<Expr> for DefaultValue {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

impl From<DefaultValueKeyword> for DefaultValue {
    fn from(keyword: DefaultValueKeyword) -> Self {
        Self::Keyword(keyword)
    }
}

/// Everything after a column's name: type, default and constraints.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDefinition {
    /// Declared type.
    pub column_type: Option<ColumnType>,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Column constraints, in source order.
    pub constraints: Vec<Constraint>,
}

impl ColumnDefinition {
    /// Creates a definition with only a type.
    #[must_use]
    pub fn typed(column_type: impl Into<ColumnType>) -> Self {
        Self {
            column_type: Some(column_type.into()),
            ..Self::default()
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Returns true if no type, default or constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.column_type.is_none() && self.default.is_none() && self.constraints.is_empty()
    }
}

/// A column in `CREATE TABLE`.
///
/// `definition` is `None` exactly when the column was declared by name alone,
/// as in `CREATE TABLE t(a, b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Column {
    /// Column name, in its original spelling.
    pub name: String,
    /// Type, default and constraints.
    pub definition: Option<ColumnDefinition>,
}

impl Column {
    /// Creates a bare column with no definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: None,
        }
    }

    /// Creates a column with a definition. An empty definition is normalised
    /// to `None`.
    #[must_use]
    pub fn with_definition(name: impl Into<String>, definition: ColumnDefinition) -> Self {
        Self {
            name: name.into(),
            definition: (!definition.is_empty()).then_some(definition),
        }
    }
}

/// The expression-list `SELECT` stub: `SELECT e1, e2, ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectStatement {
    /// Selected expressions.
    pub columns: Vec<Expr>,
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTableStatement {
    /// Table name.
    pub name: ObjectName,
    /// Columns, in source order.
    pub columns: Vec<Column>,
    /// Table-level constraints, in source order.
    pub constraints: Vec<Constraint>,
    /// `AS SELECT ...` body; mutually exclusive with `columns`.
    pub as_select: Option<SelectStatement>,
    /// Whether TEMP/TEMPORARY was given.
    pub temporary: bool,
    /// Whether `WITHOUT ROWID` was given.
    pub without_rowid: bool,
    /// Whether `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
}

impl CreateTableStatement {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: impl Into<ObjectName>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            constraints: vec![],
            as_select: None,
            temporary: false,
            without_rowid: false,
            if_not_exists: false,
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends a table constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Looks up a column by name (ASCII case-insensitive, as SQLite does).
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }
}

/// A `CREATE INDEX` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateIndexStatement {
    /// Index name.
    pub name: ObjectName,
    /// Indexed table.
    pub table: String,
    /// Indexed columns.
    pub columns: Vec<String>,
    /// Whether `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Whether UNIQUE was given.
    pub unique: bool,
    /// Partial-index condition.
    #[cfg_attr(feature = "serde", serde(rename = "where"))]
    pub where_clause: Option<Expr>,
}

/// A top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Statement {
    /// CREATE TABLE.
    CreateTable(CreateTableStatement),
    /// CREATE INDEX.
    CreateIndex(CreateIndexStatement),
    /// SELECT expression list.
    Select(SelectStatement),
}
