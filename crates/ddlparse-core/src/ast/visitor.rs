//! Visitor dispatch over syntax-tree nodes.
//!
//! [`Node`] is a borrowed view of any node in the tree. [`Node::accept`]
//! dispatches to the [`Visitor`] method for the node's variant; every method
//! defaults to [`Visitor::visit_default`], which does nothing unless
//! overridden. [`walk`] applies a visitor to a node and all its descendants.

use super::{
    CheckConstraint, CollateConstraint, Column, ColumnDefinition, ColumnType, Constraint,
    CreateIndexStatement, CreateTableStatement, DefaultValue, Expr, ForeignKeyConstraint,
    FunctionCall, GeneratedColumnConstraint, Identifier, Infix, Literal, NamedConstraint,
    NotNullConstraint, ObjectName, PrimaryKeyConstraint, PrimaryKeyTableConstraint,
    QualifiedName, SelectStatement, Statement, UniqueConstraint, UniqueTableConstraint,
};

/// A borrowed reference to a syntax-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    CreateTable(&'a CreateTableStatement),
    CreateIndex(&'a CreateIndexStatement),
    Select(&'a SelectStatement),
    Column(&'a Column),
    ColumnDefinition(&'a ColumnDefinition),
    ColumnType(&'a ColumnType),
    DefaultValue(&'a DefaultValue),
    QualifiedName(&'a QualifiedName),
    CheckConstraint(&'a CheckConstraint),
    NamedConstraint(&'a NamedConstraint),
    NotNullConstraint(&'a NotNullConstraint),
    PrimaryKeyConstraint(&'a PrimaryKeyConstraint),
    PrimaryKeyTableConstraint(&'a PrimaryKeyTableConstraint),
    CollateConstraint(&'a CollateConstraint),
    ForeignKeyConstraint(&'a ForeignKeyConstraint),
    UniqueConstraint(&'a UniqueConstraint),
    UniqueTableConstraint(&'a UniqueTableConstraint),
    GeneratedColumnConstraint(&'a GeneratedColumnConstraint),
    Infix(&'a Infix),
    Call(&'a FunctionCall),
    List(&'a [Expr]),
    Identifier(&'a Identifier),
    Literal(&'a Literal),
    Verbatim(&'a str),
}

/// Per-variant handlers. Unimplemented handlers fall back to
/// [`Visitor::visit_default`].
#[allow(unused_variables)]
pub trait Visitor<'a> {
    /// Called for any node whose handler is not overridden.
    fn visit_default(&mut self, node: Node<'a>) {}

    fn visit_create_table(&mut self, stmt: &'a CreateTableStatement) {
        self.visit_default(Node::CreateTable(stmt));
    }

    fn visit_create_index(&mut self, stmt: &'a CreateIndexStatement) {
        self.visit_default(Node::CreateIndex(stmt));
    }

    fn visit_select(&mut self, stmt: &'a SelectStatement) {
        self.visit_default(Node::Select(stmt));
    }

    fn visit_column(&mut self, column: &'a Column) {
        self.visit_default(Node::Column(column));
    }

    fn visit_column_definition(&mut self, definition: &'a ColumnDefinition) {
        self.visit_default(Node::ColumnDefinition(definition));
    }

    fn visit_column_type(&mut self, column_type: &'a ColumnType) {
        self.visit_default(Node::ColumnType(column_type));
    }

    fn visit_default_value(&mut self, value: &'a DefaultValue) {
        self.visit_default(Node::DefaultValue(value));
    }

    fn visit_qualified_name(&mut self, name: &'a QualifiedName) {
        self.visit_default(Node::QualifiedName(name));
    }

    fn visit_check_constraint(&mut self, constraint: &'a CheckConstraint) {
        self.visit_default(Node::CheckConstraint(constraint));
    }

    fn visit_named_constraint(&mut self, constraint: &'a NamedConstraint) {
        self.visit_default(Node::NamedConstraint(constraint));
    }

    fn visit_not_null_constraint(&mut self, constraint: &'a NotNullConstraint) {
        self.visit_default(Node::NotNullConstraint(constraint));
    }

    fn visit_primary_key_constraint(&mut self, constraint: &'a PrimaryKeyConstraint) {
        self.visit_default(Node::PrimaryKeyConstraint(constraint));
    }

    fn visit_primary_key_table_constraint(&mut self, constraint: &'a PrimaryKeyTableConstraint) {
        self.visit_default(Node::PrimaryKeyTableConstraint(constraint));
    }

    fn visit_collate_constraint(&mut self, constraint: &'a CollateConstraint) {
        self.visit_default(Node::CollateConstraint(constraint));
    }

    fn visit_foreign_key_constraint(&mut self, constraint: &'a ForeignKeyConstraint) {
        self.visit_default(Node::ForeignKeyConstraint(constraint));
    }

    fn visit_unique_constraint(&mut self, constraint: &'a UniqueConstraint) {
        self.visit_default(Node::UniqueConstraint(constraint));
    }

    fn visit_unique_table_constraint(&mut self, constraint: &'a UniqueTableConstraint) {
        self.visit_default(Node::UniqueTableConstraint(constraint));
    }

    fn visit_generated_column_constraint(&mut self, constraint: &'a GeneratedColumnConstraint) {
        self.visit_default(Node::GeneratedColumnConstraint(constraint));
    }

    fn visit_infix(&mut self, infix: &'a Infix) {
        self.visit_default(Node::Infix(infix));
    }

    fn visit_call(&mut self, call: &'a FunctionCall) {
        self.visit_default(Node::Call(call));
    }

    fn visit_list(&mut self, values: &'a [Expr]) {
        self.visit_default(Node::List(values));
    }

    fn visit_identifier(&mut self, ident: &'a Identifier) {
        self.visit_default(Node::Identifier(ident));
    }

    fn visit_literal(&mut self, literal: &'a Literal) {
        self.visit_default(Node::Literal(literal));
    }

    fn visit_verbatim(&mut self, text: &'a str) {
        self.visit_default(Node::Verbatim(text));
    }
}

impl<'a> Node<'a> {
    /// Dispatches this node to the matching handler of `visitor`.
    pub fn accept<V: Visitor<'a> + ?Sized>(self, visitor: &mut V) {
        match self {
            Self::CreateTable(n) => visitor.visit_create_table(n),
            Self::CreateIndex(n) => visitor.visit_create_index(n),
            Self::Select(n) => visitor.visit_select(n),
            Self::Column(n) => visitor.visit_column(n),
            Self::ColumnDefinition(n) => visitor.visit_column_definition(n),
            Self::ColumnType(n) => visitor.visit_column_type(n),
            Self::DefaultValue(n) => visitor.visit_default_value(n),
            Self::QualifiedName(n) => visitor.visit_qualified_name(n),
            Self::CheckConstraint(n) => visitor.visit_check_constraint(n),
            Self::NamedConstraint(n) => visitor.visit_named_constraint(n),
            Self::NotNullConstraint(n) => visitor.visit_not_null_constraint(n),
            Self::PrimaryKeyConstraint(n) => visitor.visit_primary_key_constraint(n),
            Self::PrimaryKeyTableConstraint(n) => visitor.visit_primary_key_table_constraint(n),
            Self::CollateConstraint(n) => visitor.visit_collate_constraint(n),
            Self::ForeignKeyConstraint(n) => visitor.visit_foreign_key_constraint(n),
            Self::UniqueConstraint(n) => visitor.visit_unique_constraint(n),
            Self::UniqueTableConstraint(n) => visitor.visit_unique_table_constraint(n),
            Self::GeneratedColumnConstraint(n) => visitor.visit_generated_column_constraint(n),
            Self::Infix(n) => visitor.visit_infix(n),
            Self::Call(n) => visitor.visit_call(n),
            Self::List(n) => visitor.visit_list(n),
            Self::Identifier(n) => visitor.visit_identifier(n),
            Self::Literal(n) => visitor.visit_literal(n),
            Self::Verbatim(n) => visitor.visit_verbatim(n),
        }
    }

    /// Returns the node's direct children, in source order.
    #[must_use]
    pub fn children(self) -> Vec<Self> {
        match self {
            Self::CreateTable(stmt) => {
                let mut children = Vec::with_capacity(stmt.columns.len() + stmt.constraints.len() + 2);
                if let ObjectName::Qualified(name) = &stmt.name {
                    children.push(Self::QualifiedName(name));
                }
                children.extend(stmt.columns.iter().map(Self::Column));
                children.extend(stmt.constraints.iter().map(Self::from));
                if let Some(select) = &stmt.as_select {
                    children.push(Self::Select(select));
                }
                children
            }
            Self::CreateIndex(stmt) => {
                let mut children = Vec::new();
                if let ObjectName::Qualified(name) = &stmt.name {
                    children.push(Self::QualifiedName(name));
                }
                children.extend(stmt.where_clause.as_ref().map(Self::from));
                children
            }
            Self::Select(stmt) => stmt.columns.iter().map(Self::from).collect(),
            Self::Column(column) => column
                .definition
                .iter()
                .map(Self::ColumnDefinition)
                .collect(),
            Self::ColumnDefinition(definition) => {
                let mut children = Vec::with_capacity(definition.constraints.len() + 2);
                children.extend(definition.column_type.as_ref().map(Self::ColumnType));
                children.extend(definition.default.as_ref().map(Self::DefaultValue));
                children.extend(definition.constraints.iter().map(Self::from));
                children
            }
            Self::DefaultValue(DefaultValue::Expr(expr)) => vec![Self::from(expr)],
            Self::CheckConstraint(check) => vec![Self::from(&check.expr)],
            Self::NamedConstraint(named) => vec![Self::from(named.inner.as_ref())],
            Self::GeneratedColumnConstraint(generated) => vec![Self::from(&generated.expression)],
            Self::Infix(infix) => vec![Self::from(infix.left.as_ref()), Self::from(infix.right.as_ref())],
            Self::Call(call) => call.args.iter().map(Self::from).collect(),
            Self::List(values) => values.iter().map(Self::from).collect(),
            Self::DefaultValue(DefaultValue::Keyword(_))
            | Self::ColumnType(_)
            | Self::QualifiedName(_)
            | Self::NotNullConstraint(_)
            | Self::PrimaryKeyConstraint(_)
            | Self::PrimaryKeyTableConstraint(_)
            | Self::CollateConstraint(_)
            | Self::ForeignKeyConstraint(_)
            | Self::UniqueConstraint(_)
            | Self::UniqueTableConstraint(_)
            | Self::Identifier(_)
            | Self::Literal(_)
            | Self::Verbatim(_) => vec![],
        }
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::CreateTable(s) => Self::CreateTable(s),
            Statement::CreateIndex(s) => Self::CreateIndex(s),
            Statement::Select(s) => Self::Select(s),
        }
    }
}

impl<'a> From<&'a Constraint> for Node<'a> {
    fn from(constraint: &'a Constraint) -> Self {
        match constraint {
            Constraint::Check(c) => Self::CheckConstraint(c),
            Constraint::Named(c) => Self::NamedConstraint(c),
            Constraint::NotNull(c) => Self::NotNullConstraint(c),
            Constraint::PrimaryKey(c) => Self::PrimaryKeyConstraint(c),
            Constraint::PrimaryKeyTable(c) => Self::PrimaryKeyTableConstraint(c),
            Constraint::Collate(c) => Self::CollateConstraint(c),
            Constraint::ForeignKey(c) => Self::ForeignKeyConstraint(c),
            Constraint::Unique(c) => Self::UniqueConstraint(c),
            Constraint::UniqueTable(c) => Self::UniqueTableConstraint(c),
            Constraint::Generated(c) => Self::GeneratedColumnConstraint(c),
        }
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Literal(literal) => Self::Literal(literal),
            Expr::Identifier(ident) => Self::Identifier(ident),
            Expr::Infix(infix) => Self::Infix(infix),
            Expr::Call(call) => Self::Call(call),
            Expr::List(values) => Self::List(values),
            Expr::Verbatim(text) => Self::Verbatim(text),
        }
    }
}

impl Statement {
    /// Dispatches this statement to `visitor`.
    pub fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        Node::from(self).accept(visitor);
    }
}

impl Expr {
    /// Dispatches this expression to `visitor`.
    pub fn accept<'a, V: Visitor<'a> + ?Sized>(&'a self, visitor: &mut V) {
        Node::from(self).accept(visitor);
    }
}

/// Visits `node` and then each of its descendants, depth-first in source order.
pub fn walk<'a, V: Visitor<'a> + ?Sized>(node: Node<'a>, visitor: &mut V) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        node.accept(visitor);
        let children = node.children();
        stack.extend(children.into_iter().rev());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;

    #[derive(Default)]
    struct Collector {
        identifiers: Vec<String>,
        defaults: usize,
    }

    impl<'a> Visitor<'a> for Collector {
        fn visit_default(&mut self, _node: Node<'a>) {
            self.defaults += 1;
        }

        fn visit_identifier(&mut self, ident: &'a Identifier) {
            self.identifiers.push(ident.value.clone());
        }
    }

    #[test]
    fn test_accept_dispatches_by_variant() {
        let mut collector = Collector::default();
        Expr::ident("a").accept(&mut collector);
        Expr::integer(1).accept(&mut collector);
        assert_eq!(collector.identifiers, vec![String::from("a")]);
        assert_eq!(collector.defaults, 1);
    }

    #[test]
    fn test_unhandled_node_is_a_no_op() {
        struct Nothing;
        impl Visitor<'_> for Nothing {}
        Expr::null().accept(&mut Nothing);
    }

    #[test]
    fn test_walk_visits_in_source_order() {
        let expr = Expr::ident("a")
            .binary(BinaryOp::Add, Expr::ident("b"))
            .binary(BinaryOp::Mul, Expr::call("f", vec![Expr::ident("c")]));
        let mut collector = Collector::default();
        walk(Node::from(&expr), &mut collector);
        assert_eq!(collector.identifiers, vec!["a", "b", "c"]);
        // Two infix nodes and one call.
        assert_eq!(collector.defaults, 3);
    }

    #[test]
    fn test_walk_statement() {
        let stmt = Statement::Select(SelectStatement {
            columns: vec![Expr::ident("x"), Expr::List(vec![Expr::ident("y")])],
        });
        let mut collector = Collector::default();
        walk(Node::from(&stmt), &mut collector);
        assert_eq!(collector.identifiers, vec!["x", "y"]);
    }
}
