//! Canonical SQL rendering via `fmt::Display` for AST nodes.
//!
//! Rendering is the inverse of parsing up to canonical formatting: keywords
//! are upper-cased, identifiers are always double-quoted and whitespace is
//! normalised, so `parse(&stmt.to_string())` yields `stmt` again.

#[allow(clippy::wildcard_imports)]
use super::*;
use crate::quote::{is_bare_name, quote, quote_if_needed};
use core::fmt;

/// Renders a node to canonical SQL text.
///
/// `parenthesize` asks the node to wrap itself in parentheses. Only infix
/// expressions honour it; every other node renders the same either way.
pub trait Render {
    /// Returns the SQL text for this node.
    fn render(&self, parenthesize: bool) -> String;
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn quoted_list(f: &mut fmt::Formatter<'_>, names: &[String]) -> fmt::Result {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&quote(name))?;
    }
    Ok(())
}

fn write_on_conflict(f: &mut fmt::Formatter<'_>, on_conflict: Option<OnConflict>) -> fmt::Result {
    match on_conflict {
        Some(strategy) => write!(f, " ON CONFLICT {strategy}"),
        None => Ok(()),
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, parenthesize: bool) -> fmt::Result {
    match expr {
        Expr::Infix(infix) => {
            if parenthesize {
                f.write_str("(")?;
            }
            write_expr(f, &infix.left, true)?;
            write!(f, " {} ", infix.op)?;
            write_expr(f, &infix.right, true)?;
            if parenthesize {
                f.write_str(")")?;
            }
            Ok(())
        }
        Expr::Literal(literal) => write!(f, "{literal}"),
        Expr::Identifier(ident) => write!(f, "{ident}"),
        Expr::Call(call) => write!(f, "{call}"),
        Expr::List(values) => {
            f.write_str("(")?;
            comma_list(f, values)?;
            f.write_str(")")
        }
        Expr::Verbatim(text) => f.write_str(text),
    }
}

struct Parenthesized<'a>(&'a Expr, bool);

impl fmt::Display for Parenthesized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self.0, self.1)
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

macro_rules! impl_render_as_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self, _parenthesize: bool) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_display_as_str!(
    OnConflict,
    OnDeleteOrUpdateAction,
    ForeignKeyMatch,
    CollatingSequence,
    GeneratedColumnStorage,
    DefaultValueKeyword,
    BinaryOp,
);

// ---------------------------------------------------------------------------
// Names and types
// ---------------------------------------------------------------------------

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.value))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", quote(&self.schema), quote(&self.name))
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::Qualified(qualified) => write!(f, "{qualified}"),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The parser joins type words with single spaces, so a name with any
        // word that needs quoting is written as one quoted word.
        if self.name.split(' ').all(is_bare_name) {
            f.write_str(&self.name)?;
        } else {
            f.write_str(&quote(&self.name))?;
        }
        if !self.args.is_empty() {
            f.write_str("(")?;
            comma_list(f, &self.args)?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Blob(bytes) => {
                f.write_str("X'")?;
                for b in bytes {
                    write!(f, "{b:02X}")?;
                }
                f.write_str("'")
            }
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", quote_if_needed(&self.name.value))?;
        if self.star {
            f.write_str("*")?;
        } else {
            if self.distinct {
                f.write_str("DISTINCT ")?;
            }
            comma_list(f, &self.args)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Infix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, &self.left, true)?;
        write!(f, " {} ", self.op)?;
        write_expr(f, &self.right, true)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, false)
    }
}

impl Render for Expr {
    fn render(&self, parenthesize: bool) -> String {
        Parenthesized(self, parenthesize).to_string()
    }
}

impl Render for Infix {
    fn render(&self, parenthesize: bool) -> String {
        if parenthesize {
            format!("({self})")
        } else {
            self.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

impl fmt::Display for CheckConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CHECK ({})", self.expr)
    }
}

impl fmt::Display for NamedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CONSTRAINT {} {}", quote(&self.name), self.inner)
    }
}

impl fmt::Display for NotNullConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NOT NULL")?;
        write_on_conflict(f, self.on_conflict)
    }
}

impl fmt::Display for PrimaryKeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PRIMARY KEY")?;
        match self.ascending {
            Some(true) => f.write_str(" ASC")?,
            Some(false) => f.write_str(" DESC")?,
            None => {}
        }
        write_on_conflict(f, self.on_conflict)?;
        if self.autoincrement {
            f.write_str(" AUTOINCREMENT")?;
        }
        Ok(())
    }
}

impl fmt::Display for PrimaryKeyTableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PRIMARY KEY (")?;
        quoted_list(f, &self.columns)?;
        f.write_str(")")?;
        write_on_conflict(f, self.on_conflict)
    }
}

impl fmt::Display for CollateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COLLATE {}", self.sequence)
    }
}

impl fmt::Display for ForeignKeyConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.columns.is_empty() {
            f.write_str("FOREIGN KEY (")?;
            quoted_list(f, &self.columns)?;
            f.write_str(") ")?;
        }
        write!(f, "REFERENCES {}", quote(&self.foreign_table))?;
        if !self.foreign_columns.is_empty() {
            f.write_str(" (")?;
            quoted_list(f, &self.foreign_columns)?;
            f.write_str(")")?;
        }
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {action}")?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {action}")?;
        }
        if let Some(mode) = self.match_mode {
            write!(f, " MATCH {mode}")?;
        }
        match self.deferrable {
            Some(true) => f.write_str(" DEFERRABLE")?,
            Some(false) => f.write_str(" NOT DEFERRABLE")?,
            None => {}
        }
        match self.initially_deferred {
            Some(true) => f.write_str(" INITIALLY DEFERRED")?,
            Some(false) => f.write_str(" INITIALLY IMMEDIATE")?,
            None => {}
        }
        Ok(())
    }
}

impl fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UNIQUE")?;
        write_on_conflict(f, self.on_conflict)
    }
}

impl fmt::Display for UniqueTableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UNIQUE (")?;
        quoted_list(f, &self.columns)?;
        f.write_str(")")?;
        write_on_conflict(f, self.on_conflict)
    }
}

impl fmt::Display for GeneratedColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GENERATED ALWAYS AS ({})", self.expression)?;
        if let Some(storage) = self.storage {
            write!(f, " {storage}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check(c) => write!(f, "{c}"),
            Self::Named(c) => write!(f, "{c}"),
            Self::NotNull(c) => write!(f, "{c}"),
            Self::PrimaryKey(c) => write!(f, "{c}"),
            Self::PrimaryKeyTable(c) => write!(f, "{c}"),
            Self::Collate(c) => write!(f, "{c}"),
            Self::ForeignKey(c) => write!(f, "{c}"),
            Self::Unique(c) => write!(f, "{c}"),
            Self::UniqueTable(c) => write!(f, "{c}"),
            Self::Generated(c) => write!(f, "{c}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Columns and statements
// ---------------------------------------------------------------------------

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) if expr.is_literal() => write!(f, "{expr}"),
            Self::Expr(expr) => write!(f, "({expr})"),
            Self::Keyword(keyword) => write!(f, "{keyword}"),
        }
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(self.constraints.len() + 2);
        if let Some(column_type) = &self.column_type {
            parts.push(column_type.to_string());
        }
        if let Some(default) = &self.default {
            parts.push(format!("DEFAULT {default}"));
        }
        parts.extend(self.constraints.iter().map(ToString::to_string));
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.name))?;
        if let Some(definition) = &self.definition {
            if !definition.is_empty() {
                write!(f, " {definition}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        comma_list(f, &self.columns)
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;

        if let Some(select) = &self.as_select {
            return write!(f, " AS {select}");
        }

        f.write_str("(")?;
        comma_list(f, &self.columns)?;
        if !self.constraints.is_empty() {
            if !self.columns.is_empty() {
                f.write_str(", ")?;
            }
            comma_list(f, &self.constraints)?;
        }
        f.write_str(")")?;

        if self.without_rowid {
            f.write_str(" WITHOUT ROWID")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        f.write_str("INDEX ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{} ON {}(", self.name, quote(&self.table))?;
        quoted_list(f, &self.columns)?;
        f.write_str(")")?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateTable(s) => write!(f, "{s}"),
            Self::CreateIndex(s) => write!(f, "{s}"),
            Self::Select(s) => write!(f, "{s}"),
        }
    }
}

impl_render_as_display!(
    Statement,
    CreateTableStatement,
    CreateIndexStatement,
    SelectStatement,
    Column,
    ColumnDefinition,
    ColumnType,
    DefaultValue,
    Constraint,
    CheckConstraint,
    NamedConstraint,
    NotNullConstraint,
    PrimaryKeyConstraint,
    PrimaryKeyTableConstraint,
    CollateConstraint,
    ForeignKeyConstraint,
    UniqueConstraint,
    UniqueTableConstraint,
    GeneratedColumnConstraint,
    FunctionCall,
    Identifier,
    Literal,
    QualifiedName,
    ObjectName,
    OnConflict,
    OnDeleteOrUpdateAction,
    ForeignKeyMatch,
    CollatingSequence,
    GeneratedColumnStorage,
    DefaultValueKeyword,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infix_parenthesizes_operands() {
        let expr = Expr::integer(1).binary(
            BinaryOp::Add,
            Expr::integer(2).binary(BinaryOp::Mul, Expr::integer(3)),
        );
        assert_eq!(expr.to_string(), "1 + (2 * 3)");
        assert_eq!(expr.render(true), "(1 + (2 * 3))");
        assert_eq!(expr.render(false), "1 + (2 * 3)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(Expr::string("it's").to_string(), "'it''s'");
        assert_eq!(Expr::blob(vec![0xab, 0x01]).to_string(), "X'AB01'");
        assert_eq!(Expr::integer(-5).to_string(), "-5");
        assert_eq!(Expr::null().to_string(), "NULL");
        assert_eq!(Expr::boolean(false).to_string(), "FALSE");
        assert_eq!(Expr::ident("a\"b").to_string(), "\"a\"\"b\"");
    }

    #[test]
    fn test_calls() {
        assert_eq!(FunctionCall::star("count").to_string(), "count(*)");
        assert_eq!(
            FunctionCall::distinct("count", Expr::ident("x")).to_string(),
            "count(DISTINCT \"x\")"
        );
        assert_eq!(
            Expr::call("max", vec![Expr::integer(1), Expr::integer(2)]).to_string(),
            "max(1, 2)"
        );
        assert_eq!(
            Expr::List(vec![Expr::integer(1), Expr::string("a")]).to_string(),
            "(1, 'a')"
        );
    }

    #[test]
    fn test_default_values() {
        assert_eq!(DefaultValue::from(Expr::integer(0)).to_string(), "0");
        assert_eq!(
            DefaultValue::from(Expr::ident("a").eq(Expr::integer(1))).to_string(),
            "(\"a\" = 1)"
        );
        assert_eq!(
            DefaultValue::from(DefaultValueKeyword::CurrentDate).to_string(),
            "CURRENT_DATE"
        );
        assert_eq!(
            DefaultValue::from(Expr::verbatim("1 + 1")).to_string(),
            "(1 + 1)"
        );
    }

    #[test]
    fn test_foreign_key_full() {
        let fk = ForeignKeyConstraint {
            columns: vec![String::from("owner")],
            foreign_table: String::from("people"),
            foreign_columns: vec![String::from("id")],
            on_delete: Some(OnDeleteOrUpdateAction::SetNull),
            on_update: Some(OnDeleteOrUpdateAction::NoAction),
            match_mode: Some(ForeignKeyMatch::Full),
            deferrable: Some(false),
            initially_deferred: Some(false),
        };
        assert_eq!(
            fk.to_string(),
            "FOREIGN KEY (\"owner\") REFERENCES \"people\" (\"id\") ON DELETE SET NULL \
             ON UPDATE NO ACTION MATCH FULL NOT DEFERRABLE INITIALLY IMMEDIATE"
        );
    }

    #[test]
    fn test_column_constraints() {
        let pk = PrimaryKeyConstraint::default()
            .ascending(true)
            .on_conflict(OnConflict::Replace)
            .autoincrement();
        assert_eq!(
            pk.to_string(),
            "PRIMARY KEY ASC ON CONFLICT REPLACE AUTOINCREMENT"
        );
        let named = Constraint::from(UniqueConstraint::default()).named("u");
        assert_eq!(named.to_string(), "CONSTRAINT \"u\" UNIQUE");
        let generated = GeneratedColumnConstraint {
            expression: Expr::ident("a").binary(BinaryOp::Mul, Expr::integer(2)),
            storage: Some(GeneratedColumnStorage::Stored),
        };
        assert_eq!(
            generated.to_string(),
            "GENERATED ALWAYS AS (\"a\" * 2) STORED"
        );
    }

    #[test]
    fn test_create_table() {
        let table = CreateTableStatement::new("people")
            .column(Column::with_definition(
                "id",
                ColumnDefinition::typed("INTEGER").constraint(PrimaryKeyConstraint::default()),
            ))
            .column(Column::with_definition(
                "name",
                ColumnDefinition::typed(ColumnType::with_args("VARCHAR", vec![500]))
                    .default_value(Expr::string(""))
                    .constraint(NotNullConstraint::default()),
            ))
            .constraint(UniqueTableConstraint {
                columns: vec![String::from("name")],
                on_conflict: None,
            });
        assert_eq!(
            table.to_string(),
            "CREATE TABLE \"people\"(\"id\" INTEGER PRIMARY KEY, \
             \"name\" VARCHAR(500) DEFAULT '' NOT NULL, UNIQUE (\"name\"))"
        );
    }

    #[test]
    fn test_create_table_flags() {
        let mut table = CreateTableStatement::new(QualifiedName::new("main", "t"))
            .column(Column::new("a"));
        table.temporary = true;
        table.if_not_exists = true;
        table.without_rowid = true;
        assert_eq!(
            table.to_string(),
            "CREATE TEMPORARY TABLE IF NOT EXISTS \"main\".\"t\"(\"a\") WITHOUT ROWID"
        );
    }

    #[test]
    fn test_create_index() {
        let index = CreateIndexStatement {
            name: ObjectName::from("idx"),
            table: String::from("people"),
            columns: vec![String::from("a"), String::from("b")],
            if_not_exists: false,
            unique: true,
            where_clause: Some(Expr::verbatim("a IS NOT NULL")),
        };
        assert_eq!(
            index.to_string(),
            "CREATE UNIQUE INDEX \"idx\" ON \"people\"(\"a\", \"b\") WHERE a IS NOT NULL"
        );
    }
}
