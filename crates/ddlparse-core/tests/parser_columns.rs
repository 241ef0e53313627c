//! Tests for single column definitions and column constraints.

mod common;
use common::*;

use ddlparse_core::ast::{
    BinaryOp, CollateConstraint, CollatingSequence, Column, ColumnDefinition, Constraint,
    DefaultValue, DefaultValueKeyword, Expr, ForeignKeyConstraint, ForeignKeyMatch,
    GeneratedColumnConstraint, GeneratedColumnStorage, NotNullConstraint, OnConflict,
    OnDeleteOrUpdateAction, PrimaryKeyConstraint, UniqueConstraint,
};
use ddlparse_core::{parse_column, ParseError};
use pretty_assertions::assert_eq;

fn constraints(sql: &str) -> Vec<Constraint> {
    column(sql).definition.map(|d| d.constraints).unwrap_or_default()
}

fn default_of(sql: &str) -> DefaultValue {
    column(sql)
        .definition
        .and_then(|d| d.default)
        .unwrap_or_else(|| panic!("no default in {sql}"))
}

// ===================================================================
// Simple columns
// ===================================================================

#[test]
fn simple_column() {
    assert_eq!(
        column("name TEXT"),
        Column::with_definition("name", ColumnDefinition::typed("TEXT"))
    );
}

#[test]
fn bare_column_has_no_definition() {
    assert_eq!(column("name"), Column::new("name"));
}

#[test]
fn basic_constraints() {
    assert_eq!(
        constraints("id INTEGER PRIMARY KEY"),
        vec![Constraint::PrimaryKey(PrimaryKeyConstraint::default())]
    );
    assert_eq!(
        constraints("id INTEGER UNIQUE"),
        vec![Constraint::Unique(UniqueConstraint::default())]
    );
    assert_eq!(
        constraints("id INTEGER NOT NULL"),
        vec![Constraint::NotNull(NotNullConstraint::default())]
    );
    assert_eq!(
        constraints("model INTEGER REFERENCES models"),
        vec![Constraint::ForeignKey(ForeignKeyConstraint::references("models"))]
    );
}

#[test]
fn trailing_input_fails() {
    let err = parse_column("name TEXT, age INTEGER").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    assert!(err.to_string().contains("trailing input"), "{err}");
}

#[test]
fn bare_null_is_dropped() {
    assert_eq!(
        constraints("name TEXT NULL UNIQUE NULL"),
        vec![Constraint::Unique(UniqueConstraint::default())]
    );
    assert_eq!(column("name TEXT NULL"), column("name TEXT"));
}

// ===================================================================
// PRIMARY KEY stages
// ===================================================================

#[test]
fn primary_key_stages() {
    let cases = [
        ("id INTEGER PRIMARY KEY", PrimaryKeyConstraint::default()),
        (
            "id INTEGER PRIMARY KEY ASC",
            PrimaryKeyConstraint::default().ascending(true),
        ),
        (
            "id INTEGER PRIMARY KEY DESC ON CONFLICT IGNORE AUTOINCREMENT",
            PrimaryKeyConstraint::default()
                .ascending(false)
                .on_conflict(OnConflict::Ignore)
                .autoincrement(),
        ),
        (
            "id INTEGER PRIMARY KEY AUTOINCREMENT",
            PrimaryKeyConstraint::default().autoincrement(),
        ),
        (
            "id INTEGER PRIMARY KEY ON CONFLICT REPLACE",
            PrimaryKeyConstraint::default().on_conflict(OnConflict::Replace),
        ),
    ];
    for (sql, expected) in cases {
        assert_eq!(constraints(sql), vec![Constraint::PrimaryKey(expected)], "{sql}");
    }
}

#[test]
fn primary_key_stages_are_ordered() {
    // AUTOINCREMENT ends the constraint; ASC cannot follow it.
    let _ = parse_column("id INTEGER PRIMARY KEY AUTOINCREMENT ASC").unwrap_err();
}

#[test]
fn not_null_on_conflict() {
    assert_eq!(
        constraints("a TEXT NOT NULL ON CONFLICT FAIL"),
        vec![Constraint::NotNull(NotNullConstraint {
            on_conflict: Some(OnConflict::Fail)
        })]
    );
}

// ===================================================================
// DEFAULT
// ===================================================================

#[test]
fn default_literals() {
    assert_eq!(default_of("a INTEGER DEFAULT 0"), DefaultValue::from(Expr::integer(0)));
    assert_eq!(default_of("a INTEGER DEFAULT -1"), DefaultValue::from(Expr::integer(-1)));
    assert_eq!(default_of("a TEXT DEFAULT 'x'"), DefaultValue::from(Expr::string("x")));
    assert_eq!(default_of("a BLOB DEFAULT x'00ff'"), DefaultValue::from(Expr::blob(vec![0, 255])));
    assert_eq!(default_of("a TEXT DEFAULT NULL"), DefaultValue::from(Expr::null()));
}

#[test]
fn default_booleans_are_case_insensitive() {
    assert_eq!(default_of("a BOOL DEFAULT true"), DefaultValue::from(Expr::boolean(true)));
    assert_eq!(default_of("a BOOL DEFAULT FALSE"), DefaultValue::from(Expr::boolean(false)));
}

#[test]
fn default_time_keywords() {
    assert_eq!(
        default_of("created DATETIME DEFAULT CURRENT_TIMESTAMP"),
        DefaultValue::Keyword(DefaultValueKeyword::CurrentTimestamp)
    );
    assert_eq!(
        default_of("d DATE DEFAULT current_date"),
        DefaultValue::Keyword(DefaultValueKeyword::CurrentDate)
    );
    assert_eq!(
        default_of("t TIME DEFAULT CURRENT_TIME"),
        DefaultValue::Keyword(DefaultValueKeyword::CurrentTime)
    );
}

#[test]
fn default_expression() {
    assert_eq!(
        default_of("a INTEGER DEFAULT (1 + 2)"),
        DefaultValue::from(Expr::integer(1).binary(BinaryOp::Add, Expr::integer(2)))
    );
}

#[test]
fn default_last_one_wins() {
    assert_eq!(default_of("a INTEGER DEFAULT 1 DEFAULT 2"), DefaultValue::from(Expr::integer(2)));
}

#[test]
fn default_rejects_bare_identifier() {
    let _ = parse_column("a TEXT DEFAULT nothing").unwrap_err();
}

// ===================================================================
// Other constraints
// ===================================================================

#[test]
fn collate() {
    assert_eq!(
        constraints("name TEXT COLLATE NOCASE"),
        vec![Constraint::Collate(CollateConstraint {
            sequence: CollatingSequence::NoCase
        })]
    );
    let err = parse_column("name TEXT COLLATE klingon").unwrap_err();
    assert!(err.to_string().starts_with("unknown collating sequence"), "{err}");
}

#[test]
fn generated_columns() {
    let expected = GeneratedColumnConstraint {
        expression: Expr::ident("a").binary(BinaryOp::Mul, Expr::integer(2)),
        storage: Some(GeneratedColumnStorage::Stored),
    };
    assert_eq!(
        constraints("b INTEGER GENERATED ALWAYS AS (a * 2) STORED"),
        vec![Constraint::Generated(expected.clone())]
    );
    assert_eq!(
        constraints("b INTEGER AS (a * 2) STORED"),
        vec![Constraint::Generated(expected)]
    );
    let parsed = constraints("b AS (a) VIRTUAL");
    let Constraint::Generated(virtual_column) = &parsed[0] else {
        panic!("expected generated column");
    };
    assert_eq!(virtual_column.storage, Some(GeneratedColumnStorage::Virtual));
    let parsed = constraints("b AS (a)");
    let Constraint::Generated(plain) = &parsed[0] else {
        panic!("expected generated column");
    };
    assert_eq!(plain.storage, None);
}

#[test]
fn named_column_constraint() {
    let parsed = constraints("a INTEGER CONSTRAINT must_be_set NOT NULL");
    assert_eq!(
        parsed,
        vec![Constraint::from(NotNullConstraint::default()).named("must_be_set")]
    );
}

#[test]
fn constraints_in_any_order() {
    let definition = column("a TEXT NOT NULL DEFAULT 'x' UNIQUE COLLATE BINARY")
        .definition
        .unwrap();
    assert_eq!(definition.default, Some(DefaultValue::from(Expr::string("x"))));
    assert_eq!(definition.constraints.len(), 3);
}

// ===================================================================
// Foreign keys
// ===================================================================

#[test]
fn foreign_key_full_clause() {
    let parsed = constraints(
        "owner INTEGER REFERENCES people(id) ON DELETE SET NULL ON UPDATE NO ACTION \
         MATCH SIMPLE DEFERRABLE INITIALLY DEFERRED",
    );
    let expected = ForeignKeyConstraint {
        foreign_table: String::from("people"),
        foreign_columns: vec![String::from("id")],
        on_delete: Some(OnDeleteOrUpdateAction::SetNull),
        on_update: Some(OnDeleteOrUpdateAction::NoAction),
        match_mode: Some(ForeignKeyMatch::Simple),
        deferrable: Some(true),
        initially_deferred: Some(true),
        ..ForeignKeyConstraint::default()
    };
    assert_eq!(parsed, vec![Constraint::ForeignKey(expected)]);
}

#[test]
fn foreign_key_last_direction_wins() {
    let table = parse_table(
        "CREATE TABLE t(a INTEGER, FOREIGN KEY (a) REFERENCES o(id) \
         ON DELETE CASCADE ON UPDATE RESTRICT ON DELETE SET DEFAULT)",
    );
    let Constraint::ForeignKey(fk) = &table.constraints[0] else {
        panic!("expected foreign key");
    };
    assert_eq!(fk.on_delete, Some(OnDeleteOrUpdateAction::SetDefault));
    assert_eq!(fk.on_update, Some(OnDeleteOrUpdateAction::Restrict));
}

#[test]
fn foreign_key_match_modes() {
    for (mode, expected) in [
        ("SIMPLE", ForeignKeyMatch::Simple),
        ("full", ForeignKeyMatch::Full),
        ("Partial", ForeignKeyMatch::Partial),
    ] {
        let parsed = constraints(&format!("a INTEGER REFERENCES t MATCH {mode}"));
        let Constraint::ForeignKey(fk) = &parsed[0] else {
            panic!("expected foreign key");
        };
        assert_eq!(fk.match_mode, Some(expected));
    }
}

#[test]
fn foreign_key_not_deferrable_initially_immediate() {
    let parsed = constraints("a INTEGER REFERENCES t NOT DEFERRABLE INITIALLY IMMEDIATE");
    let Constraint::ForeignKey(fk) = &parsed[0] else {
        panic!("expected foreign key");
    };
    assert_eq!(fk.deferrable, Some(false));
    assert_eq!(fk.initially_deferred, Some(false));
}

#[test]
fn foreign_key_followed_by_not_null() {
    let parsed = constraints("a INTEGER REFERENCES t(id) NOT NULL");
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1], Constraint::NotNull(NotNullConstraint::default()));
}

#[test]
fn foreign_key_no_requires_action() {
    let _ = parse_column("a INTEGER REFERENCES t ON DELETE NO CASCADE").unwrap_err();
}
