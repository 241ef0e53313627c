//! Rendering tests: every parsed statement renders to canonical SQL that
//! parses back to the same tree.

mod common;
use common::*;

use ddlparse_core::ast::Statement;
use ddlparse_core::{parse_column, ParseOptions};
use pretty_assertions::assert_eq;

#[test]
fn create_table_round_trips() {
    for sql in [
        "CREATE TABLE people(name TEXT, age INTEGER)",
        "CREATE TABLE people(name, age)",
        "CREATE TEMP TABLE IF NOT EXISTS main.people(id INTEGER PRIMARY KEY) WITHOUT ROWID",
        "CREATE TABLE t(id INTEGER PRIMARY KEY DESC ON CONFLICT ABORT AUTOINCREMENT)",
        "CREATE TABLE t(a TEXT NOT NULL ON CONFLICT IGNORE UNIQUE COLLATE NOCASE)",
        "CREATE TABLE t(a TEXT DEFAULT 'it''s', b INTEGER DEFAULT -1, c BLOB DEFAULT x'00')",
        "CREATE TABLE t(a BOOLEAN DEFAULT false, b DATETIME DEFAULT CURRENT_TIMESTAMP)",
        "CREATE TABLE t(a INTEGER DEFAULT (1 + 2), b TEXT DEFAULT NULL)",
        "CREATE TABLE t(a INTEGER CHECK (a > 0 AND a < 10))",
        "CREATE TABLE t(a INTEGER, b INTEGER GENERATED ALWAYS AS (a * 2) STORED)",
        "CREATE TABLE t(a INTEGER, b INTEGER AS (a || 'x') VIRTUAL)",
        "CREATE TABLE t(a INTEGER CONSTRAINT positive CHECK (a > 0))",
        "CREATE TABLE t(price DECIMAL(10, 2), name VARCHAR(255), n unsigned big int)",
        "CREATE TABLE t(owner INTEGER REFERENCES people(id) ON DELETE CASCADE \
         ON UPDATE SET DEFAULT MATCH FULL NOT DEFERRABLE INITIALLY IMMEDIATE)",
        "CREATE TABLE t(a, b, PRIMARY KEY (a, b), UNIQUE (b) ON CONFLICT REPLACE, \
         CONSTRAINT fk FOREIGN KEY (b) REFERENCES o(id), CHECK (a != b))",
        "CREATE TABLE \"weird \"\"name\"\"\"(\"select\" TEXT)",
        "CREATE TABLE totals AS SELECT count(*), sum(x)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn create_index_round_trips() {
    for sql in [
        "CREATE INDEX i ON t(a)",
        "CREATE UNIQUE INDEX IF NOT EXISTS main.i ON t(a, b)",
        "CREATE INDEX i ON t(a) WHERE a IS NOT NULL AND b IN (1, 2)",
    ] {
        round_trip(sql);
    }
}

#[test]
fn select_round_trips() {
    round_trip("SELECT 1, 'a', x'41', NULL, foo(bar(1), 2) * -3");
    round_trip("SELECT -9223372036854775808, 9223372036854775807");
}

#[test]
fn quoted_function_and_type_names_round_trip() {
    for sql in [
        r#"SELECT "my func"(1)"#,
        r#"SELECT "select"(1), "Count"(*)"#,
        r#"CREATE TABLE t(a "my-type")"#,
        r#"CREATE TABLE t(a "my type" unsigned, b "order"(10))"#,
    ] {
        round_trip(sql);
    }
    assert_eq!(
        parse_one(r#"SELECT "my func"(1), count(*)"#).to_string(),
        r#"SELECT "my func"(1), count(*)"#
    );
    assert_eq!(
        parse_one(r#"CREATE TABLE t(a "my-type" unsigned)"#).to_string(),
        r#"CREATE TABLE "t"("a" "my-type unsigned")"#
    );
}

#[test]
fn canonical_forms() {
    let cases = [
        (
            "create table people(id integer primary key, name text not null)",
            r#"CREATE TABLE "people"("id" integer PRIMARY KEY, "name" text NOT NULL)"#,
        ),
        (
            "CREATE TEMP TABLE t(a)",
            r#"CREATE TEMPORARY TABLE "t"("a")"#,
        ),
        (
            "CREATE TABLE t(a INTEGER DEFAULT (1 + 2 * 3))",
            r#"CREATE TABLE "t"("a" INTEGER DEFAULT (1 + (2 * 3)))"#,
        ),
        (
            "CREATE TABLE t(a INTEGER NULL DEFAULT 0 NOT NULL)",
            r#"CREATE TABLE "t"("a" INTEGER DEFAULT 0 NOT NULL)"#,
        ),
        (
            "CREATE UNIQUE INDEX i on t(a) where a > 0",
            r#"CREATE UNIQUE INDEX "i" ON "t"("a") WHERE "a" > 0"#,
        ),
    ];
    for (sql, expected) in cases {
        assert_eq!(parse_one(sql).to_string(), expected, "{sql}");
    }
}

#[test]
fn column_renders_canonically() {
    let column = parse_column("name VARCHAR(20) collate rtrim DEFAULT 'x'").unwrap();
    assert_eq!(
        column.to_string(),
        r#""name" VARCHAR(20) DEFAULT 'x' COLLATE RTRIM"#
    );
    assert_eq!(parse_column(&column.to_string()).unwrap(), column);
}

#[test]
fn verbatim_round_trips() {
    let options = ParseOptions::new().verbatim(true);
    for sql in [
        "CREATE TABLE t(a INTEGER CHECK (a IN (SELECT x FROM y)))",
        "CREATE TABLE t(a INTEGER DEFAULT (CASE WHEN 1 THEN 2 END))",
        "CREATE TABLE t(a INTEGER, b INTEGER AS (a + ')') STORED)",
        "CREATE INDEX i ON t(a) WHERE a LIKE 'x;y'",
        "CREATE TABLE t(a INTEGER CHECK (a > 0 -- it's positive\n))",
        "CREATE INDEX i ON t(c) WHERE c > 0 -- partial\n; CREATE TABLE u(x)",
    ] {
        let first = ddlparse_core::parse_with(sql, &options).unwrap();
        let rendered: Vec<String> = first.iter().map(Statement::to_string).collect();
        let second = ddlparse_core::parse_with(&rendered.join(";\n"), &options).unwrap();
        assert_eq!(first, second, "{sql}");
    }
}

#[test]
fn statements_render_in_order() {
    let statements = parse("CREATE TABLE a(x); CREATE INDEX ax ON a(x); SELECT 1");
    let rendered: Vec<String> = statements.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            r#"CREATE TABLE "a"("x")"#,
            r#"CREATE INDEX "ax" ON "a"("x")"#,
            "SELECT 1",
        ]
    );
}
