//! Invoicing System - Schema Inspection Example
//!
//! This example parses the schema of a small invoicing system and:
//! - Prints every statement in canonical form
//! - Lists the foreign keys between tables
//! - Collects the columns referenced by CHECK constraints
//!
//! Run with: cargo run --example invoicing

use ddlparse_core::ast::{
    walk, CheckConstraint, Constraint, ForeignKeyConstraint, Identifier, Node, Statement, Visitor,
};

// =============================================================================
// SCHEMA
// =============================================================================

const SCHEMA: &str = "
-- Tenants
CREATE TABLE companies(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    tax_id TEXT UNIQUE,
    default_currency TEXT NOT NULL DEFAULT 'EUR' CHECK (length(default_currency) = 3),
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE clients(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
    name TEXT NOT NULL COLLATE NOCASE,
    email TEXT,
    payment_terms_days INTEGER DEFAULT 30 CHECK (payment_terms_days >= 0)
);

CREATE TABLE invoices(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL,
    client_id INTEGER NOT NULL,
    number TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'draft',
    total_cents INTEGER NOT NULL DEFAULT 0,
    UNIQUE (company_id, number),
    FOREIGN KEY (company_id) REFERENCES companies(id),
    CONSTRAINT invoice_client FOREIGN KEY (client_id) REFERENCES clients(id)
        ON DELETE RESTRICT DEFERRABLE INITIALLY DEFERRED,
    CHECK (status IN ('draft', 'sent', 'paid', 'overdue'))
);

CREATE INDEX invoices_by_client ON invoices(client_id);
CREATE UNIQUE INDEX IF NOT EXISTS open_invoices ON invoices(company_id, number)
    WHERE status != 'paid';
";

// =============================================================================
// VISITOR
// =============================================================================

/// Records foreign keys and the columns CHECK constraints depend on.
#[derive(Default)]
struct SchemaReport<'a> {
    foreign_keys: Vec<&'a ForeignKeyConstraint>,
    checks: usize,
    checked_columns: Vec<&'a str>,
}

impl<'a> Visitor<'a> for SchemaReport<'a> {
    fn visit_foreign_key_constraint(&mut self, constraint: &'a ForeignKeyConstraint) {
        self.foreign_keys.push(constraint);
    }

    fn visit_check_constraint(&mut self, constraint: &'a CheckConstraint) {
        self.checks += 1;
        let mut columns = ColumnNames::default();
        walk(Node::from(&constraint.expr), &mut columns);
        self.checked_columns.extend(columns.0);
    }
}

#[derive(Default)]
struct ColumnNames<'a>(Vec<&'a str>);

impl<'a> Visitor<'a> for ColumnNames<'a> {
    fn visit_identifier(&mut self, ident: &'a Identifier) {
        self.0.push(&ident.value);
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> Result<(), ddlparse_core::ParseError> {
    let statements = ddlparse_core::parse(SCHEMA)?;

    println!("=== Canonical schema ===\n");
    for statement in &statements {
        println!("{statement};");
    }

    let mut report = SchemaReport::default();
    for statement in &statements {
        walk(Node::from(statement), &mut report);
    }

    println!("\n=== Foreign keys ===\n");
    for fk in &report.foreign_keys {
        let action = fk
            .on_delete
            .map(|a| format!(" (ON DELETE {a})"))
            .unwrap_or_default();
        println!("  -> {}{}", fk.foreign_table, action);
    }

    println!("\n=== CHECK constraints: {} ===\n", report.checks);
    for column in &report.checked_columns {
        println!("  {column}");
    }

    println!("\n=== Tables ===\n");
    for statement in &statements {
        if let Statement::CreateTable(table) = statement {
            let named = table
                .constraints
                .iter()
                .filter(|c| matches!(c, Constraint::Named(_)))
                .count();
            println!(
                "  {}: {} columns, {} table constraints ({} named)",
                table.name.name(),
                table.columns.len(),
                table.constraints.len(),
                named
            );
        }
    }

    Ok(())
}
