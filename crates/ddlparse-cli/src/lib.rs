//! Command-line front end for `ddlparse-core`.
//!
//! The binary reads a schema from a file or standard input and either checks
//! it, prints it back in canonical form, or dumps the syntax tree as JSON.
//!
//! ```bash
//! # Canonicalize a schema
//! ddlparse format schema.sql
//!
//! # Inspect the syntax tree, keeping CHECK/WHERE bodies as raw text
//! ddlparse --verbatim json < schema.sql
//!
//! # Parse one column definition
//! ddlparse column "id INTEGER PRIMARY KEY"
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use ddlparse_core::ast::Statement;
use ddlparse_core::ParseOptions;
use tracing::{debug, info};

/// Parse and canonicalize SQLite DDL.
#[derive(Debug, Parser)]
#[command(name = "ddlparse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Keep CHECK, DEFAULT (...), generated-column and index WHERE
    /// expressions as raw source text.
    #[arg(long, global = true, env = "DDLPARSE_VERBATIM")]
    pub verbatim: bool,

    /// Log every grammar production while parsing.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print each statement in canonical form.
    Format {
        /// Schema file (standard input if omitted).
        file: Option<PathBuf>,
    },

    /// Print the statements as JSON.
    Json {
        /// Schema file (standard input if omitted).
        file: Option<PathBuf>,
    },

    /// Parse a single column definition.
    Column {
        /// Column definition, e.g. "name TEXT NOT NULL".
        text: String,
    },

    /// Check that a schema parses.
    Check {
        /// Schema file (standard input if omitted).
        file: Option<PathBuf>,
    },
}

impl Cli {
    /// Parser options selected by the global flags.
    #[must_use]
    pub const fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().verbatim(self.verbatim).debug(self.verbose)
    }
}

/// Runs `cli`, reading schemas from `stdin` when no file is given, and
/// returns the text to print.
///
/// # Errors
///
/// Fails if the input cannot be read or does not parse.
pub fn run(cli: &Cli, stdin: impl Read) -> anyhow::Result<String> {
    let options = cli.parse_options();
    match &cli.command {
        Commands::Format { file } => {
            let statements = parse_input(file.as_deref(), stdin, &options)?;
            Ok(format_statements(&statements))
        }
        Commands::Json { file } => {
            let statements = parse_input(file.as_deref(), stdin, &options)?;
            Ok(serde_json::to_string_pretty(&statements)?)
        }
        Commands::Column { text } => {
            let column = ddlparse_core::parse_column_with(text, &options)
                .with_context(|| format!("Failed to parse column definition {text:?}"))?;
            Ok(column.to_string())
        }
        Commands::Check { file } => {
            let statements = parse_input(file.as_deref(), stdin, &options)?;
            info!(statements = statements.len(), "schema is valid");
            Ok(match statements.len() {
                1 => String::from("1 statement"),
                n => format!("{n} statements"),
            })
        }
    }
}

/// Renders statements one per line, each terminated by `;`.
#[must_use]
pub fn format_statements(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|statement| format!("{statement};"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_input(
    file: Option<&Path>,
    stdin: impl Read,
    options: &ParseOptions,
) -> anyhow::Result<Vec<Statement>> {
    let (source, origin) = read_source(file, stdin)?;
    debug!(origin = %origin, bytes = source.len(), "read schema");
    ddlparse_core::parse_with(&source, options)
        .with_context(|| format!("Failed to parse {origin}"))
}

fn read_source(file: Option<&Path>, mut stdin: impl Read) -> anyhow::Result<(String, String)> {
    match file {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((source, path.display().to_string()))
        }
        None => {
            let mut source = String::new();
            stdin
                .read_to_string(&mut source)
                .context("Failed to read standard input")?;
            Ok((source, String::from("<stdin>")))
        }
    }
}
