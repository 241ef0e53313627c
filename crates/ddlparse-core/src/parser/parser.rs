//! SQLite DDL parser implementation.

use tracing::trace;

use super::error::ParseError;
use super::options::ParseOptions;
use super::pratt::{self, precedence, token_to_binary_op, CALL, LOWEST, NEGATED};
use super::Result;
use crate::ast::{
    BinaryOp, CheckConstraint, CollateConstraint, CollatingSequence, Column, ColumnDefinition,
    ColumnType, Constraint, CreateIndexStatement, CreateTableStatement, DefaultValue,
    DefaultValueKeyword, Expr, ForeignKeyConstraint, ForeignKeyMatch, FunctionCall,
    GeneratedColumnConstraint, GeneratedColumnStorage, Identifier, Literal, NamedConstraint,
    NotNullConstraint, ObjectName, OnConflict, OnDeleteOrUpdateAction, PrimaryKeyConstraint,
    PrimaryKeyTableConstraint, QualifiedName, SelectStatement, Statement, UniqueConstraint,
    UniqueTableConstraint,
};
use crate::lexer::{Keyword, Location, Matcher, Scanner, Token, TokenKind, TokenValue};

/// Tokens that can start an expression.
const EXPRESSION_START: &[Matcher] = &[
    Matcher::Kind(TokenKind::Identifier),
    Matcher::Kind(TokenKind::StringLiteral),
    Matcher::Kind(TokenKind::BlobLiteral),
    Matcher::Kind(TokenKind::IntegerLiteral),
    Matcher::Kind(TokenKind::LeftParen),
    Matcher::Kind(TokenKind::Minus),
    Matcher::Kind(TokenKind::Plus),
    Matcher::Keyword(Keyword::Null),
];

const CONFLICT_STRATEGIES: &[Matcher] = &[
    Matcher::Keyword(Keyword::Rollback),
    Matcher::Keyword(Keyword::Abort),
    Matcher::Keyword(Keyword::Fail),
    Matcher::Keyword(Keyword::Ignore),
    Matcher::Keyword(Keyword::Replace),
];

/// Keywords that start a table constraint rather than a column.
const TABLE_CONSTRAINT_START: &[Keyword] = &[
    Keyword::Constraint,
    Keyword::Primary,
    Keyword::Foreign,
    Keyword::Unique,
    Keyword::Check,
];

/// Logs leaving a production when dropped.
struct Trace {
    production: &'static str,
    enabled: bool,
}

impl Drop for Trace {
    fn drop(&mut self) {
        if self.enabled {
            trace!(production = self.production, "exit");
        }
    }
}

/// SQLite DDL parser.
///
/// A parser is single-use: it owns a [`Scanner`] over one source string.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with default options.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the first token is malformed.
    pub fn new(source: &'a str) -> Result<Self> {
        Self::with_options(source, ParseOptions::default())
    }

    /// Creates a parser with the given options.
    ///
    /// # Errors
    ///
    /// Returns a syntax error if the first token is malformed.
    pub fn with_options(source: &'a str, options: ParseOptions) -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(source)?,
            options,
            depth: 0,
        })
    }

    /// Parses every statement in the source. Statements are separated by
    /// `;`, which is optional after the last one.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; no partial result is produced.
    pub fn parse(&mut self) -> Result<Vec<Statement>> {
        let _trace = self.trace("parse");
        let mut statements = Vec::new();
        while !self.scanner.done() {
            statements.push(self.parse_statement()?);
            if self.scanner.done() {
                break;
            }
            self.scanner.expect_kind(TokenKind::Semicolon)?;
        }
        Ok(statements)
    }

    /// Parses exactly one column definition, such as `id INTEGER PRIMARY KEY`.
    ///
    /// # Errors
    ///
    /// Returns a syntax error for malformed input or if anything follows the
    /// column.
    pub fn parse_column(&mut self) -> Result<Column> {
        let column = self.parse_column_def()?;
        if !self.scanner.done() {
            let token = self.scanner.current();
            return Err(ParseError::syntax(
                format!("trailing input after column definition: {}", token.describe()),
                token.location,
            ));
        }
        Ok(column)
    }

    // ======================================================================
    // Helpers
    // ======================================================================

    fn trace(&self, production: &'static str) -> Trace {
        let enabled = self.options.debug;
        if enabled {
            trace!(
                production,
                token = %self.scanner.current().describe(),
                "enter"
            );
        }
        Trace {
            production,
            enabled,
        }
    }

    /// Runs `f` one nesting level deeper, failing past the configured limit.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        self.scanner.current().as_keyword()
    }

    /// Consumes an identifier and returns its name.
    fn identifier(&mut self) -> Result<String> {
        let token = self.scanner.expect_kind(TokenKind::Identifier)?;
        into_text(token)
    }

    /// Consumes an identifier or, permissively, a keyword used as a name
    /// (in its original spelling).
    fn name(&mut self, what: &str) -> Result<String> {
        match self.scanner.current().kind {
            TokenKind::Identifier => self.identifier(),
            TokenKind::Keyword => Ok(self.scanner.advance()?.source_text()),
            _ => Err(ParseError::unexpected(what, self.scanner.current())),
        }
    }

    /// Parses `(name, name, ...)`.
    fn name_list(&mut self) -> Result<Vec<String>> {
        self.scanner.expect_kind(TokenKind::LeftParen)?;
        let mut names = vec![self.name("column name")?];
        while self.scanner.eat(TokenKind::Comma)?.is_some() {
            names.push(self.name("column name")?);
        }
        self.scanner.expect_kind(TokenKind::RightParen)?;
        Ok(names)
    }

    /// Parses the expression inside a `CHECK`, `DEFAULT (...)`, generated
    /// column or index `WHERE`: structurally, or as raw text in verbatim mode.
    fn clause_expression(&mut self) -> Result<Expr> {
        if self.options.verbatim {
            let text = into_text(self.scanner.capture_verbatim()?)?;
            if text.is_empty() {
                return Err(ParseError::unexpected("expression", self.scanner.current()));
            }
            return Ok(Expr::Verbatim(text));
        }
        self.parse_expression(LOWEST)
    }

    /// Parses `( expr )` around a clause expression.
    fn parenthesized_clause(&mut self) -> Result<Expr> {
        self.scanner.expect_kind(TokenKind::LeftParen)?;
        let expr = self.clause_expression()?;
        self.scanner.expect_kind(TokenKind::RightParen)?;
        Ok(expr)
    }

    // ======================================================================
    // Statements
    // ======================================================================

    fn parse_statement(&mut self) -> Result<Statement> {
        let _trace = self.trace("statement");
        let token = self.scanner.current();
        match (token.kind, token.as_keyword()) {
            (TokenKind::Keyword, Some(Keyword::Create)) => self.parse_create(),
            (TokenKind::Keyword, Some(Keyword::Select)) => {
                Ok(Statement::Select(self.parse_select()?))
            }
            (TokenKind::Keyword, _) => Err(ParseError::syntax(
                format!("unexpected keyword {}", token.describe()),
                token.location,
            )),
            (TokenKind::Unknown, _) => Err(ParseError::syntax(
                format!("unknown token {}", token.describe()),
                token.location,
            )),
            (kind, _) => Err(ParseError::syntax(
                format!("unexpected token type {kind}: {}", token.describe()),
                token.location,
            )),
        }
    }

    fn parse_create(&mut self) -> Result<Statement> {
        let _trace = self.trace("create");
        self.scanner.expect_keyword(Keyword::Create)?;

        let temporary = self.scanner.eat(Keyword::Temp)?.is_some()
            || self.scanner.eat(Keyword::Temporary)?.is_some();
        let unique = !temporary && self.scanner.eat(Keyword::Unique)?.is_some();
        let is_virtual = !temporary && !unique && self.scanner.eat(Keyword::Virtual)?.is_some();

        let expecting: &[Matcher] = if temporary {
            &[
                Matcher::Keyword(Keyword::Table),
                Matcher::Keyword(Keyword::Trigger),
                Matcher::Keyword(Keyword::View),
            ]
        } else if unique {
            &[Matcher::Keyword(Keyword::Index)]
        } else if is_virtual {
            &[Matcher::Keyword(Keyword::Table)]
        } else {
            &[
                Matcher::Keyword(Keyword::Table),
                Matcher::Keyword(Keyword::Index),
                Matcher::Keyword(Keyword::Trigger),
                Matcher::Keyword(Keyword::View),
            ]
        };
        let object = self.scanner.expect(expecting)?;

        match object.as_keyword() {
            Some(Keyword::Table) if is_virtual => Err(ParseError::NotImplemented("CREATE VIRTUAL TABLE")),
            Some(Keyword::Table) => Ok(Statement::CreateTable(self.parse_create_table(temporary)?)),
            Some(Keyword::Index) => Ok(Statement::CreateIndex(self.parse_create_index(unique)?)),
            Some(Keyword::Trigger) => Err(ParseError::NotImplemented("CREATE TRIGGER")),
            Some(Keyword::View) => Err(ParseError::NotImplemented("CREATE VIEW")),
            _ => Err(ParseError::impossible(format!(
                "CREATE matched unexpected object {}",
                object.describe()
            ))),
        }
    }

    /// Parses `[IF NOT EXISTS] name[.name]`.
    fn parse_object_name(&mut self) -> Result<(ObjectName, bool)> {
        let _trace = self.trace("object_name");
        let if_not_exists = if self.scanner.eat(Keyword::If)?.is_some() {
            self.scanner.expect_keyword(Keyword::Not)?;
            self.scanner.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let first = self.identifier()?;
        let name = if self.scanner.eat(TokenKind::Dot)?.is_some() {
            let second = self.identifier()?;
            ObjectName::Qualified(QualifiedName::new(first, second))
        } else {
            ObjectName::Identifier(Identifier::new(first))
        };
        Ok((name, if_not_exists))
    }

    fn parse_create_table(&mut self, temporary: bool) -> Result<CreateTableStatement> {
        let _trace = self.trace("create_table");
        let (name, if_not_exists) = self.parse_object_name()?;
        let mut table = CreateTableStatement::new(name);
        table.temporary = temporary;
        table.if_not_exists = if_not_exists;

        if self.scanner.eat(Keyword::As)?.is_some() {
            table.as_select = Some(self.parse_select()?);
            return Ok(table);
        }

        self.scanner.expect_kind(TokenKind::LeftParen)?;
        loop {
            let starts_constraint = self
                .peek_keyword()
                .is_some_and(|kw| TABLE_CONSTRAINT_START.contains(&kw));
            if starts_constraint {
                table.constraints.push(self.parse_table_constraint()?);
            } else if table.constraints.is_empty() {
                table.columns.push(self.parse_column_def()?);
            } else {
                let token = self.scanner.current();
                return Err(ParseError::syntax(
                    format!(
                        "column definitions must precede table constraints, got {}",
                        token.describe()
                    ),
                    token.location,
                ));
            }

            if self.scanner.eat(TokenKind::Comma)?.is_none() {
                break;
            }
        }
        self.scanner.expect_kind(TokenKind::RightParen)?;

        if table.columns.is_empty() {
            return Err(ParseError::syntax_unlocated(format!(
                "table {} must have at least one column",
                table.name
            )));
        }

        if self.scanner.eat(Keyword::Without)?.is_some() {
            self.scanner
                .expect(&[Matcher::Exact(TokenKind::Identifier, "ROWID")])?;
            table.without_rowid = true;
        }
        Ok(table)
    }

    fn parse_create_index(&mut self, unique: bool) -> Result<CreateIndexStatement> {
        let _trace = self.trace("create_index");
        let (name, if_not_exists) = self.parse_object_name()?;
        self.scanner.expect_keyword(Keyword::On)?;
        let table = self.identifier()?;
        let columns = self.name_list()?;
        let where_clause = if self.scanner.eat(Keyword::Where)?.is_some() {
            Some(self.clause_expression()?)
        } else {
            None
        };
        Ok(CreateIndexStatement {
            name,
            table,
            columns,
            if_not_exists,
            unique,
            where_clause,
        })
    }

    fn parse_select(&mut self) -> Result<SelectStatement> {
        let _trace = self.trace("select");
        self.scanner.expect_keyword(Keyword::Select)?;
        let mut columns = vec![self.parse_expression(LOWEST)?];
        while self.scanner.eat(TokenKind::Comma)?.is_some() {
            columns.push(self.parse_expression(LOWEST)?);
        }
        Ok(SelectStatement { columns })
    }

    // ======================================================================
    // Columns
    // ======================================================================

    fn parse_column_def(&mut self) -> Result<Column> {
        let _trace = self.trace("column");
        let name = self.name("column name")?;
        let mut definition = ColumnDefinition::default();

        if self.scanner.peek_is(TokenKind::Identifier) {
            definition.column_type = Some(self.parse_column_type()?);
        }

        while let Some(keyword) = self.peek_keyword() {
            match keyword {
                Keyword::Null => {
                    // Tolerated after or between constraints; carries no meaning.
                    self.scanner.advance()?;
                }
                Keyword::Default => {
                    self.scanner.advance()?;
                    definition.default = Some(self.parse_default_value()?);
                }
                Keyword::Constraint => {
                    self.scanner.advance()?;
                    let constraint_name = self.name("constraint name")?;
                    let Some(inner) = self.parse_column_constraint()? else {
                        return Err(ParseError::unexpected(
                            "column constraint",
                            self.scanner.current(),
                        ));
                    };
                    definition.constraints.push(Constraint::Named(NamedConstraint {
                        name: constraint_name,
                        inner: Box::new(inner),
                    }));
                }
                _ => match self.parse_column_constraint()? {
                    Some(constraint) => definition.constraints.push(constraint),
                    None => break,
                },
            }
        }

        Ok(Column::with_definition(name, definition))
    }

    /// Parses `word [word ...] [(n [, n ...])]`.
    fn parse_column_type(&mut self) -> Result<ColumnType> {
        let _trace = self.trace("column_type");
        let mut words = vec![self.identifier()?];
        while self.scanner.peek_is(TokenKind::Identifier) {
            words.push(self.identifier()?);
        }

        let mut args = Vec::new();
        if self.scanner.eat(TokenKind::LeftParen)?.is_some() {
            args.push(self.parse_signed_integer()?);
            while self.scanner.eat(TokenKind::Comma)?.is_some() {
                args.push(self.parse_signed_integer()?);
            }
            self.scanner.expect_kind(TokenKind::RightParen)?;
        }
        Ok(ColumnType::with_args(words.join(" "), args))
    }

    /// Parses an integer literal with an optional leading sign.
    fn parse_signed_integer(&mut self) -> Result<i64> {
        let negative = if self.scanner.eat(TokenKind::Minus)?.is_some() {
            true
        } else {
            self.scanner.eat(TokenKind::Plus)?;
            false
        };
        let token = self.scanner.expect_kind(TokenKind::IntegerLiteral)?;
        let TokenValue::Integer(value) = token.value else {
            return Err(ParseError::impossible("integer literal without a value"));
        };
        let signed = if negative {
            0_i64.checked_sub_unsigned(value)
        } else {
            i64::try_from(value).ok()
        };
        signed.ok_or_else(|| out_of_range(negative, value, token.location))
    }

    fn parse_default_value(&mut self) -> Result<DefaultValue> {
        let _trace = self.trace("default");
        let token = self.scanner.current();
        match token.kind {
            TokenKind::LeftParen => Ok(DefaultValue::Expr(self.parenthesized_clause()?)),
            TokenKind::IntegerLiteral | TokenKind::Minus | TokenKind::Plus => {
                Ok(DefaultValue::Expr(Expr::integer(self.parse_signed_integer()?)))
            }
            TokenKind::StringLiteral | TokenKind::BlobLiteral => {
                let token = self.scanner.advance()?;
                Ok(DefaultValue::Expr(literal_from_token(token)?))
            }
            TokenKind::Identifier if token.is_word("TRUE") => {
                self.scanner.advance()?;
                Ok(DefaultValue::Expr(Expr::boolean(true)))
            }
            TokenKind::Identifier if token.is_word("FALSE") => {
                self.scanner.advance()?;
                Ok(DefaultValue::Expr(Expr::boolean(false)))
            }
            TokenKind::Keyword => {
                let value = match token.as_keyword() {
                    Some(Keyword::Null) => DefaultValue::Expr(Expr::null()),
                    Some(Keyword::CurrentTime) => {
                        DefaultValue::Keyword(DefaultValueKeyword::CurrentTime)
                    }
                    Some(Keyword::CurrentDate) => {
                        DefaultValue::Keyword(DefaultValueKeyword::CurrentDate)
                    }
                    Some(Keyword::CurrentTimestamp) => {
                        DefaultValue::Keyword(DefaultValueKeyword::CurrentTimestamp)
                    }
                    _ => return Err(ParseError::unexpected("default value", token)),
                };
                self.scanner.advance()?;
                Ok(value)
            }
            _ => Err(ParseError::unexpected("default value", token)),
        }
    }

    // ======================================================================
    // Constraints
    // ======================================================================

    /// Parses a column constraint, or returns `None` if the current keyword
    /// does not start one.
    fn parse_column_constraint(&mut self) -> Result<Option<Constraint>> {
        let _trace = self.trace("column_constraint");
        let constraint: Constraint = match self.peek_keyword() {
            Some(Keyword::Primary) => self.parse_primary_key()?.into(),
            Some(Keyword::Not) => {
                self.scanner.advance()?;
                self.scanner.expect_keyword(Keyword::Null)?;
                NotNullConstraint {
                    on_conflict: self.parse_on_conflict()?,
                }
                .into()
            }
            Some(Keyword::Unique) => {
                self.scanner.advance()?;
                UniqueConstraint {
                    on_conflict: self.parse_on_conflict()?,
                }
                .into()
            }
            Some(Keyword::Check) => self.parse_check()?.into(),
            Some(Keyword::Collate) => {
                self.scanner.advance()?;
                let token = self.scanner.expect_kind(TokenKind::Identifier)?;
                let sequence = token
                    .text()
                    .and_then(CollatingSequence::from_name)
                    .ok_or_else(|| {
                        ParseError::syntax(
                            format!("unknown collating sequence {}", token.describe()),
                            token.location,
                        )
                    })?;
                CollateConstraint { sequence }.into()
            }
            Some(Keyword::References) => self.parse_foreign_key_clause(vec![])?.into(),
            Some(Keyword::Generated) => {
                self.scanner.advance()?;
                self.scanner.expect_keyword(Keyword::Always)?;
                self.parse_generated()?.into()
            }
            Some(Keyword::As) => self.parse_generated()?.into(),
            _ => return Ok(None),
        };
        Ok(Some(constraint))
    }

    /// Parses `PRIMARY KEY [ASC|DESC] [ON CONFLICT ...] [AUTOINCREMENT]`.
    fn parse_primary_key(&mut self) -> Result<PrimaryKeyConstraint> {
        let _trace = self.trace("primary_key");
        self.scanner.expect_keyword(Keyword::Primary)?;
        self.scanner.expect_keyword(Keyword::Key)?;

        let mut constraint = PrimaryKeyConstraint::default();
        if self.scanner.eat(Keyword::Asc)?.is_some() {
            constraint.ascending = Some(true);
        } else if self.scanner.eat(Keyword::Desc)?.is_some() {
            constraint.ascending = Some(false);
        }
        constraint.on_conflict = self.parse_on_conflict()?;
        constraint.autoincrement = self.scanner.eat(Keyword::Autoincrement)?.is_some();
        Ok(constraint)
    }

    /// Parses an optional `ON CONFLICT strategy`.
    fn parse_on_conflict(&mut self) -> Result<Option<OnConflict>> {
        if self.scanner.eat(Keyword::On)?.is_none() {
            return Ok(None);
        }
        self.scanner.expect_keyword(Keyword::Conflict)?;
        let token = self.scanner.expect(CONFLICT_STRATEGIES)?;
        let strategy = match token.as_keyword() {
            Some(Keyword::Rollback) => OnConflict::Rollback,
            Some(Keyword::Abort) => OnConflict::Abort,
            Some(Keyword::Fail) => OnConflict::Fail,
            Some(Keyword::Ignore) => OnConflict::Ignore,
            Some(Keyword::Replace) => OnConflict::Replace,
            _ => {
                return Err(ParseError::impossible(format!(
                    "unhandled conflict strategy {}",
                    token.describe()
                )))
            }
        };
        Ok(Some(strategy))
    }

    fn parse_check(&mut self) -> Result<CheckConstraint> {
        let _trace = self.trace("check");
        self.scanner.expect_keyword(Keyword::Check)?;
        Ok(CheckConstraint {
            expr: self.parenthesized_clause()?,
        })
    }

    /// Parses `AS (expr) [STORED|VIRTUAL]`; `GENERATED ALWAYS` is already consumed.
    fn parse_generated(&mut self) -> Result<GeneratedColumnConstraint> {
        let _trace = self.trace("generated");
        self.scanner.expect_keyword(Keyword::As)?;
        let expression = self.parenthesized_clause()?;
        let storage = if self
            .scanner
            .eat(Matcher::Exact(TokenKind::Identifier, "STORED"))?
            .is_some()
        {
            Some(GeneratedColumnStorage::Stored)
        } else if self.scanner.eat(Keyword::Virtual)?.is_some() {
            Some(GeneratedColumnStorage::Virtual)
        } else {
            None
        };
        Ok(GeneratedColumnConstraint {
            expression,
            storage,
        })
    }

    fn parse_table_constraint(&mut self) -> Result<Constraint> {
        let _trace = self.trace("table_constraint");
        if self.scanner.eat(Keyword::Constraint)?.is_some() {
            let name = self.name("constraint name")?;
            let inner = self.parse_table_constraint_body()?;
            return Ok(inner.named(name));
        }
        self.parse_table_constraint_body()
    }

    fn parse_table_constraint_body(&mut self) -> Result<Constraint> {
        let token = self.scanner.expect(&[
            Matcher::Keyword(Keyword::Primary),
            Matcher::Keyword(Keyword::Unique),
            Matcher::Keyword(Keyword::Foreign),
            Matcher::Keyword(Keyword::Check),
        ])?;
        match token.as_keyword() {
            Some(Keyword::Primary) => {
                self.scanner.expect_keyword(Keyword::Key)?;
                let columns = self.name_list()?;
                Ok(PrimaryKeyTableConstraint {
                    columns,
                    on_conflict: self.parse_on_conflict()?,
                }
                .into())
            }
            Some(Keyword::Unique) => {
                let columns = self.name_list()?;
                Ok(UniqueTableConstraint {
                    columns,
                    on_conflict: self.parse_on_conflict()?,
                }
                .into())
            }
            Some(Keyword::Foreign) => {
                self.scanner.expect_keyword(Keyword::Key)?;
                let columns = self.name_list()?;
                Ok(self.parse_foreign_key_clause(columns)?.into())
            }
            Some(Keyword::Check) => {
                // The keyword was consumed by `expect`; put it back for `parse_check`.
                self.scanner.push(token)?;
                Ok(self.parse_check()?.into())
            }
            _ => Err(ParseError::impossible(format!(
                "unhandled table constraint {}",
                token.describe()
            ))),
        }
    }

    /// Parses `REFERENCES table [(cols)] [ON DELETE|UPDATE action | MATCH mode]*
    /// [[NOT] DEFERRABLE [INITIALLY DEFERRED|IMMEDIATE]]`.
    fn parse_foreign_key_clause(&mut self, columns: Vec<String>) -> Result<ForeignKeyConstraint> {
        let _trace = self.trace("foreign_key");
        self.scanner.expect_keyword(Keyword::References)?;
        let mut constraint = ForeignKeyConstraint::references(self.identifier()?);
        constraint.columns = columns;
        if self.scanner.peek_is(TokenKind::LeftParen) {
            constraint.foreign_columns = self.name_list()?;
        }

        loop {
            if self.scanner.eat(Keyword::On)?.is_some() {
                let direction = self
                    .scanner
                    .expect(&[Keyword::Delete.into(), Keyword::Update.into()])?;
                let action = self.parse_foreign_key_action()?;
                // A repeated direction overwrites the earlier one.
                if direction.is_keyword(Keyword::Delete) {
                    constraint.on_delete = Some(action);
                } else {
                    constraint.on_update = Some(action);
                }
            } else if self.scanner.eat(Keyword::Match)?.is_some() {
                constraint.match_mode = Some(self.parse_foreign_key_match()?);
            } else {
                break;
            }
        }

        if self.scanner.peek_is(Keyword::Not) {
            let not = self.scanner.advance()?;
            if self.scanner.eat(Keyword::Deferrable)?.is_some() {
                constraint.deferrable = Some(false);
            } else {
                // `NOT NULL` and friends belong to the enclosing column.
                self.scanner.push(not)?;
                return Ok(constraint);
            }
        } else if self.scanner.eat(Keyword::Deferrable)?.is_some() {
            constraint.deferrable = Some(true);
        }

        if constraint.deferrable.is_some() && self.scanner.eat(Keyword::Initially)?.is_some() {
            let token = self
                .scanner
                .expect(&[Keyword::Deferred.into(), Keyword::Immediate.into()])?;
            constraint.initially_deferred = Some(token.is_keyword(Keyword::Deferred));
        }
        Ok(constraint)
    }

    fn parse_foreign_key_action(&mut self) -> Result<OnDeleteOrUpdateAction> {
        let token = self.scanner.expect(&[
            Keyword::Set.into(),
            Keyword::Cascade.into(),
            Keyword::Restrict.into(),
            Keyword::No.into(),
        ])?;
        match token.as_keyword() {
            Some(Keyword::Set) => {
                let next = self
                    .scanner
                    .expect(&[Keyword::Null.into(), Keyword::Default.into()])?;
                if next.is_keyword(Keyword::Null) {
                    Ok(OnDeleteOrUpdateAction::SetNull)
                } else {
                    Ok(OnDeleteOrUpdateAction::SetDefault)
                }
            }
            Some(Keyword::Cascade) => Ok(OnDeleteOrUpdateAction::Cascade),
            Some(Keyword::Restrict) => Ok(OnDeleteOrUpdateAction::Restrict),
            Some(Keyword::No) => {
                self.scanner.expect_keyword(Keyword::Action)?;
                Ok(OnDeleteOrUpdateAction::NoAction)
            }
            _ => Err(ParseError::impossible(format!(
                "unhandled foreign key action {}",
                token.describe()
            ))),
        }
    }

    fn parse_foreign_key_match(&mut self) -> Result<ForeignKeyMatch> {
        // FULL is a keyword, SIMPLE and PARTIAL are not.
        let token = self.scanner.expect(&[
            Matcher::Exact(TokenKind::Identifier, "SIMPLE"),
            Matcher::Keyword(Keyword::Full),
            Matcher::Exact(TokenKind::Identifier, "PARTIAL"),
        ])?;
        if token.is_keyword(Keyword::Full) {
            Ok(ForeignKeyMatch::Full)
        } else if token.is_word("SIMPLE") {
            Ok(ForeignKeyMatch::Simple)
        } else {
            Ok(ForeignKeyMatch::Partial)
        }
    }

    // ======================================================================
    // Expressions
    // ======================================================================

    /// Parses an expression whose operators all bind tighter than `min`.
    fn parse_expression(&mut self, min: i16) -> Result<Expr> {
        self.nested(|parser| parser.parse_expression_inner(min))
    }

    fn parse_expression_inner(&mut self, min: i16) -> Result<Expr> {
        let _trace = self.trace("expression");
        let mut left = self.parse_prefix()?;

        loop {
            let token = self.scanner.current();

            if token.kind == TokenKind::LeftParen && CALL > min {
                if let Expr::Identifier(name) = left {
                    left = Expr::Call(self.parse_call(name)?);
                    continue;
                }
                break;
            }

            if token.is_keyword(Keyword::Not) && NEGATED > min {
                let not = self.scanner.advance()?;
                let negated = self
                    .peek_keyword()
                    .and_then(pratt::keyword_to_binary_op)
                    .and_then(|op| op.negated());
                let Some(op) = negated else {
                    self.scanner.push(not)?;
                    break;
                };
                self.scanner.advance()?;
                let right = self.parse_expression(precedence(op))?;
                left = left.binary(op, right);
                continue;
            }

            let Some(mut op) = token_to_binary_op(token) else {
                break;
            };
            if precedence(op) <= min {
                break;
            }
            self.scanner.advance()?;
            if op == BinaryOp::Is && self.scanner.eat(Keyword::Not)?.is_some() {
                op = BinaryOp::IsNot;
            }
            let right = self.parse_expression(precedence(op))?;
            left = left.binary(op, right);
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        let _trace = self.trace("prefix");
        let kind = self.scanner.check(EXPRESSION_START)?.kind;
        match kind {
            TokenKind::LeftParen => {
                self.scanner.advance()?;
                let first = self.parse_expression(LOWEST)?;
                if self.scanner.eat(TokenKind::Comma)?.is_none() {
                    self.scanner.expect_kind(TokenKind::RightParen)?;
                    return Ok(first);
                }
                let mut values = vec![first, self.parse_expression(LOWEST)?];
                while self.scanner.eat(TokenKind::Comma)?.is_some() {
                    values.push(self.parse_expression(LOWEST)?);
                }
                self.scanner.expect_kind(TokenKind::RightParen)?;
                Ok(Expr::List(values))
            }
            TokenKind::Minus | TokenKind::Plus => Ok(Expr::integer(self.parse_signed_integer()?)),
            TokenKind::Identifier => Ok(Expr::Identifier(Identifier::new(self.identifier()?))),
            _ => literal_from_token(self.scanner.advance()?),
        }
    }

    /// Parses the argument list of a call to `name`; the cursor is on `(`.
    fn parse_call(&mut self, name: Identifier) -> Result<FunctionCall> {
        let _trace = self.trace("call");
        self.scanner.expect_kind(TokenKind::LeftParen)?;
        let mut call = FunctionCall {
            name,
            args: vec![],
            star: false,
            distinct: false,
        };

        if self.scanner.eat(TokenKind::Star)?.is_some() {
            call.star = true;
        } else if self.scanner.eat(Keyword::Distinct)?.is_some() {
            call.distinct = true;
            call.args.push(self.parse_expression(LOWEST)?);
        } else if !self.scanner.peek_is(TokenKind::RightParen) {
            call.args.push(self.parse_expression(LOWEST)?);
            while self.scanner.eat(TokenKind::Comma)?.is_some() {
                call.args.push(self.parse_expression(LOWEST)?);
            }
        }
        self.scanner.expect_kind(TokenKind::RightParen)?;
        Ok(call)
    }
}

/// Takes the text payload of an identifier or string token.
fn into_text(token: Token) -> Result<String> {
    match token.value {
        TokenValue::Text(text) => Ok(text),
        other => Err(ParseError::impossible(format!(
            "{} token without text: {other}",
            token.kind
        ))),
    }
}

fn out_of_range(negative: bool, magnitude: u64, location: Location) -> ParseError {
    let sign = if negative { "-" } else { "" };
    ParseError::syntax(
        format!("integer literal out of range: {sign}{magnitude}"),
        location,
    )
}

/// Builds a literal expression from a literal token.
fn literal_from_token(token: Token) -> Result<Expr> {
    let location = token.location;
    let literal = match (token.kind, token.value) {
        (TokenKind::StringLiteral, TokenValue::Text(text)) => Literal::String(text),
        (TokenKind::BlobLiteral, TokenValue::Bytes(bytes)) => Literal::Blob(bytes),
        (TokenKind::IntegerLiteral, TokenValue::Integer(n)) => Literal::Integer(
            i64::try_from(n).map_err(|_| out_of_range(false, n, location))?,
        ),
        (TokenKind::Keyword, TokenValue::Keyword(Keyword::Null)) => Literal::Null,
        (kind, _) => {
            return Err(ParseError::impossible(format!(
                "{kind} is not a literal"
            )))
        }
    };
    Ok(Expr::Literal(literal))
}
