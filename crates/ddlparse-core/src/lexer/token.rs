//! Token types for the SQL lexer.

use core::fmt;

use super::{Location, Span};

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// SQLite keywords, as listed at <https://sqlite.org/lang_keywords.html>.
        ///
        /// Words outside this set (`TRUE`, `ROWID`, `STORED`, type names, ...)
        /// are lexed as identifiers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[allow(missing_docs)]
                $variant,
            )*
        }

        impl Keyword {
            /// Every keyword, in alphabetical order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword in its canonical upper-case spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Abort => "ABORT",
    Action => "ACTION",
    Add => "ADD",
    After => "AFTER",
    All => "ALL",
    Alter => "ALTER",
    Always => "ALWAYS",
    Analyze => "ANALYZE",
    And => "AND",
    As => "AS",
    Asc => "ASC",
    Attach => "ATTACH",
    Autoincrement => "AUTOINCREMENT",
    Before => "BEFORE",
    Begin => "BEGIN",
    Between => "BETWEEN",
    By => "BY",
    Cascade => "CASCADE",
    Case => "CASE",
    Cast => "CAST",
    Check => "CHECK",
    Collate => "COLLATE",
    Column => "COLUMN",
    Commit => "COMMIT",
    Conflict => "CONFLICT",
    Constraint => "CONSTRAINT",
    Create => "CREATE",
    Cross => "CROSS",
    Current => "CURRENT",
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    Database => "DATABASE",
    Default => "DEFAULT",
    Deferrable => "DEFERRABLE",
    Deferred => "DEFERRED",
    Delete => "DELETE",
    Desc => "DESC",
    Detach => "DETACH",
    Distinct => "DISTINCT",
    Do => "DO",
    Drop => "DROP",
    Each => "EACH",
    Else => "ELSE",
    End => "END",
    Escape => "ESCAPE",
    Except => "EXCEPT",
    Exclude => "EXCLUDE",
    Exclusive => "EXCLUSIVE",
    Exists => "EXISTS",
    Explain => "EXPLAIN",
    Fail => "FAIL",
    Filter => "FILTER",
    First => "FIRST",
    Following => "FOLLOWING",
    For => "FOR",
    Foreign => "FOREIGN",
    From => "FROM",
    Full => "FULL",
    Generated => "GENERATED",
    Glob => "GLOB",
    Group => "GROUP",
    Groups => "GROUPS",
    Having => "HAVING",
    If => "IF",
    Ignore => "IGNORE",
    Immediate => "IMMEDIATE",
    In => "IN",
    Index => "INDEX",
    Indexed => "INDEXED",
    Initially => "INITIALLY",
    Inner => "INNER",
    Insert => "INSERT",
    Instead => "INSTEAD",
    Intersect => "INTERSECT",
    Into => "INTO",
    Is => "IS",
    Isnull => "ISNULL",
    Join => "JOIN",
    Key => "KEY",
    Last => "LAST",
    Left => "LEFT",
    Like => "LIKE",
    Limit => "LIMIT",
    Match => "MATCH",
    Materialized => "MATERIALIZED",
    Natural => "NATURAL",
    No => "NO",
    Not => "NOT",
    Nothing => "NOTHING",
    Notnull => "NOTNULL",
    Null => "NULL",
    Nulls => "NULLS",
    Of => "OF",
    Offset => "OFFSET",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Others => "OTHERS",
    Outer => "OUTER",
    Over => "OVER",
    Partition => "PARTITION",
    Plan => "PLAN",
    Pragma => "PRAGMA",
    Preceding => "PRECEDING",
    Primary => "PRIMARY",
    Query => "QUERY",
    Raise => "RAISE",
    Range => "RANGE",
    Recursive => "RECURSIVE",
    References => "REFERENCES",
    Regexp => "REGEXP",
    Reindex => "REINDEX",
    Release => "RELEASE",
    Rename => "RENAME",
    Replace => "REPLACE",
    Restrict => "RESTRICT",
    Returning => "RETURNING",
    Right => "RIGHT",
    Rollback => "ROLLBACK",
    Row => "ROW",
    Rows => "ROWS",
    Savepoint => "SAVEPOINT",
    Select => "SELECT",
    Set => "SET",
    Table => "TABLE",
    Temp => "TEMP",
    Temporary => "TEMPORARY",
    Then => "THEN",
    Ties => "TIES",
    To => "TO",
    Transaction => "TRANSACTION",
    Trigger => "TRIGGER",
    Unbounded => "UNBOUNDED",
    Union => "UNION",
    Unique => "UNIQUE",
    Update => "UPDATE",
    Using => "USING",
    Vacuum => "VACUUM",
    Values => "VALUES",
    View => "VIEW",
    Virtual => "VIRTUAL",
    When => "WHEN",
    Where => "WHERE",
    Window => "WINDOW",
    With => "WITH",
    Without => "WITHOUT",
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// SQL keyword
    Keyword,
    /// Bare or quoted identifier
    Identifier,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// != or <>
    NotEqual,
    /// >
    GreaterThan,
    /// <
    LessThan,
    /// >=
    GreaterOrEqual,
    /// <=
    LessOrEqual,
    /// ||
    Concat,
    /// = or ==
    Equal,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// &
    Ampersand,
    /// |
    Pipe,
    /// <<
    ShiftLeft,
    /// >>
    ShiftRight,
    /// 'text'
    StringLiteral,
    /// X'hex'
    BlobLiteral,
    /// 42
    IntegerLiteral,
    /// Sentinel returned once the input is exhausted
    EndOfInput,
    /// A character the lexer does not recognise
    Unknown,
}

impl TokenKind {
    /// Human-readable name used in "expected ..." messages.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::NotEqual => "'!='",
            Self::GreaterThan => "'>'",
            Self::LessThan => "'<'",
            Self::GreaterOrEqual => "'>='",
            Self::LessOrEqual => "'<='",
            Self::Concat => "'||'",
            Self::Equal => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Ampersand => "'&'",
            Self::Pipe => "'|'",
            Self::ShiftLeft => "'<<'",
            Self::ShiftRight => "'>>'",
            Self::StringLiteral => "string literal",
            Self::BlobLiteral => "blob literal",
            Self::IntegerLiteral => "integer literal",
            Self::EndOfInput => "end of input",
            Self::Unknown => "unknown token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The payload carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Keyword, normalised to its upper-case form.
    Keyword(Keyword),
    /// Identifier name, string contents or punctuation text.
    Text(String),
    /// Decoded blob bytes.
    Bytes(Vec<u8>),
    /// Integer magnitude. The sign is a separate token, so the range
    /// check against `i64` happens once the parser knows it.
    Integer(u64),
    /// No payload (end of input).
    None,
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Integer(n) => write!(f, "{n}"),
            Self::None => Ok(()),
        }
    }
}

/// A token with its position in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token's payload.
    pub value: TokenValue,
    /// Source spelling, kept when `value` was case-normalised (keywords).
    pub original_text: Option<String>,
    /// Byte range in the source.
    pub span: Span,
    /// Line/column of the first character.
    pub location: Location,
}

impl Token {
    /// Creates a new token without an original spelling.
    #[must_use]
    pub const fn new(kind: TokenKind, value: TokenValue, span: Span, location: Location) -> Self {
        Self {
            kind,
            value,
            original_text: None,
            span,
            location,
        }
    }

    /// Creates an end-of-input sentinel at the given position.
    #[must_use]
    pub const fn end_of_input(offset: usize, location: Location) -> Self {
        Self::new(
            TokenKind::EndOfInput,
            TokenValue::None,
            Span::new(offset, offset),
            location,
        )
    }

    /// Returns true if this is the end-of-input sentinel.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.value {
            TokenValue::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.as_keyword() == Some(keyword)
    }

    /// Returns the textual payload, if any (keywords yield their upper-case form).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Keyword(kw) => Some(kw.as_str()),
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The spelling as written in the source: the original text for keywords,
    /// the value for everything else.
    #[must_use]
    pub fn source_text(&self) -> String {
        self.original_text
            .clone()
            .unwrap_or_else(|| self.value.to_string())
    }

    /// Returns true if this is an identifier spelled `word` (ASCII case-insensitive).
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier
            && self.text().is_some_and(|t| t.eq_ignore_ascii_case(word))
    }

    /// Describes the token for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => String::from("end of input"),
            TokenKind::StringLiteral => format!("'{}'", self.value),
            _ => format!("{:?}", self.value.to_string()),
        }
    }
}
