//! Enumerations, column types and names used throughout the syntax tree.

use super::Identifier;

/// Conflict resolution strategy for `ON CONFLICT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnConflict {
    /// ROLLBACK
    Rollback,
    /// ABORT
    Abort,
    /// FAIL
    Fail,
    /// IGNORE
    Ignore,
    /// REPLACE
    Replace,
}

impl OnConflict {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

/// Action taken by a foreign key `ON DELETE` or `ON UPDATE` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnDeleteOrUpdateAction {
    /// SET NULL
    SetNull,
    /// SET DEFAULT
    SetDefault,
    /// CASCADE
    Cascade,
    /// RESTRICT
    Restrict,
    /// NO ACTION
    NoAction,
}

impl OnDeleteOrUpdateAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// Foreign key `MATCH` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ForeignKeyMatch {
    /// MATCH SIMPLE
    Simple,
    /// MATCH FULL
    Full,
    /// MATCH PARTIAL
    Partial,
}

impl ForeignKeyMatch {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
        }
    }
}

/// Built-in collating sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CollatingSequence {
    /// BINARY
    Binary,
    /// NOCASE
    NoCase,
    /// RTRIM
    RTrim,
}

impl CollatingSequence {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::NoCase => "NOCASE",
            Self::RTrim => "RTRIM",
        }
    }

    /// Looks up a collating sequence by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Binary, Self::NoCase, Self::RTrim]
            .into_iter()
            .find(|seq| seq.as_str().eq_ignore_ascii_case(name))
    }
}

/// Storage of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GeneratedColumnStorage {
    /// Computed when read.
    Virtual,
    /// Computed when written and stored on disk.
    Stored,
}

impl GeneratedColumnStorage {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Virtual => "VIRTUAL",
            Self::Stored => "STORED",
        }
    }
}

/// The special time/date keywords accepted by `DEFAULT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DefaultValueKeyword {
    /// CURRENT_TIME
    CurrentTime,
    /// CURRENT_TIMESTAMP
    CurrentTimestamp,
    /// CURRENT_DATE
    CurrentDate,
}

impl DefaultValueKeyword {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::CurrentDate => "CURRENT_DATE",
        }
    }
}

/// A declared column type.
///
/// SQLite accepts any sequence of words as a type name, optionally followed
/// by numeric arguments: `TEXT`, `smallint unsigned` and `VARCHAR(500)` are
/// all `ColumnType`s; only the last has `args`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnType {
    /// Type name, words joined by single spaces, as written.
    pub name: String,
    /// Parenthesized numeric arguments.
    pub args: Vec<i64>,
}

impl ColumnType {
    /// Creates a type without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: vec![],
        }
    }

    /// Creates a parameterized type such as `VARCHAR(500)`.
    #[must_use]
    pub fn with_args(name: impl Into<String>, args: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A schema-qualified name, `schema.name`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QualifiedName {
    /// Schema (database) name, e.g. `main` or `temp`.
    pub schema: String,
    /// Object name.
    pub name: String,
}

impl QualifiedName {
    /// Creates a qualified name.
    #[must_use]
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

/// Name of a table or index, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObjectName {
    /// An unqualified name.
    Identifier(Identifier),
    /// A `schema.name` pair.
    Qualified(QualifiedName),
}

impl ObjectName {
    /// The object's own name, without any schema.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Identifier(ident) => &ident.value,
            Self::Qualified(qualified) => &qualified.name,
        }
    }

    /// The schema, if the name is qualified.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        match self {
            Self::Identifier(_) => None,
            Self::Qualified(qualified) => Some(&qualified.schema),
        }
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        Self::Identifier(Identifier::new(name))
    }
}

impl From<QualifiedName> for ObjectName {
    fn from(name: QualifiedName) -> Self {
        Self::Qualified(name)
    }
}
