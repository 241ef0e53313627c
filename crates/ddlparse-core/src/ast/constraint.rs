//! Column and table constraints.

use super::{
    CollatingSequence, Expr, ForeignKeyMatch, GeneratedColumnStorage, OnConflict,
    OnDeleteOrUpdateAction,
};

/// `CHECK (expr)`, at column or table level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckConstraint {
    /// The checked expression.
    pub expr: Expr,
}

/// `CONSTRAINT name <constraint>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedConstraint {
    /// The constraint name.
    pub name: String,
    /// The named constraint.
    pub inner: Box<Constraint>,
}

/// `NOT NULL [ON CONFLICT ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NotNullConstraint {
    /// Conflict resolution.
    pub on_conflict: Option<OnConflict>,
}

/// Column-level `PRIMARY KEY [ASC|DESC] [ON CONFLICT ...] [AUTOINCREMENT]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrimaryKeyConstraint {
    /// `Some(true)` for ASC, `Some(false)` for DESC, `None` when unspecified.
    pub ascending: Option<bool>,
    /// Conflict resolution.
    pub on_conflict: Option<OnConflict>,
    /// Whether AUTOINCREMENT was given.
    pub autoincrement: bool,
}

impl PrimaryKeyConstraint {
    /// Sets the sort order.
    #[must_use]
    pub const fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = Some(ascending);
        self
    }

    /// Sets the conflict resolution.
    #[must_use]
    pub const fn on_conflict(mut self, on_conflict: OnConflict) -> Self {
        self.on_conflict = Some(on_conflict);
        self
    }

    /// Marks the key AUTOINCREMENT.
    #[must_use]
    pub const fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }
}

/// Table-level `PRIMARY KEY (col, ...) [ON CONFLICT ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrimaryKeyTableConstraint {
    /// Key columns.
    pub columns: Vec<String>,
    /// Conflict resolution.
    pub on_conflict: Option<OnConflict>,
}

/// `COLLATE sequence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollateConstraint {
    /// The collating sequence.
    pub sequence: CollatingSequence,
}

/// A foreign key, either inline (`REFERENCES t(c)`, no `columns`) or
/// table-level (`FOREIGN KEY (a) REFERENCES t(c)`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ForeignKeyConstraint {
    /// Referencing columns; empty for the column-level form.
    pub columns: Vec<String>,
    /// Referenced table.
    pub foreign_table: String,
    /// Referenced columns; empty when the table's primary key is implied.
    pub foreign_columns: Vec<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<OnDeleteOrUpdateAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<OnDeleteOrUpdateAction>,
    /// `MATCH` mode.
    #[cfg_attr(feature = "serde", serde(rename = "match"))]
    pub match_mode: Option<ForeignKeyMatch>,
    /// `Some(true)` for DEFERRABLE, `Some(false)` for NOT DEFERRABLE.
    pub deferrable: Option<bool>,
    /// `Some(true)` for INITIALLY DEFERRED, `Some(false)` for INITIALLY IMMEDIATE.
    pub initially_deferred: Option<bool>,
}

impl ForeignKeyConstraint {
    /// Creates a reference to `table`.
    #[must_use]
    pub fn references(table: impl Into<String>) -> Self {
        Self {
            foreign_table: table.into(),
            ..Self::default()
        }
    }

    /// Sets the referenced columns.
    #[must_use]
    pub fn foreign_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.foreign_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the referencing columns (table-level form).
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the `ON DELETE` action.
    #[must_use]
    pub fn on_delete(mut self, action: OnDeleteOrUpdateAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the `ON UPDATE` action.
    #[must_use]
    pub fn on_update(mut self, action: OnDeleteOrUpdateAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// Column-level `UNIQUE [ON CONFLICT ...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UniqueConstraint {
    /// Conflict resolution.
    pub on_conflict: Option<OnConflict>,
}

/// Table-level `UNIQUE (col, ...) [ON CONFLICT ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UniqueTableConstraint {
    /// Unique columns.
    pub columns: Vec<String>,
    /// Conflict resolution.
    pub on_conflict: Option<OnConflict>,
}

/// `[GENERATED ALWAYS] AS (expr) [STORED|VIRTUAL]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeneratedColumnConstraint {
    /// The generating expression.
    pub expression: Expr,
    /// Storage, when given.
    pub storage: Option<GeneratedColumnStorage>,
}

/// A column or table constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Constraint {
    Check(CheckConstraint),
    Named(NamedConstraint),
    NotNull(NotNullConstraint),
    PrimaryKey(PrimaryKeyConstraint),
    PrimaryKeyTable(PrimaryKeyTableConstraint),
    Collate(CollateConstraint),
    ForeignKey(ForeignKeyConstraint),
    Unique(UniqueConstraint),
    UniqueTable(UniqueTableConstraint),
    Generated(GeneratedColumnConstraint),
}

impl Constraint {
    /// Wraps the constraint in `CONSTRAINT name`.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        Self::Named(NamedConstraint {
            name: name.into(),
            inner: Box::new(self),
        })
    }

    /// Returns true for constraints that may only appear at table level.
    #[must_use]
    pub fn is_table_level(&self) -> bool {
        match self {
            Self::PrimaryKeyTable(_) | Self::UniqueTable(_) => true,
            Self::ForeignKey(fk) => !fk.columns.is_empty(),
            Self::Named(named) => named.inner.is_table_level(),
            _ => false,
        }
    }
}

macro_rules! impl_from_constraint {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Constraint {
                fn from(constraint: $ty) -> Self {
                    Self::$variant(constraint)
                }
            }
        )*
    };
}

impl_from_constraint! {
    CheckConstraint => Check,
    NamedConstraint => Named,
    NotNullConstraint => NotNull,
    PrimaryKeyConstraint => PrimaryKey,
    PrimaryKeyTableConstraint => PrimaryKeyTable,
    CollateConstraint => Collate,
    ForeignKeyConstraint => ForeignKey,
    UniqueConstraint => Unique,
    UniqueTableConstraint => UniqueTable,
    GeneratedColumnConstraint => Generated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_key_builder() {
        let pk = PrimaryKeyConstraint::default()
            .ascending(false)
            .on_conflict(OnConflict::Ignore)
            .autoincrement();
        assert_eq!(pk.ascending, Some(false));
        assert_eq!(pk.on_conflict, Some(OnConflict::Ignore));
        assert!(pk.autoincrement);
    }

    #[test]
    fn test_foreign_key_builder() {
        let fk = ForeignKeyConstraint::references("people")
            .foreign_columns(["id"])
            .on_delete(OnDeleteOrUpdateAction::Cascade);
        assert_eq!(fk.foreign_table, "people");
        assert_eq!(fk.foreign_columns, vec![String::from("id")]);
        assert_eq!(fk.on_delete, Some(OnDeleteOrUpdateAction::Cascade));
        assert!(fk.columns.is_empty());
    }

    #[test]
    fn test_table_level_detection() {
        let inline: Constraint = ForeignKeyConstraint::references("t").into();
        assert!(!inline.is_table_level());

        let table: Constraint = ForeignKeyConstraint::references("t").columns(["a"]).into();
        assert!(table.is_table_level());
        assert!(table.named("fk_a").is_table_level());

        assert!(!Constraint::from(UniqueConstraint::default()).is_table_level());
    }
}
