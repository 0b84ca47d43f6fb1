//! Relations between users, classes, students and staff.
//!
//! # Responsibility
//! - Declare cardinality and delete behavior for every parent/child pair.
//! - Establish the declared relations on a migrated connection.
//!
//! # Invariants
//! - `establish_associations` is idempotent and runs before any data access.
//! - Declared delete rules must match the foreign keys present in the schema;
//!   a mismatch is an error, never silently corrected.
//! - A `HasOne` child column is backed by a unique index.

use log::info;
use rusqlite::Connection;
use thiserror::Error;

/// How many children a parent row may own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    HasOne,
    HasMany,
}

/// What happens to child rows when their parent row is deleted.
///
/// Every declared association cascades. `SetNull` exists so schema
/// verification can name a foreign key that nulls the column instead, which
/// is a mismatch for any cascading association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRule {
    Cascade,
    SetNull,
}

impl DeleteRule {
    /// Spelling used by `PRAGMA foreign_key_list`.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
        }
    }

    /// Parses the pragma spelling; other actions (`NO ACTION`, `RESTRICT`) are `None`.
    pub fn from_sql(raw: &str) -> Option<Self> {
        match raw {
            "CASCADE" => Some(Self::Cascade),
            "SET NULL" => Some(Self::SetNull),
            _ => None,
        }
    }
}

/// One parent -> child relation keyed by a child foreign-key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    pub parent: &'static str,
    pub child: &'static str,
    pub foreign_key: &'static str,
    pub cardinality: Cardinality,
    pub on_delete: DeleteRule,
}

pub const ASSOCIATIONS: &[Association] = &[
    Association {
        parent: "users",
        child: "students",
        foreign_key: "user_id",
        cardinality: Cardinality::HasOne,
        on_delete: DeleteRule::Cascade,
    },
    Association {
        parent: "users",
        child: "staff",
        foreign_key: "user_id",
        cardinality: Cardinality::HasOne,
        on_delete: DeleteRule::Cascade,
    },
    Association {
        parent: "classes",
        child: "students",
        foreign_key: "class_id",
        cardinality: Cardinality::HasMany,
        on_delete: DeleteRule::Cascade,
    },
    Association {
        parent: "classes",
        child: "staff",
        foreign_key: "class_id",
        cardinality: Cardinality::HasMany,
        on_delete: DeleteRule::Cascade,
    },
];

#[derive(Debug, Error)]
pub enum AssociationError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{child}.{column} has no foreign key to {parent}")]
    MissingForeignKey {
        parent: &'static str,
        child: &'static str,
        column: &'static str,
    },

    #[error(
        "{child}.{column} deletes with `{actual}` in the schema but the association declares `{declared}`"
    )]
    Mismatch {
        child: &'static str,
        column: &'static str,
        declared: &'static str,
        actual: String,
    },
}

/// Child relations owned by `parent`, in declaration order.
pub fn dependents_of(parent: &str) -> impl Iterator<Item = &'static Association> + '_ {
    ASSOCIATIONS
        .iter()
        .filter(move |association| association.parent == parent)
}

/// Verifies every declared relation against the schema and creates the
/// unique indexes behind `HasOne` relations.
pub fn establish_associations(conn: &Connection) -> Result<(), AssociationError> {
    for association in ASSOCIATIONS {
        verify_foreign_key(conn, association)?;

        if association.cardinality == Cardinality::HasOne {
            conn.execute_batch(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_{child}_{column} ON {child} ({column});",
                child = association.child,
                column = association.foreign_key,
            ))?;
        }
    }

    info!(
        "event=associations_establish module=model status=ok count={}",
        ASSOCIATIONS.len()
    );
    Ok(())
}

fn verify_foreign_key(
    conn: &Connection,
    association: &Association,
) -> Result<(), AssociationError> {
    let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list({});", association.child))?;
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let table: String = row.get("table")?;
        let from: String = row.get("from")?;
        if table != association.parent || from != association.foreign_key {
            continue;
        }

        let on_delete: String = row.get("on_delete")?;
        if DeleteRule::from_sql(&on_delete) != Some(association.on_delete) {
            return Err(AssociationError::Mismatch {
                child: association.child,
                column: association.foreign_key,
                declared: association.on_delete.as_sql(),
                actual: on_delete,
            });
        }
        return Ok(());
    }

    Err(AssociationError::MissingForeignKey {
        parent: association.parent,
        child: association.child,
        column: association.foreign_key,
    })
}
