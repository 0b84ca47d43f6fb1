//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (create/find/find_all/update/delete).
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - Not-found is reported as `None`/`false`, never as an error.
//! - Reads return detached snapshots.
//! - Repositories only accept connections whose schema is fully migrated.
//! - Lists follow creation order; rows created in the same millisecond keep
//!   insertion order (`rowid`).

pub mod class_repo;
pub mod staff_repo;
pub mod student_repo;
pub mod user_repo;

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use thiserror::Error;
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure for persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] DbError),

    #[error("invalid persisted data: {0}")]
    InvalidData(String),

    #[error("connection schema version {actual_version} is behind required {expected_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// SQL fragment refreshing `updated_at` to the current epoch milliseconds.
pub(crate) const TOUCH_UPDATED_AT: &str =
    "updated_at = CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

pub(crate) fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

/// Appends `LIMIT`/`OFFSET` clauses with bound values.
pub(crate) fn push_pagination(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    limit: Option<u32>,
    offset: u32,
) {
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(offset)));
        }
    } else if offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(offset)));
    }
}

pub(crate) fn uuid_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    parse_uuid_text(&text, table, column)
}

pub(crate) fn optional_uuid_column(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> RepoResult<Option<Uuid>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => Ok(Some(parse_uuid_text(&text, table, column)?)),
        None => Ok(None),
    }
}

fn parse_uuid_text(text: &str, table: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

#[cfg(test)]
mod tests {
    use super::push_pagination;
    use rusqlite::types::Value;

    #[test]
    fn pagination_without_limit_uses_unbounded_limit_for_offset() {
        let mut sql = String::from("SELECT 1");
        let mut binds = Vec::new();
        push_pagination(&mut sql, &mut binds, None, 3);
        assert_eq!(sql, "SELECT 1 LIMIT -1 OFFSET ?");
        assert_eq!(binds, vec![Value::Integer(3)]);
    }

    #[test]
    fn pagination_is_omitted_when_not_requested() {
        let mut sql = String::from("SELECT 1");
        let mut binds = Vec::new();
        push_pagination(&mut sql, &mut binds, None, 0);
        assert_eq!(sql, "SELECT 1");
        assert!(binds.is_empty());
    }
}
