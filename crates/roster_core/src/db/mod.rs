//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for roster.
//! - Apply schema migrations and establish associations in deterministic order.
//! - Close connections explicitly at the end of a command.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write application data before bootstrap succeeds.

pub mod migrations;
mod open;

pub use open::{close_db, open_db, open_db_in_memory, open_from_config};

use crate::model::associations::AssociationError;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failures raised while opening, migrating or querying SQLite.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },

    #[error("unsupported database dialect `{0}`; only `sqlite` is available")]
    UnsupportedDialect(String),

    #[error("{0}")]
    Association(#[from] AssociationError),
}
