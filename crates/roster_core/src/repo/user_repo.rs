//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `users` table.
//!
//! # Invariants
//! - Deleting a user removes its student/staff rows through FK cascades.
//! - Updates report the number of changed rows, `None` when nothing matched.

use crate::model::user::{User, UserId, UserSummary};
use crate::repo::{
    ensure_connection_ready, push_pagination, uuid_column, RepoResult, TOUCH_UPDATED_AT,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    age,
    created_at,
    updated_at
FROM users";

/// Insert payload for a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
}

/// Query options for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

pub trait UserRepository {
    fn create(&self, user: &NewUser) -> RepoResult<UserSummary>;
    fn find(&self, id: UserId) -> RepoResult<Option<User>>;
    fn find_all(&self, query: &UserListQuery) -> RepoResult<Vec<User>>;
    fn find_and_update_by_id(&self, id: UserId, changes: &UserChanges)
        -> RepoResult<Option<usize>>;
    fn delete(&self, id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create(&self, user: &NewUser) -> RepoResult<UserSummary> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO users (id, first_name, last_name, age) VALUES (?1, ?2, ?3, ?4);",
            params![
                id.to_string(),
                user.first_name.as_str(),
                user.last_name.as_str(),
                user.age,
            ],
        )?;

        Ok(UserSummary {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })
    }

    fn find(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self, query: &UserListQuery) -> RepoResult<Vec<User>> {
        let mut sql = format!("{USER_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(first_name) = &query.first_name {
            sql.push_str(" AND first_name = ?");
            bind_values.push(Value::Text(first_name.clone()));
        }
        if let Some(last_name) = &query.last_name {
            sql.push_str(" AND last_name = ?");
            bind_values.push(Value::Text(last_name.clone()));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn find_and_update_by_id(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> RepoResult<Option<usize>> {
        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(first_name) = &changes.first_name {
            assignments.push("first_name = ?");
            bind_values.push(Value::Text(first_name.clone()));
        }
        if let Some(last_name) = &changes.last_name {
            assignments.push("last_name = ?");
            bind_values.push(Value::Text(last_name.clone()));
        }
        if let Some(age) = changes.age {
            assignments.push("age = ?");
            bind_values.push(Value::Integer(age));
        }
        assignments.push(TOUCH_UPDATED_AT);
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(
            &format!("UPDATE users SET {} WHERE id = ?;", assignments.join(", ")),
            params_from_iter(bind_values),
        )?;

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(changed))
    }

    fn delete(&self, id: UserId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: uuid_column(row, User::TABLE, "id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        age: row.get("age")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
