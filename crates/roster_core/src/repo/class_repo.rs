//! Class repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Deleting a class removes its student/staff rows through FK cascades.
//! - `delete` removes at most one row: the oldest row matching the filter.

use crate::model::class::{Class, ClassId, ClassSummary};
use crate::repo::{
    ensure_connection_ready, push_pagination, uuid_column, RepoResult, TOUCH_UPDATED_AT,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const CLASS_SELECT_SQL: &str = "SELECT
    id,
    name,
    created_at,
    updated_at
FROM classes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassChanges {
    pub name: Option<String>,
}

/// Query options for listing classes.
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Selects the class a `delete` call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassFilter {
    ById(ClassId),
    ByName(String),
}

pub trait ClassRepository {
    fn create(&self, class: &NewClass) -> RepoResult<ClassSummary>;
    fn find(&self, id: ClassId) -> RepoResult<Option<Class>>;
    fn find_all(&self, query: &ClassListQuery) -> RepoResult<Vec<Class>>;
    fn find_and_update_by_id(
        &self,
        id: ClassId,
        changes: &ClassChanges,
    ) -> RepoResult<Option<Class>>;
    fn delete(&self, filter: &ClassFilter) -> RepoResult<bool>;
}

/// SQLite-backed class repository.
pub struct SqliteClassRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ClassRepository for SqliteClassRepository<'_> {
    fn create(&self, class: &NewClass) -> RepoResult<ClassSummary> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO classes (id, name) VALUES (?1, ?2);",
            params![id.to_string(), class.name.as_str()],
        )?;

        Ok(ClassSummary {
            id,
            name: class.name.clone(),
        })
    }

    fn find(&self, id: ClassId) -> RepoResult<Option<Class>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLASS_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_class_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self, query: &ClassListQuery) -> RepoResult<Vec<Class>> {
        let mut sql = format!("{CLASS_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = &query.name {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut classes = Vec::new();
        while let Some(row) = rows.next()? {
            classes.push(parse_class_row(row)?);
        }

        Ok(classes)
    }

    fn find_and_update_by_id(
        &self,
        id: ClassId,
        changes: &ClassChanges,
    ) -> RepoResult<Option<Class>> {
        if self.find(id)?.is_none() {
            return Ok(None);
        }

        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(name) = &changes.name {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        assignments.push(TOUCH_UPDATED_AT);
        bind_values.push(Value::Text(id.to_string()));

        self.conn.execute(
            &format!("UPDATE classes SET {} WHERE id = ?;", assignments.join(", ")),
            params_from_iter(bind_values),
        )?;

        self.find(id)
    }

    fn delete(&self, filter: &ClassFilter) -> RepoResult<bool> {
        let (predicate, bind_value) = match filter {
            ClassFilter::ById(id) => ("id = ?1", id.to_string()),
            ClassFilter::ByName(name) => ("name = ?1", name.clone()),
        };

        let changed = self.conn.execute(
            &format!(
                "DELETE FROM classes
                 WHERE id = (
                    SELECT id FROM classes
                    WHERE {predicate}
                    ORDER BY created_at ASC, rowid ASC
                    LIMIT 1
                 );"
            ),
            [bind_value],
        )?;

        Ok(changed > 0)
    }
}

fn parse_class_row(row: &Row<'_>) -> RepoResult<Class> {
    Ok(Class {
        id: uuid_column(row, Class::TABLE, "id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
