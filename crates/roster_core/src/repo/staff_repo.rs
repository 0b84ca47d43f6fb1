//! Staff repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `class_id` may be `NULL` for unassigned staff.
//! - `delete` removes at most one row: the oldest row matching the filter.

use crate::model::class::ClassId;
use crate::model::staff::{Staff, StaffId, StaffSummary};
use crate::model::user::UserId;
use crate::repo::{
    ensure_connection_ready, optional_uuid_column, push_pagination, uuid_column, RepoResult,
    TOUCH_UPDATED_AT,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const STAFF_SELECT_SQL: &str = "SELECT
    staff_id,
    user_id,
    class_id,
    created_at,
    updated_at
FROM staff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaff {
    pub user_id: UserId,
    pub class_id: Option<ClassId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffChanges {
    pub class_id: Option<ClassId>,
}

/// Query options for listing staff.
#[derive(Debug, Clone, Default)]
pub struct StaffListQuery {
    pub user_id: Option<UserId>,
    pub class_id: Option<ClassId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Selects the staff record a `delete` call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffFilter {
    ById(StaffId),
    ByUser(UserId),
}

pub trait StaffRepository {
    fn create(&self, staff: &NewStaff) -> RepoResult<StaffSummary>;
    fn find(&self, id: StaffId) -> RepoResult<Option<Staff>>;
    fn find_all(&self, query: &StaffListQuery) -> RepoResult<Vec<Staff>>;
    fn find_and_update_by_id(
        &self,
        id: StaffId,
        changes: &StaffChanges,
    ) -> RepoResult<Option<Staff>>;
    fn delete(&self, filter: &StaffFilter) -> RepoResult<bool>;
}

/// SQLite-backed staff repository.
pub struct SqliteStaffRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStaffRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StaffRepository for SqliteStaffRepository<'_> {
    fn create(&self, staff: &NewStaff) -> RepoResult<StaffSummary> {
        let staff_id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO staff (staff_id, user_id, class_id) VALUES (?1, ?2, ?3);",
            params![
                staff_id.to_string(),
                staff.user_id.to_string(),
                staff.class_id.map(|id| id.to_string()),
            ],
        )?;

        Ok(StaffSummary {
            staff_id,
            user_id: staff.user_id,
            class_id: staff.class_id,
        })
    }

    fn find(&self, id: StaffId) -> RepoResult<Option<Staff>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STAFF_SELECT_SQL} WHERE staff_id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_staff_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self, query: &StaffListQuery) -> RepoResult<Vec<Staff>> {
        let mut sql = format!("{STAFF_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(user_id) = query.user_id {
            sql.push_str(" AND user_id = ?");
            bind_values.push(Value::Text(user_id.to_string()));
        }
        if let Some(class_id) = query.class_id {
            sql.push_str(" AND class_id = ?");
            bind_values.push(Value::Text(class_id.to_string()));
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut staff = Vec::new();
        while let Some(row) = rows.next()? {
            staff.push(parse_staff_row(row)?);
        }

        Ok(staff)
    }

    fn find_and_update_by_id(
        &self,
        id: StaffId,
        changes: &StaffChanges,
    ) -> RepoResult<Option<Staff>> {
        if self.find(id)?.is_none() {
            return Ok(None);
        }

        match changes.class_id {
            Some(class_id) => self.conn.execute(
                &format!("UPDATE staff SET class_id = ?1, {TOUCH_UPDATED_AT} WHERE staff_id = ?2;"),
                params![class_id.to_string(), id.to_string()],
            )?,
            None => self.conn.execute(
                &format!("UPDATE staff SET {TOUCH_UPDATED_AT} WHERE staff_id = ?1;"),
                [id.to_string()],
            )?,
        };

        self.find(id)
    }

    fn delete(&self, filter: &StaffFilter) -> RepoResult<bool> {
        let (predicate, bind_value) = match filter {
            StaffFilter::ById(id) => ("staff_id = ?1", id.to_string()),
            StaffFilter::ByUser(user_id) => ("user_id = ?1", user_id.to_string()),
        };

        let changed = self.conn.execute(
            &format!(
                "DELETE FROM staff
                 WHERE staff_id = (
                    SELECT staff_id FROM staff
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

fn parse_staff_row(row: &Row<'_>) -> RepoResult<Staff> {
    Ok(Staff {
        staff_id: uuid_column(row, Staff::TABLE, "staff_id")?,
        user_id: uuid_column(row, Staff::TABLE, "user_id")?,
        class_id: optional_uuid_column(row, Staff::TABLE, "class_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
