//! Student repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Inserts referencing a missing user or class fail with a database error.
//! - Updates only touch `class_id` and report the number of changed rows.

use crate::model::class::ClassId;
use crate::model::student::{Student, StudentId, StudentSummary};
use crate::model::user::UserId;
use crate::repo::{
    ensure_connection_ready, push_pagination, uuid_column, RepoResult, TOUCH_UPDATED_AT,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const STUDENT_SELECT_SQL: &str = "SELECT
    student_id,
    user_id,
    class_id,
    created_at,
    updated_at
FROM students";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub user_id: UserId,
    pub class_id: ClassId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub class_id: Option<ClassId>,
}

/// Query options for listing students.
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub user_id: Option<UserId>,
    pub class_id: Option<ClassId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

pub trait StudentRepository {
    fn create(&self, student: &NewStudent) -> RepoResult<StudentSummary>;
    fn find(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn find_all(&self, query: &StudentListQuery) -> RepoResult<Vec<Student>>;
    fn find_and_update_by_id(
        &self,
        id: StudentId,
        changes: &StudentChanges,
    ) -> RepoResult<Option<usize>>;
    fn delete(&self, id: StudentId) -> RepoResult<bool>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create(&self, student: &NewStudent) -> RepoResult<StudentSummary> {
        let student_id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO students (student_id, user_id, class_id) VALUES (?1, ?2, ?3);",
            params![
                student_id.to_string(),
                student.user_id.to_string(),
                student.class_id.to_string(),
            ],
        )?;

        Ok(StudentSummary {
            student_id,
            user_id: student.user_id,
            class_id: student.class_id,
        })
    }

    fn find(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE student_id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self, query: &StudentListQuery) -> RepoResult<Vec<Student>> {
        let mut sql = format!("{STUDENT_SELECT_SQL} WHERE 1 = 1");
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
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn find_and_update_by_id(
        &self,
        id: StudentId,
        changes: &StudentChanges,
    ) -> RepoResult<Option<usize>> {
        let changed = match changes.class_id {
            Some(class_id) => self.conn.execute(
                &format!("UPDATE students SET class_id = ?1, {TOUCH_UPDATED_AT} WHERE student_id = ?2;"),
                params![class_id.to_string(), id.to_string()],
            )?,
            None => self.conn.execute(
                &format!("UPDATE students SET {TOUCH_UPDATED_AT} WHERE student_id = ?1;"),
                [id.to_string()],
            )?,
        };

        if changed == 0 {
            return Ok(None);
        }
        Ok(Some(changed))
    }

    fn delete(&self, id: StudentId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM students WHERE student_id = ?1;",
            [id.to_string()],
        )?;
        Ok(changed > 0)
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    Ok(Student {
        student_id: uuid_column(row, Student::TABLE, "student_id")?,
        user_id: uuid_column(row, Student::TABLE, "user_id")?,
        class_id: uuid_column(row, Student::TABLE, "class_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
