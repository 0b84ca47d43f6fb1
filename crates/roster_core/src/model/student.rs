//! Student record.
//!
//! # Invariants
//! - `user_id` always references an existing user (FK, cascade delete).
//! - `class_id` always references an existing class (FK, cascade delete).

use crate::model::class::ClassId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type StudentId = Uuid;

/// Full snapshot of a `students` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: StudentId,
    pub user_id: UserId,
    pub class_id: ClassId,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields returned to the caller right after a student is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_id: StudentId,
    pub user_id: UserId,
    pub class_id: ClassId,
}

impl Student {
    pub const TABLE: &'static str = "students";
}
