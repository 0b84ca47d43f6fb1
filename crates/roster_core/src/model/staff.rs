//! Staff record.
//!
//! # Invariants
//! - `user_id` always references an existing user (FK, cascade delete).
//! - `class_id` is optional; when set it references an existing class.

use crate::model::class::ClassId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type StaffId = Uuid;

/// Full snapshot of a `staff` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub staff_id: StaffId,
    pub user_id: UserId,
    /// `None` for staff not assigned to any class.
    pub class_id: Option<ClassId>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields returned to the caller right after a staff record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSummary {
    pub staff_id: StaffId,
    pub user_id: UserId,
    pub class_id: Option<ClassId>,
}

impl Staff {
    pub const TABLE: &'static str = "staff";
}
