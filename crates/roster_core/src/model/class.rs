//! Class record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ClassId = Uuid;

/// Full snapshot of a `classes` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields returned to the caller right after a class is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: ClassId,
    pub name: String,
}

impl Class {
    pub const TABLE: &'static str = "classes";
}
