//! Student input shapes. Identifiers arrive as text and must parse as UUIDs.

use crate::dto::UUID_RE;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(regex(path = *UUID_RE, code = "uuid", message = "must be a valid UUID"))]
    pub user_id: String,
    #[validate(regex(path = *UUID_RE, code = "uuid", message = "must be a valid UUID"))]
    pub class_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(regex(path = *UUID_RE, code = "uuid", message = "must be a valid UUID"))]
    pub class_id: String,
}
