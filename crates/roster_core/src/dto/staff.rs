//! Staff input shapes. A staff member may be created without a class.

use crate::dto::UUID_RE;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffDto {
    #[validate(regex(path = *UUID_RE, code = "uuid", message = "must be a valid UUID"))]
    pub user_id: String,
    #[validate(regex(path = *UUID_RE, code = "uuid", message = "must be a valid UUID"))]
    pub class_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffDto {
    #[validate(regex(path = *UUID_RE, code = "uuid", message = "must be a valid UUID"))]
    pub class_id: String,
}
