use serde::{Deserialize, Serialize};

use crate::user_status::UserStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_ids: Vec<i64>,
    pub status: UserStatus,
    pub updated_by_id: i64,
}
