use serde::{Deserialize, Serialize};

use super::{role::Role, user_status::UserStatus};

/// A user as returned by `GET /users`.
///
/// `password` is only ever echoed back by some servers; it is never shown
/// and never required on the read side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    pub status: UserStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_id: Option<i64>,
}

impl User {
    pub fn role_ids(&self) -> Vec<i64> {
        self.roles.iter().map(|role| role.id).collect()
    }

    /// Name of the first role, which is what the user table shows.
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(|role| role.name.as_str())
    }
}

/// The short user shape embedded in tasks (`assignedTo`, `createdBy`, `updatedBy`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
}
