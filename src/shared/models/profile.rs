use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// The signed-in user, as returned by `POST /auth/login`.
///
/// Role names drive the post-login landing screen and the task re-fetch
/// scope. Servers disagree on `id` vs `userId`, both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "userId")]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}
