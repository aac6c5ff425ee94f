use serde::{Deserialize, Serialize};

use crate::profile::Profile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub profile: Profile,
    /// Path of the screen to open first.
    pub landing: String,
}
