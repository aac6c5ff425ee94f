use super::{
    checks::Checks,
    draft::{Draft, UpdateDraft},
    field_errors::FieldErrors,
    role_schema::validate_role,
};
use crate::{
    choice::Choice, user::User, user_create_request::UserCreateRequest, user_status::UserStatus,
    user_update_request::UserUpdateRequest,
};

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct UserCreateDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_ids: Vec<i64>,
    pub status: String,
    pub created_by_id: i64,
}

impl Default for UserCreateDraft {
    fn default() -> Self {
        Self {
            username: "newuser".to_string(),
            email: "newuser@example.com".to_string(),
            password: "password".to_string(),
            role_ids: Vec::new(),
            status: UserStatus::Active.as_str().to_string(),
            created_by_id: 0,
        }
    }
}

impl Draft for UserCreateDraft {
    type Payload = UserCreateRequest;

    fn stamp_actor(&mut self, actor_id: i64) {
        self.created_by_id = actor_id;
    }

    fn validate(&self) -> Result<UserCreateRequest, FieldErrors> {
        let mut checks = Checks::new();
        let account = check_account(&mut checks, &self.username, &self.email, &self.password, &self.role_ids);
        let status = checks.choice::<UserStatus>("status", &self.status);
        let created_by_id =
            checks.positive("createdById", self.created_by_id, "CreatedById must be a positive number");

        let errors = checks.finish();
        match status {
            Some(status) if errors.is_empty() => Ok(UserCreateRequest {
                username: account.username,
                email: account.email,
                password: account.password,
                role_ids: account.role_ids,
                status,
                created_by_id,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdateDraft {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_ids: Vec<i64>,
    pub status: String,
    pub updated_by_id: i64,
}

impl From<&User> for UserUpdateDraft {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone().unwrap_or_default(),
            role_ids: user.role_ids(),
            status: user.status.as_str().to_string(),
            updated_by_id: 0,
        }
    }
}

impl Draft for UserUpdateDraft {
    type Payload = UserUpdateRequest;

    fn stamp_actor(&mut self, actor_id: i64) {
        self.updated_by_id = actor_id;
    }

    fn validate(&self) -> Result<UserUpdateRequest, FieldErrors> {
        let mut checks = Checks::new();
        let id = checks.positive("id", self.id, "ID must be a positive number");
        let account = check_account(&mut checks, &self.username, &self.email, &self.password, &self.role_ids);
        let status = checks.choice::<UserStatus>("status", &self.status);
        let updated_by_id =
            checks.positive("updatedById", self.updated_by_id, "UpdatedById must be a positive number");

        let errors = checks.finish();
        match status {
            Some(status) if errors.is_empty() => Ok(UserUpdateRequest {
                id,
                username: account.username,
                email: account.email,
                password: account.password,
                role_ids: account.role_ids,
                status,
                updated_by_id,
            }),
            _ => Err(errors),
        }
    }
}

impl UpdateDraft for UserUpdateDraft {
    fn target_id(&self) -> i64 {
        self.id
    }
}

struct Account {
    username: String,
    email: String,
    password: String,
    role_ids: Vec<i64>,
}

fn check_account(checks: &mut Checks, username: &str, email: &str, password: &str, role_ids: &[i64]) -> Account {
    Account {
        username: checks.required("username", username, "Username is required"),
        email: checks.email("email", email, "Invalid email address"),
        password: checks.min_chars(
            "password",
            password,
            MIN_PASSWORD_CHARS,
            "Password must be at least 6 characters long",
        ),
        role_ids: checks.all_positive("roleIds", role_ids, "Role ID must be a positive integer"),
    }
}

/// Check a user the server sent back, including its embedded roles.
pub fn validate_user(user: &User) -> Result<(), FieldErrors> {
    let mut checks = Checks::new();
    checks.positive("id", user.id, "ID must be a positive number");
    checks.required("username", &user.username, "Username is required");
    checks.email("email", &user.email, "Invalid email address");
    checks.date_time("createdAt", &user.created_at, "Invalid date-time format for createdAt");
    checks.date_time("updatedAt", &user.updated_at, "Invalid date-time format for updatedAt");
    checks.optional_positive("createdById", user.created_by_id, "CreatedById must be a positive number");
    checks.optional_positive("updatedById", user.updated_by_id, "UpdatedById must be a positive number");
    for role in &user.roles {
        if let Err(errors) = validate_role(role) {
            checks.fail("roles", format!("Role {}: {errors}", role.id));
        }
    }

    let errors = checks.finish();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn default_draft_is_valid_once_stamped() {
        let mut draft = UserCreateDraft::default();
        draft.stamp_actor(1);
        let payload = draft.validate().unwrap();
        assert_eq!(payload.status, UserStatus::Active);
        assert_eq!(payload.created_by_id, 1);
    }

    #[test]
    fn create_reports_all_violations() {
        let draft = UserCreateDraft {
            username: " ".into(),
            email: "not-an-email".into(),
            password: "12345".into(),
            role_ids: vec![2, 0],
            status: "SUSPENDED".into(),
            created_by_id: 1,
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["email", "password", "roleIds", "status", "username"]
        );
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters long"));
    }

    #[test]
    fn update_draft_from_record_keeps_role_ids() {
        let user = User {
            id: 12,
            username: "grace".into(),
            password: Some("hopper1".into()),
            email: "grace@example.com".into(),
            roles: vec![Role {
                id: 2,
                name: "ROLE_USER".into(),
                description: None,
                created_at: String::new(),
                updated_at: String::new(),
                created_by_id: None,
                updated_by_id: None,
            }],
            status: UserStatus::Inactive,
            created_at: String::new(),
            updated_at: String::new(),
            created_by_id: None,
            updated_by_id: None,
        };

        let mut draft = UserUpdateDraft::from(&user);
        draft.stamp_actor(1);
        let payload = draft.validate().unwrap();
        assert_eq!(payload.id, 12);
        assert_eq!(payload.role_ids, vec![2]);
        assert_eq!(payload.status, UserStatus::Inactive);
    }

    #[test]
    fn retrieved_user_with_bad_role_is_flagged() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 5,
            "username": "linus",
            "email": "linus@example.com",
            "status": "ACTIVE",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "roles": [{ "id": 1, "name": "", "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z" }]
        }))
        .unwrap();

        let errors = validate_user(&user).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["roles"]);
    }
}
