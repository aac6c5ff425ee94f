use super::{
    checks::{optional_text, Checks},
    draft::{Draft, UpdateDraft},
    field_errors::FieldErrors,
};
use crate::{role::Role, role_create_request::RoleCreateRequest, role_update_request::RoleUpdateRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct RoleCreateDraft {
    pub name: String,
    pub description: String,
    pub created_by_id: i64,
}

impl Default for RoleCreateDraft {
    fn default() -> Self {
        Self {
            name: "New Role".to_string(),
            description: "Role description".to_string(),
            created_by_id: 0,
        }
    }
}

impl Draft for RoleCreateDraft {
    type Payload = RoleCreateRequest;

    fn stamp_actor(&mut self, actor_id: i64) {
        self.created_by_id = actor_id;
    }

    fn validate(&self) -> Result<RoleCreateRequest, FieldErrors> {
        let mut checks = Checks::new();
        let name = checks.required("name", &self.name, "Name is required");
        let created_by_id =
            checks.positive("createdById", self.created_by_id, "CreatedById must be a positive number");

        let errors = checks.finish();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RoleCreateRequest {
            name,
            description: optional_text(Some(&self.description)),
            created_by_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleUpdateDraft {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub updated_by_id: i64,
}

impl From<&Role> for RoleUpdateDraft {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            updated_by_id: 0,
        }
    }
}

impl Draft for RoleUpdateDraft {
    type Payload = RoleUpdateRequest;

    fn stamp_actor(&mut self, actor_id: i64) {
        self.updated_by_id = actor_id;
    }

    fn validate(&self) -> Result<RoleUpdateRequest, FieldErrors> {
        let mut checks = Checks::new();
        let id = checks.positive("id", self.id, "ID must be a positive number");
        let name = checks.required("name", &self.name, "Name is required");
        let updated_by_id =
            checks.positive("updatedById", self.updated_by_id, "UpdatedById must be a positive number");

        let errors = checks.finish();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RoleUpdateRequest {
            id,
            name,
            description: optional_text(Some(&self.description)),
            updated_by_id,
        })
    }
}

impl UpdateDraft for RoleUpdateDraft {
    fn target_id(&self) -> i64 {
        self.id
    }
}

/// Check a role the server sent back.
pub fn validate_role(role: &Role) -> Result<(), FieldErrors> {
    let mut checks = Checks::new();
    checks.positive("id", role.id, "ID must be a positive number");
    checks.required("name", &role.name, "Name is required");
    checks.date_time("createdAt", &role.created_at, "Invalid date-time format for createdAt");
    checks.date_time("updatedAt", &role.updated_at, "Invalid date-time format for updatedAt");

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

    fn role() -> Role {
        Role {
            id: 3,
            name: "Auditor".into(),
            description: None,
            created_at: "2024-05-01T08:00:00Z".into(),
            updated_at: "2024-05-02T08:00:00Z".into(),
            created_by_id: Some(1),
            updated_by_id: Some(1),
        }
    }

    #[test]
    fn create_normalizes_text() {
        let mut draft = RoleCreateDraft {
            name: "  Auditor ".into(),
            description: "   ".into(),
            created_by_id: 0,
        };
        draft.stamp_actor(4);

        let payload = draft.validate().unwrap();
        assert_eq!(payload.name, "Auditor");
        assert_eq!(payload.description, None);
        assert_eq!(payload.created_by_id, 4);
    }

    #[test]
    fn unstamped_create_is_rejected() {
        let errors = RoleCreateDraft::default().validate().unwrap_err();
        assert_eq!(errors.get("createdById"), Some("CreatedById must be a positive number"));
    }

    #[test]
    fn update_reports_every_field() {
        let draft = RoleUpdateDraft { id: 0, name: String::new(), description: String::new(), updated_by_id: -1 };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["id", "name", "updatedById"]);
    }

    #[test]
    fn update_draft_copies_record() {
        let mut role = role();
        role.description = Some("Read-only access".into());
        let mut draft = RoleUpdateDraft::from(&role);
        draft.stamp_actor(9);

        let payload = draft.validate().unwrap();
        assert_eq!(payload.id, 3);
        assert_eq!(payload.description.as_deref(), Some("Read-only access"));
        assert_eq!(payload.updated_by_id, 9);
    }

    #[test]
    fn retrieved_role_checks_timestamps() {
        assert!(validate_role(&role()).is_ok());

        let mut broken = role();
        broken.updated_at = "yesterday".into();
        let errors = validate_role(&broken).unwrap_err();
        assert_eq!(errors.get("updatedAt"), Some("Invalid date-time format for updatedAt"));
    }
}
