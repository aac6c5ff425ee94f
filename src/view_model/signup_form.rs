use serde::Deserialize;
use thiserror::Error;

use crate::{
    api::{client::ApiClient, error::ApiError},
    choice::Choice,
    draft::Draft,
    field_errors::FieldErrors,
    user_create_request::UserCreateRequest,
    user_schema::UserCreateDraft,
    user_status::UserStatus,
};

/// Role granted to self-registered accounts.
pub const DEFAULT_ROLE_ID: i64 = 2;
/// Recorded as the creator of self-registered accounts.
pub const SIGNUP_CREATOR_ID: i64 = 1;

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("failed to create account: {0}")]
    Api(#[from] ApiError),
}

/// The public "create account" form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agreed_to_privacy: bool,
}

impl SignupForm {
    /// Build the account payload. The username is the part of the email
    /// before `@`.
    pub fn validate(&self) -> Result<UserCreateRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }
        if !self.agreed_to_privacy {
            errors.insert("privacyPolicy", "You must agree to the privacy policy");
        }

        let draft = UserCreateDraft {
            username: self.email.split('@').next().unwrap_or_default().to_string(),
            email: self.email.clone(),
            password: self.password.clone(),
            role_ids: vec![DEFAULT_ROLE_ID],
            status: UserStatus::Active.as_str().to_string(),
            created_by_id: SIGNUP_CREATOR_ID,
        };
        match draft.validate() {
            Ok(account) if errors.is_empty() => Ok(account),
            Ok(_) => Err(errors),
            Err(schema) => {
                errors.merge(schema);
                Err(errors)
            }
        }
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<UserCreateRequest, SignupError> {
        let account = self.validate().map_err(SignupError::Invalid)?;
        api.signup(&account).await.map_err(|e| {
            tracing::error!(email = %account.email, error = %e, "account creation failed");
            e
        })?;
        tracing::info!(username = %account.username, "account created");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    fn form() -> SignupForm {
        SignupForm {
            email: "grace@navy.mil".into(),
            password: "cobol1959".into(),
            confirm_password: "cobol1959".into(),
            agreed_to_privacy: true,
        }
    }

    #[test]
    fn mismatch_and_missing_agreement() {
        let mut form = form();
        form.confirm_password = "fortran".into();
        form.agreed_to_privacy = false;
        form.email = "grace".into();

        let errors = form.validate().unwrap_err();
        assert!(errors.contains("confirmPassword"));
        assert!(errors.contains("privacyPolicy"));
        assert!(errors.contains("email"));
    }

    #[tokio::test]
    async fn posts_defaults_to_signup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .and(body_json(json!({
                "username": "grace",
                "email": "grace@navy.mil",
                "password": "cobol1959",
                "roleIds": [2],
                "status": "ACTIVE",
                "createdById": 1
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let account = form().submit(&ApiClient::new(server.uri())).await.unwrap();
        assert_eq!(account.username, "grace");
    }
}
