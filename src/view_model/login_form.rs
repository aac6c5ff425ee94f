use thiserror::Error;

use crate::{
    api::{client::ApiClient, error::ApiError},
    context::Session,
    credential::Credential,
    field_errors::FieldErrors,
    profile::Profile,
    screen::Screen,
    vault::VaultError,
};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error("invalid credentials: {0}")]
    Rejected(#[from] ApiError),
    #[error(transparent)]
    Vault(#[from] VaultError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub profile: Profile,
    pub credential: Credential,
    pub landing: Screen,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm { username: username.into(), password: password.into() }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.is_empty() {
            errors.insert("username", "Please enter both username and password.");
        }
        if self.password.is_empty() {
            errors.insert("password", "Please enter both username and password.");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Authenticate, then keep the derived credential in `session`.
    pub async fn submit(&self, api: &ApiClient, session: &Session) -> Result<LoginOutcome, LoginError> {
        self.validate().map_err(LoginError::Invalid)?;

        let profile = api.login(&self.username, &self.password).await.map_err(|e| {
            tracing::warn!(username = %self.username, error = %e, "login rejected");
            e
        })?;
        let credential = Credential::derive(&self.username, &self.password);
        session.set_credential(credential.clone())?;

        let landing = Screen::landing_for(&profile);
        tracing::info!(username = %profile.username, landing = landing.path(), "signed in");
        Ok(LoginOutcome { profile, credential, landing })
    }
}

pub fn logout(session: &Session) -> Result<(), VaultError> {
    session.clear_credential()?;
    tracing::info!("signed out");
    Ok(())
}
