use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::{
    app_state::SharedState,
    context::Session,
    gate::{credential_cookie, credential_from_jar, expired_credential_cookie},
    login_form::{LoginError, LoginForm},
    login_request::LoginRequest,
    login_response::LoginResponse,
    signup_form::{SignupError, SignupForm},
};

pub struct AuthenticationController {}

impl AuthenticationController {
    /// Where the gate sends requests that carry no credential.
    pub async fn landing() -> Json<Value> {
        Json(json!({ "login": "/login", "signup": "/signup" }))
    }

    pub async fn login(
        State(state): State<SharedState>,
        jar: CookieJar,
        Json(payload): Json<LoginRequest>,
    ) -> Result<(CookieJar, Json<LoginResponse>), (StatusCode, String)> {
        let session = Session::in_memory();
        let outcome = LoginForm::new(payload.username, payload.password)
            .submit(&state.api, &session)
            .await
            .map_err(|e| match e {
                LoginError::Invalid(errors) => (StatusCode::BAD_REQUEST, errors.to_string()),
                LoginError::Rejected(_) => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials. Please try again.".to_string())
                }
                LoginError::Vault(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            })?;

        state.remember_profile(&outcome.credential, outcome.profile.clone());
        Ok((
            jar.add(credential_cookie(&outcome.credential)),
            Json(LoginResponse { profile: outcome.profile, landing: outcome.landing.path().to_string() }),
        ))
    }

    pub async fn logout(State(state): State<SharedState>, jar: CookieJar) -> (StatusCode, CookieJar) {
        if let Some(credential) = credential_from_jar(&jar) {
            state.forget_profile(&credential);
        }
        (StatusCode::OK, jar.add(expired_credential_cookie()))
    }

    pub async fn signup(
        State(state): State<SharedState>,
        Json(form): Json<SignupForm>,
    ) -> Result<StatusCode, (StatusCode, String)> {
        match form.submit(&state.api).await {
            Ok(_) => Ok(StatusCode::CREATED),
            Err(SignupError::Invalid(errors)) => Err((StatusCode::BAD_REQUEST, errors.to_string())),
            Err(SignupError::Api(e)) => Err((StatusCode::BAD_GATEWAY, e.to_string())),
        }
    }
}
