use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{app_state::SharedState, credential::Credential, settings::Settings, slot::credential_ttl};

/// Cookie the dashboard service keeps the credential token in.
pub const CREDENTIAL_COOKIE: &str = "authToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

/// Per-request check that a credential is present on protected paths.
///
/// Presence is all it checks: the token is neither verified nor decoded,
/// and roles play no part.
#[derive(Debug, Clone)]
pub struct SessionGate {
    protected: Vec<String>,
    landing: String,
}

impl SessionGate {
    pub fn new(protected: Vec<String>, landing: impl Into<String>) -> Self {
        let protected = protected.into_iter().map(|prefix| prefix.trim_end_matches('/').to_string()).collect();
        SessionGate { protected, landing: landing.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.protected_prefixes.clone(), settings.landing_path.clone())
    }

    pub fn landing(&self) -> &str {
        &self.landing
    }

    /// `/example` covers `/example` and `/example/...`, not `/examples`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| match path.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        })
    }

    pub fn decide(&self, path: &str, credential: Option<&Credential>) -> GateDecision {
        if credential.is_none() && self.is_protected(path) {
            GateDecision::Redirect(self.landing.clone())
        } else {
            GateDecision::Allow
        }
    }
}

/// The non-empty `authToken` cookie in `jar`, with RFC 6265 quotes removed.
pub fn credential_from_jar(jar: &CookieJar) -> Option<Credential> {
    jar.get(CREDENTIAL_COOKIE)
        .map(|cookie| cookie.value_trimmed())
        .filter(|token| !token.is_empty())
        .map(Credential::from_token)
}

pub fn credential_from_headers(headers: &HeaderMap) -> Option<Credential> {
    credential_from_jar(&CookieJar::from_headers(headers))
}

/// The day-long cookie handed out at login.
pub fn credential_cookie(credential: &Credential) -> Cookie<'static> {
    Cookie::build((CREDENTIAL_COOKIE, credential.token().to_string()))
        .path("/")
        .max_age(cookie::time::Duration::seconds(credential_ttl().num_seconds()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Overwrites the credential cookie with an already expired one.
pub fn expired_credential_cookie() -> Cookie<'static> {
    Cookie::build((CREDENTIAL_COOKIE, ""))
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn session_gate(State(state): State<SharedState>, mut request: Request<Body>, next: Next) -> Response {
    let credential = credential_from_headers(request.headers());
    match state.gate.decide(request.uri().path(), credential.as_ref()) {
        GateDecision::Allow => {
            if let Some(credential) = credential {
                request.extensions_mut().insert(credential);
            }
            next.run(request).await
        }
        GateDecision::Redirect(to) => {
            tracing::debug!(path = %request.uri().path(), to = %to, "no credential, redirecting");
            Redirect::temporary(&to).into_response()
        }
    }
}
