use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    api::{client::ApiClient, error::ApiError},
    credential::Credential,
    gate::SessionGate,
    profile::Profile,
    settings::Settings,
};

pub struct AppState {
    pub api: ApiClient,
    pub gate: SessionGate,
    // Keyed by credential token.
    profiles: RwLock<HashMap<String, Profile>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(api: ApiClient, gate: SessionGate) -> Self {
        AppState { api, gate, profiles: RwLock::new(HashMap::new()) }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ApiClient::new(settings.api_base_url.clone()), SessionGate::from_settings(settings))
    }

    pub fn remember_profile(&self, credential: &Credential, profile: Profile) {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(credential.token().to_string(), profile);
    }

    pub fn forget_profile(&self, credential: &Credential) {
        self.profiles.write().unwrap_or_else(PoisonError::into_inner).remove(credential.token());
    }

    /// The profile behind `credential`: from the cache, or by logging in
    /// again with the pair the token encodes (e.g. after a restart).
    pub async fn profile_for(&self, credential: &Credential) -> Result<Option<Profile>, ApiError> {
        let cached = self.profiles.read().unwrap_or_else(PoisonError::into_inner).get(credential.token()).cloned();
        if cached.is_some() {
            return Ok(cached);
        }

        let Some((username, password)) = credential.decode() else {
            return Ok(None);
        };
        let profile = self.api.login(&username, &password).await?;
        self.remember_profile(credential, profile.clone());
        Ok(Some(profile))
    }
}
