use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    credential::Credential,
    slot::{credential_ttl, CredentialSlot, MemorySlot, StoredCredential},
    vault::{VaultError, VaultSlot},
};
use crate::settings::Settings;

/// The session handed to every store.
///
/// Cheap to clone; clones share one slot.
#[derive(Clone)]
pub struct Session {
    slot: Arc<dyn CredentialSlot>,
}

impl Session {
    pub fn new(slot: Arc<dyn CredentialSlot>) -> Self {
        Session { slot }
    }

    pub fn in_memory() -> Self {
        Session::new(Arc::new(MemorySlot::new()))
    }

    /// Backed by the vault file named in `settings`, or by memory when none
    /// is configured. The dashboard service itself builds a memory session
    /// per request from the cookie; this is for long-lived clients.
    pub fn from_settings(settings: &Settings) -> Result<Self, VaultError> {
        match &settings.vault_path {
            Some(path) => Ok(Session::new(Arc::new(VaultSlot::open(path)?))),
            None => Ok(Session::in_memory()),
        }
    }

    /// A memory-backed session already holding `credential`.
    pub fn with_credential(credential: Credential) -> Self {
        let session = Session::in_memory();
        // A memory slot cannot fail.
        let _ = session.set_credential(credential);
        session
    }

    /// Store `credential` for one day from now.
    pub fn set_credential(&self, credential: Credential) -> Result<(), VaultError> {
        self.set_credential_until(credential, Utc::now() + credential_ttl())
    }

    pub fn set_credential_until(&self, credential: Credential, expires_at: DateTime<Utc>) -> Result<(), VaultError> {
        self.slot.store(StoredCredential { credential, expires_at })
    }

    /// The live credential, if any. Expired or unreadable counts as absent.
    pub fn credential(&self) -> Option<Credential> {
        match self.slot.load() {
            Ok(Some(stored)) if stored.is_live_at(Utc::now()) => Some(stored.credential),
            Ok(_) => None,
            Err(e) => {
                tracing::error!(error = %e, "cannot read session credential");
                None
            }
        }
    }

    pub fn clear_credential(&self) -> Result<(), VaultError> {
        self.slot.erase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }
}
