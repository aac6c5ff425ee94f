use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use super::{credential::Credential, vault::VaultError};

/// How long a freshly set credential stays valid.
pub fn credential_ttl() -> Duration {
    Duration::days(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredCredential {
    pub credential: Credential,
    pub expires_at: DateTime<Utc>,
}

impl StoredCredential {
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Where the session keeps its credential between requests.
pub trait CredentialSlot: Send + Sync {
    fn store(&self, stored: StoredCredential) -> Result<(), VaultError>;
    fn load(&self) -> Result<Option<StoredCredential>, VaultError>;
    fn erase(&self) -> Result<(), VaultError>;
}

/// Process-local slot.
#[derive(Debug, Default)]
pub struct MemorySlot {
    stored: RwLock<Option<StoredCredential>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialSlot for MemorySlot {
    fn store(&self, stored: StoredCredential) -> Result<(), VaultError> {
        *self.stored.write().unwrap_or_else(PoisonError::into_inner) = Some(stored);
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredCredential>, VaultError> {
        Ok(self.stored.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn erase(&self) -> Result<(), VaultError> {
        *self.stored.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
