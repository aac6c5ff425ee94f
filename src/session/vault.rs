//! Credential ↔ redb persistence.
//!
//! One table, one row. The record is postcard-encoded and carries its own
//! expiry, so a stale credential survives on disk but never reads back.

use std::{path::Path, sync::Arc};

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    credential::Credential,
    slot::{CredentialSlot, StoredCredential},
};

const CREDENTIALS: TableDefinition<&str, &[u8]> = TableDefinition::new("credentials");
const CREDENTIAL_KEY: &str = "authToken";

#[derive(Serialize, Deserialize)]
struct VaultRecord {
    token: String,
    expires_at: i64,
}

/// Persisted credential slot. Cloneable (Arc inside).
#[derive(Clone)]
pub struct VaultSlot {
    db: Arc<Database>,
    path: String,
}

impl VaultSlot {
    /// Open (or create) the vault file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VaultError> {
        let path = path.as_ref();
        let db = create_with_table(path)
            .map_err(|e| VaultError::Open { path: path.display().to_string(), reason: e.to_string() })?;
        Ok(VaultSlot { db: Arc::new(db), path: path.display().to_string() })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn corrupt(&self, reason: impl ToString) -> VaultError {
        VaultError::Decode { path: self.path.clone(), reason: reason.to_string() }
    }
}

fn create_with_table(path: &Path) -> Result<Database, VaultError> {
    let db = Database::create(path)?;

    let txn = db.begin_write()?;
    {
        let _ = txn.open_table(CREDENTIALS)?;
    }
    txn.commit()?;
    Ok(db)
}

impl CredentialSlot for VaultSlot {
    fn store(&self, stored: StoredCredential) -> Result<(), VaultError> {
        let record = VaultRecord {
            token: stored.credential.token().to_string(),
            expires_at: stored.expires_at.timestamp(),
        };
        let bytes = postcard::to_allocvec(&record).map_err(|e| VaultError::Encode(e.to_string()))?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CREDENTIALS)?;
            table.insert(CREDENTIAL_KEY, bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredCredential>, VaultError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(CREDENTIALS)?;
        let Some(value) = table.get(CREDENTIAL_KEY)? else {
            return Ok(None);
        };

        let record: VaultRecord = postcard::from_bytes(value.value()).map_err(|e| self.corrupt(e))?;
        let expires_at = DateTime::<Utc>::from_timestamp(record.expires_at, 0)
            .ok_or_else(|| self.corrupt(format!("expiry out of range: {}", record.expires_at)))?;

        Ok(Some(StoredCredential {
            credential: Credential::from_token(record.token),
            expires_at,
        }))
    }

    fn erase(&self) -> Result<(), VaultError> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(CREDENTIALS)?;
            table.remove(CREDENTIAL_KEY)?;
        }
        txn.commit()?;
        Ok(())
    }
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("cannot open vault {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("redb: {0}")]
    Redb(String),
    #[error("unreadable credential in {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("encode: {0}")]
    Encode(String),
}

// redb 2.x has many error types. Blanket them all into VaultError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for VaultError {
            fn from(e: $t) -> Self { VaultError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

// ── Tests ──────────────────────────────────────────────────────
