use thiserror::Error;

use crate::{field_errors::FieldErrors, store::error::StoreError};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no form is open")]
    NoForm,
    #[error("{0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which modal a successful submission closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Created,
    Updated,
    Deleted,
}

impl Submitted {
    /// Creates and updates are followed by a re-fetch; deletes only patch the cache.
    pub fn needs_refetch(self) -> bool {
        !matches!(self, Submitted::Deleted)
    }
}
