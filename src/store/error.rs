use thiserror::Error;

use crate::api::error::ApiError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no credentials available, log in first")]
    Unauthenticated,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("cannot merge updated {resource} {id}: {source}")]
    Merge {
        resource: &'static str,
        id: i64,
        source: serde_json::Error,
    },
}
