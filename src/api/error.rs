use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response, or the body did not decode.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("{method} {path} rejected with status {status}")]
    Rejected {
        method: &'static str,
        path: String,
        status: u16,
    },
}
