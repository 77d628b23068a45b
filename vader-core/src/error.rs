use thiserror::Error;

/// Failure to turn a provider response body into domain types.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Response body is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl PayloadError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        PayloadError::Malformed(message.into())
    }
}
