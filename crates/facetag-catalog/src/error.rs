//! Catalog error types.

use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog URI: {0}")]
    InvalidUri(String),

    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::InvalidUri(message.into())
    }

    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed(message.into())
    }
}
