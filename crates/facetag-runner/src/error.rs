//! Runner error types.

use thiserror::Error;

pub type RunnerResult<T> = Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Recording line {line} is malformed: {source}")]
    RecordingParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] facetag_catalog::CatalogError),

    #[error("Vision error: {0}")]
    Vision(#[from] facetag_vision::VisionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunnerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
