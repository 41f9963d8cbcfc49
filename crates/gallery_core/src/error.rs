use shared::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend answered {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("failed to decode document list from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document '{0}' is not in the gallery")]
    UnknownDocument(String),
    #[error("host platform could not {action} '{name}': {reason}")]
    Platform {
        action: &'static str,
        name: String,
        reason: String,
    },
}

pub type GalleryResult<T> = Result<T, GalleryError>;
