use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("document name must not be empty")]
    EmptyDocumentName,
    #[error("unknown sort key '{0}' (expected name, date or size)")]
    UnknownSortKey(String),
    #[error("invalid backend base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
