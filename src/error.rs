//! Error types for graphsync.

use thiserror::Error;

/// Entity validation errors, raised at construction and serialization boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Invalid meta-list name ({name}), must start with: {prefix}")]
    InvalidMetaListName { name: String, prefix: &'static str },

    #[error("Meta-list '{0}' has no lists set")]
    EmptyMetaList(String),

    #[error("Invalid list ({0}) conflicts with meta-list requirements")]
    ListNameIsMetaList(String),

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Name '{0}' is used by both a list and a meta-list")]
    NamespaceCollision(String),
}

/// Failures reported by the remote account API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("Remote rejected request: {0}")]
    Rejected(String),

    #[error("Remote resource not found: {0}")]
    NotFound(String),

    #[error("Remote authentication failed: {0}")]
    AuthFailed(String),

    #[error("Remote rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Remote request failed: {0}")]
    RequestFailed(String),

    #[error("Remote response could not be decoded: {0}")]
    InvalidResponse(String),
}

/// Top-level error for graphsync operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ModelError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Error reading account data from {path}: {message}")]
    Document { path: String, message: String },

    #[error("List '{0}' has no remote id")]
    MissingRemoteId(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
