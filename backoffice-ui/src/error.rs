//! Error types

use std::time::Duration;

/// Errors parsing or rendering `:name` templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A required placeholder does not appear in the template.
    #[error("template {template:?} is missing the :{name} placeholder")]
    MissingPlaceholder { template: String, name: String },

    /// Rendering found a placeholder with no value.
    #[error("no value bound for :{0}")]
    Unbound(String),
}

/// Errors delivering an order change to the backend.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid base URL or callback path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// Errors from the tag editor.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// The seed value is not a JSON array of strings.
    #[error("invalid tag list: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors from upload validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// File is larger than the configured maximum.
    #[error("file is too large ({size} bytes, maximum is {max} bytes)")]
    TooLarge { size: u64, max: u64 },

    /// Upload was started twice.
    #[error("an upload is already in progress")]
    InProgress,
}
