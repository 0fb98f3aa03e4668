//! Error types for Action Network API operations.

use thiserror::Error;

/// Errors that can occur during Action Network API operations.
#[derive(Debug, Error)]
pub enum AnError {
    /// Configuration is missing or incomplete.
    #[error("Action Network configuration required: {0}")]
    ConfigMissing(String),

    /// A logical resource name is absent from the discovery document,
    /// under both its bare and `osdi:`-prefixed forms.
    #[error("unknown resource '{0}' in discovery document")]
    UnknownResource(String),

    /// A recurrence period string failed structural parsing.
    #[error("malformed recurrence period '{period}': {reason}")]
    MalformedRecurrence {
        period: String,
        reason: &'static str,
    },

    /// A response violated the API data contract (e.g. a required field
    /// such as `identifiers` is missing).
    #[error("data contract violation: {0}")]
    DataContract(String),

    /// The pagination safety cap was exceeded while following `next` links.
    #[error("pagination exceeded {pages} pages at {url}")]
    PaginationLimit { url: String, pages: u32 },

    /// API request failed with a non-success status.
    #[error("Action Network API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited (the service allows 4 requests per second).
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Result type alias for Action Network operations.
pub type Result<T> = core::result::Result<T, AnError>;
