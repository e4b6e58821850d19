//! Catalog client error types

use thiserror::Error;

/// Errors from a catalog search
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Catalog returned HTTP status {0}")]
    Status(u16),

    /// The response body could not be decoded
    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL could not be parsed
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// An API key is required for the remote catalog
    #[error("Catalog API key is not configured")]
    MissingApiKey,

    /// Deliberate failure from a test catalog
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
