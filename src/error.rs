//! Error type for gateway operations.
//!
//! Lookup misses ("no such contact", "no such check") are not errors and
//! never appear here; they are returned as `None` by the resolvers.

use thiserror::Error;

/// Failure of a gateway operation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Desired state rejected before any remote call was issued.
    #[error("{0}")]
    InvalidContact(String),

    /// A desired setting the service cannot represent.
    #[error("{0}")]
    InvalidSetting(String),

    /// The URL is not an http(s) URL, so no check can correspond to it.
    #[error("'{0}' is not an http or https URL")]
    UnsupportedUrl(String),

    /// No check is monitoring the URL.
    #[error("no check found for '{0}'")]
    CheckNotFound(String),

    /// The service answered with a body that does not match the expected shape.
    #[error("unexpected response for '{resource}': {source}")]
    UnexpectedResponse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    /// The transport failed or the service rejected the request.
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub type Result<T, E = GatewayError> = std::result::Result<T, E>;
