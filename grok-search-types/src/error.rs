//! Error types for search providers.

use std::time::Duration;

/// Errors from search provider calls.
///
/// Every variant is a transport-level failure: the request never produced a
/// usable response body. Malformed stream fragments are not errors and never
/// show up here.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    // Retryable errors
    /// Network-level error (connection refused, DNS failure, reset mid-body).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Rate limited by the provider.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimit {
        /// Suggested retry delay, if provided by the API.
        retry_after: Option<Duration>,
    },
    /// A connect, read, or write budget was exceeded.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// Provider service is temporarily unavailable (5xx).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    // Terminal errors
    /// Authentication/authorization failure.
    #[error("authentication failed: {0}")]
    Authentication(String),
    /// Malformed or invalid request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Requested model does not exist.
    #[error("model not found: {0}")]
    ModelNotFound(String),
    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Numeric status code.
        status: u16,
        /// Response body, as returned by the server.
        body: String,
    },

    // Catch-all
    /// Any other provider error.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Whether this error is likely transient and the request could be retried.
    ///
    /// Providers in this workspace never retry on their own; this is a hint for
    /// callers that want to.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::RateLimit { .. }
                | Self::Timeout(_)
                | Self::ServiceUnavailable(_)
        )
    }
}
