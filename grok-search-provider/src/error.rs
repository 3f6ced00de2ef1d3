//! Internal error helpers for mapping HTTP/reqwest errors to [`ProviderError`].

use std::time::Duration;

use grok_search_types::ProviderError;

use crate::client::Timeouts;

/// Map a non-success HTTP status from the Chat Completions API to a [`ProviderError`].
///
/// `retry_after` is the raw `Retry-After` header, if the response carried one.
pub(crate) fn map_http_status(
    status: reqwest::StatusCode,
    body: &str,
    retry_after: Option<&str>,
) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Authentication(body.to_string()),
        400 => ProviderError::InvalidRequest(body.to_string()),
        404 => ProviderError::ModelNotFound(body.to_string()),
        429 => ProviderError::RateLimit {
            retry_after: retry_after
                .and_then(parse_retry_after_header)
                .or_else(|| parse_retry_after_body(body)),
        },
        500..=599 => ProviderError::ServiceUnavailable(body.to_string()),
        code => ProviderError::Http {
            status: code,
            body: body.to_string(),
        },
    }
}

/// Parse a `Retry-After` header given in delta-seconds.
///
/// The HTTP-date form is not supported and yields `None`.
fn parse_retry_after_header(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Best-effort parse of "retry after N" from an error body.
fn parse_retry_after_body(body: &str) -> Option<Duration> {
    let lower = body.to_lowercase();
    let idx = lower.find("retry after ")?;
    let after = &lower[idx + "retry after ".len()..];
    let num_str: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
    num_str.parse::<u64>().ok().map(Duration::from_secs)
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
///
/// Timeouts report the budget that was exceeded: the connect budget when the
/// connection could not be established, otherwise the read budget.
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeouts: &Timeouts) -> ProviderError {
    if err.is_timeout() {
        if err.is_connect() {
            ProviderError::Timeout(timeouts.connect)
        } else {
            ProviderError::Timeout(timeouts.read)
        }
    } else {
        ProviderError::Network(Box::new(err))
    }
}
