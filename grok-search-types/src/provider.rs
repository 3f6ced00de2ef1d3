//! The [`SearchProvider`] trait.
//!
//! The trait uses RPITIT (return-position `impl Trait` in traits) and is
//! intentionally NOT object-safe. Callers that need to pick a provider at
//! runtime should be generic over `P: SearchProvider`.

use std::future::Future;

use crate::error::ProviderError;
use crate::progress::Progress;
use crate::request::SearchRequest;

/// A backend that answers web searches and page fetches with model-written text.
///
/// Both operations resolve to a plain text/markdown string. An empty string is
/// a valid answer, not an error. Errors are reserved for transport failures
/// (connection, status, timeout); see [`ProviderError`].
pub trait SearchProvider: Send + Sync {
    /// Human-readable provider name (e.g. `"Grok"`).
    fn name(&self) -> &str;

    /// Run a web search and return the model's answer.
    fn search(
        &self,
        request: SearchRequest,
        progress: Option<&dyn Progress>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;

    /// Fetch a URL and return its content as structured markdown.
    fn fetch(
        &self,
        url: &str,
        progress: Option<&dyn Progress>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}
