//! Grok API client struct and builder.

use std::future::Future;
use std::time::Duration;

use grok_search_types::{Progress, ProviderError, SearchProvider, SearchRequest};
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};

use crate::config::{ConfigError, GrokConfig};
use crate::error::{map_http_status, map_reqwest_error};
use crate::prompt::{fetch_request, search_request};
use crate::streaming::{ContentOrigin, body_lines, reassemble};
use crate::types::ChatRequest;

/// Name reported by [`SearchProvider::name`].
const PROVIDER_NAME: &str = "Grok";

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Independent time budgets for one HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Budget for establishing the connection (TCP + TLS).
    pub connect: Duration,
    /// Budget for each read: waiting for response headers and for every body chunk.
    pub read: Duration,
    /// Budget for writing the request body.
    ///
    /// Not enforced on its own: it only widens the ceiling on the whole send
    /// phase (see `send_budget`), so a stalled upload fails after
    /// connect + write + read rather than after `write`.
    pub write: Duration,
}

impl Timeouts {
    /// Budgets for streamed searches: connect 6s, read 50s, write 10s.
    pub const SEARCH: Self = Self {
        connect: Duration::from_secs(6),
        read: Duration::from_secs(50),
        write: Duration::from_secs(10),
    };

    /// Budgets for page fetches: connect 6s, read 120s, write 10s.
    pub const FETCH: Self = Self {
        connect: Duration::from_secs(6),
        read: Duration::from_secs(120),
        write: Duration::from_secs(10),
    };

    /// Ceiling on the send phase (connect, write the body, receive headers).
    ///
    /// reqwest enforces the connect and read budgets itself but has no
    /// write-phase timeout, so the whole send is bounded by the sum.
    pub(crate) fn send_budget(&self) -> Duration {
        self.connect + self.write + self.read
    }

    /// Build a one-shot HTTP client honoring these budgets.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, ProviderError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect)
            .read_timeout(self.read)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| ProviderError::Other(Box::new(e)))
    }
}

/// Client for Grok's Chat Completions API, used as a search/fetch backend.
///
/// Implements [`SearchProvider`]. The configuration is read-only after
/// construction, so one client can serve concurrent calls. Each call opens its
/// own connection; dropping the call's future closes it.
///
/// # Example
///
/// ```no_run
/// use grok_search_provider::{Grok, Timeouts};
///
/// let client = Grok::new("https://api.x.ai/v1", "xai-...")
///     .model("grok-4-fast")
///     .fetch_timeouts(Timeouts::FETCH);
/// ```
#[derive(Debug, Clone)]
pub struct Grok {
    pub(crate) config: GrokConfig,
    pub(crate) search_timeouts: Timeouts,
    pub(crate) fetch_timeouts: Timeouts,
}

impl Grok {
    /// Create a client for the given API base URL and key.
    ///
    /// Default model: `grok-4-fast`. Debug diagnostics off.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::from_config(GrokConfig::new(api_url, api_key))
    }

    /// Create a client from a prepared configuration.
    pub fn from_config(config: GrokConfig) -> Self {
        Self {
            config,
            search_timeouts: Timeouts::SEARCH,
            fetch_timeouts: Timeouts::FETCH,
        }
    }

    /// Create a client from `GROK_*` environment variables.
    ///
    /// See [`GrokConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        GrokConfig::from_env().map(Self::from_config)
    }

    /// Override the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Forward diagnostics (such as the composed prompt) to progress handles.
    #[must_use]
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug_enabled = enabled;
        self
    }

    /// Override the time budgets used by [`SearchProvider::search`].
    #[must_use]
    pub fn search_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.search_timeouts = timeouts;
        self
    }

    /// Override the time budgets used by [`SearchProvider::fetch`].
    #[must_use]
    pub fn fetch_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.fetch_timeouts = timeouts;
        self
    }

    /// The client's configuration.
    pub fn config(&self) -> &GrokConfig {
        &self.config
    }

    /// Build the chat completions endpoint URL.
    pub(crate) fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        )
    }

    /// Send a diagnostic to the caller's progress handle when debug is on.
    async fn report(&self, progress: Option<&dyn Progress>, message: &str) {
        if !self.config.debug_enabled {
            return;
        }
        if let Some(progress) = progress {
            progress.info(message).await;
        }
    }

    /// POST one chat request and reassemble the response body into text.
    async fn complete(&self, body: ChatRequest, timeouts: Timeouts) -> Result<String, ProviderError> {
        let url = self.completions_url();
        let http_client = timeouts.http_client()?;

        tracing::debug!(url = %url, model = %body.model, stream = body.stream, "sending chat completion request to Grok");

        let send = http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send();

        let response = tokio::time::timeout(timeouts.send_budget(), send)
            .await
            .map_err(|_| ProviderError::Timeout(timeouts.send_budget()))?
            .map_err(|e| map_reqwest_error(e, &timeouts))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body_text = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, &timeouts))?;
            return Err(map_http_status(status, &body_text, retry_after.as_deref()));
        }

        let lines = body_lines(response.bytes_stream(), timeouts.read, move |e| {
            map_reqwest_error(e, &timeouts)
        });
        let reassembled = reassemble(lines).await?;

        match reassembled.origin {
            ContentOrigin::Unparseable => tracing::warn!(
                url = %url,
                events_dropped = reassembled.events_dropped,
                "response body carried no parseable content"
            ),
            ContentOrigin::Empty => tracing::debug!(
                url = %url,
                events_parsed = reassembled.events_parsed,
                "response carried no content"
            ),
            origin => tracing::debug!(
                url = %url,
                ?origin,
                chars = reassembled.text.chars().count(),
                events_dropped = reassembled.events_dropped,
                "response reassembled"
            ),
        }

        Ok(reassembled.text)
    }
}

impl SearchProvider for Grok {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    /// Stream a web search through the Chat Completions API.
    ///
    /// The composed user prompt is logged at DEBUG and, with debug enabled,
    /// sent to `progress`.
    fn search(
        &self,
        request: SearchRequest,
        progress: Option<&dyn Progress>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        async move {
            let body = search_request(&self.config.model, &request);
            let user_message = body
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();

            tracing::debug!(user_message = %user_message, "composed search prompt");
            self.report(progress, &format!("platform_prompt: {user_message}"))
                .await;

            self.complete(body, self.search_timeouts).await
        }
    }

    /// Ask the model to fetch `url` and return it as structured markdown.
    ///
    /// The request is not streamed; the single JSON body goes through the
    /// reassembler's completion fallback.
    fn fetch(
        &self,
        url: &str,
        progress: Option<&dyn Progress>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        let body = fetch_request(&self.config.model, url);
        let url = url.to_string();

        async move {
            tracing::debug!(target_url = %url, "composed fetch prompt");
            self.report(progress, &format!("fetching: {url}")).await;

            self.complete(body, self.fetch_timeouts).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_set() {
        let client = Grok::new("https://api.x.ai/v1", "test-key");
        assert_eq!(client.config.model, crate::config::DEFAULT_MODEL);
    }

    #[test]
    fn default_timeouts_match_operations() {
        let client = Grok::new("https://api.x.ai/v1", "test-key");
        assert_eq!(client.search_timeouts.read, Duration::from_secs(50));
        assert_eq!(client.fetch_timeouts.read, Duration::from_secs(120));
        assert_eq!(client.search_timeouts.connect, Duration::from_secs(6));
        assert_eq!(client.fetch_timeouts.write, Duration::from_secs(10));
    }

    #[test]
    fn builder_overrides_model_and_debug() {
        let client = Grok::new("u", "k").model("grok-4").debug(true);
        assert_eq!(client.config().model, "grok-4");
        assert!(client.config().debug_enabled);
    }

    #[test]
    fn builder_overrides_timeouts() {
        let short = Timeouts {
            connect: Duration::from_millis(100),
            read: Duration::from_millis(200),
            write: Duration::from_millis(300),
        };
        let client = Grok::new("u", "k").search_timeouts(short).fetch_timeouts(short);
        assert_eq!(client.search_timeouts, short);
        assert_eq!(client.fetch_timeouts, short);
        assert_eq!(short.send_budget(), Duration::from_millis(600));
    }

    #[test]
    fn completions_url_includes_path() {
        let client = Grok::new("http://localhost:9999", "k");
        assert_eq!(
            client.completions_url(),
            "http://localhost:9999/chat/completions"
        );
    }

    #[test]
    fn completions_url_ignores_trailing_slash() {
        let client = Grok::new("https://api.x.ai/v1/", "k");
        assert_eq!(
            client.completions_url(),
            "https://api.x.ai/v1/chat/completions"
        );
    }

    #[test]
    fn provider_name_is_grok() {
        assert_eq!(Grok::new("u", "k").name(), "Grok");
    }

    #[test]
    fn http_client_builds() {
        assert!(Timeouts::SEARCH.http_client().is_ok());
    }
}
