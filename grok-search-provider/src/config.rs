//! Provider configuration.

use std::fmt;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "grok-4-fast";

/// Environment variable holding the API base URL (e.g. `https://api.x.ai/v1`).
pub const ENV_API_URL: &str = "GROK_API_URL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "GROK_API_KEY";
/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "GROK_MODEL";
/// Environment variable enabling debug diagnostics.
pub const ENV_DEBUG: &str = "GROK_DEBUG";

/// Errors from loading a [`GrokConfig`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable was not set (or was empty).
    #[error("missing required setting {0}")]
    Missing(&'static str),
}

/// Static configuration for a [`Grok`](crate::Grok) client.
///
/// Read-only once the client is built. The API key is redacted from `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct GrokConfig {
    /// API base URL; `/chat/completions` is appended to it.
    pub api_url: String,
    /// Bearer token sent on every request.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Forward diagnostics such as the composed prompt to the caller's
    /// progress handle.
    pub debug_enabled: bool,
}

impl GrokConfig {
    /// Create a configuration with the default model and debug off.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            debug_enabled: false,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Reads [`ENV_API_URL`] and [`ENV_API_KEY`] (required), [`ENV_MODEL`]
    /// (default [`DEFAULT_MODEL`]) and [`ENV_DEBUG`] (default off).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = get(ENV_API_URL).ok_or(ConfigError::Missing(ENV_API_URL))?;
        let api_key = get(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let model = get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.into());
        let debug_enabled = get(ENV_DEBUG).is_some_and(|v| parse_flag(&v));

        Ok(Self {
            api_url,
            api_key,
            model,
            debug_enabled,
        })
    }
}

impl fmt::Debug for GrokConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrokConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("debug_enabled", &self.debug_enabled)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
