//! Progress handles for surfacing diagnostics to the caller.
//!
//! A provider call optionally receives a `&dyn Progress`. The provider decides
//! what to report (e.g. the composed prompt when debug output is enabled); the
//! handle decides where it goes: an MCP client log, a UI, or `tracing`.

use async_trait::async_trait;

/// Receives progress diagnostics emitted during a provider call.
///
/// Implementations should return quickly. A slow handle delays the call it is
/// attached to.
#[async_trait]
pub trait Progress: Send + Sync {
    /// Report an informational message.
    async fn info(&self, message: &str);
}

/// A [`Progress`] handle that forwards every message to `tracing` at INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

#[async_trait]
impl Progress for TracingProgress {
    async fn info(&self, message: &str) {
        tracing::info!(target: "grok_search::progress", "{message}");
    }
}
