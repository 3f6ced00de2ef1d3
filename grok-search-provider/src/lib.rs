#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod client;
pub mod config;
pub(crate) mod error;
pub mod prompt;
pub mod streaming;
pub mod types;

pub use client::{Grok, Timeouts};
pub use config::{ConfigError, GrokConfig};
pub use streaming::{ContentOrigin, Reassembled, Reassembler};

// Re-export grok-search-types for convenience
pub use grok_search_types::{Progress, ProviderError, SearchProvider, SearchRequest};
