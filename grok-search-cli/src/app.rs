//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use grok_search_types::{DEFAULT_MAX_RESULTS, DEFAULT_MIN_RESULTS, SearchRequest};

/// Web search and page fetch through Grok.
///
/// Configuration comes from GROK_API_URL, GROK_API_KEY, GROK_MODEL and
/// GROK_DEBUG. Log verbosity follows RUST_LOG (default: warn).
#[derive(Debug, Parser)]
#[command(name = "grok-search", version, about)]
pub struct Cli {
    /// Report the composed prompt and other diagnostics to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the web and print the model's answer
    Search(SearchArgs),
    /// Fetch a page and print it as structured markdown
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// What to search for
    pub query: String,

    /// Platform to focus on (e.g. GitHub, Reddit, Twitter)
    #[arg(long, short)]
    pub platform: Option<String>,

    /// Fewest results to ask for
    #[arg(long, default_value_t = DEFAULT_MIN_RESULTS)]
    pub min: u32,

    /// Most results to ask for; 0 leaves the count to the model
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max: u32,
}

impl SearchArgs {
    pub fn to_request(&self) -> SearchRequest {
        let mut request = SearchRequest::new(self.query.clone()).results(self.min, self.max);
        if let Some(platform) = &self.platform {
            request = request.platform(platform.clone());
        }
        request
    }
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Page to fetch
    pub url: String,
}
