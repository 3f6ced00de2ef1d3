//! grok-search CLI
//!
//! Runs one search or fetch through Grok and prints the answer to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use grok_search_provider::Grok;
use grok_search_types::{SearchProvider, TracingProgress};
use tracing_subscriber::EnvFilter;

mod app;

use app::{Cli, Commands};

/// Filter used with debug on and RUST_LOG unset: progress messages and
/// provider diagnostics, warnings from everything else.
const DEBUG_FILTER: &str = "warn,grok_search::progress=info,grok_search_provider=debug";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut grok = Grok::from_env().context("loading Grok configuration")?;
    if cli.debug {
        grok = grok.debug(true);
    }

    let default_filter = if grok.config().debug_enabled {
        DEBUG_FILTER
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::debug!(config = ?grok.config(), "configuration loaded");

    let progress = TracingProgress;
    let text = match cli.command {
        Commands::Search(args) => grok
            .search(args.to_request(), Some(&progress))
            .await
            .with_context(|| format!("search for {:?} failed", args.query))?,
        Commands::Fetch(args) => grok
            .fetch(&args.url, Some(&progress))
            .await
            .with_context(|| format!("fetch of {} failed", args.url))?,
    };

    println!("{text}");
    Ok(())
}
