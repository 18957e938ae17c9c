//! # Popular Press
//!
//! Aggregates the "most read" lists of several news outlets into one sorted
//! collection. Each outlet is described declaratively: how to retrieve its
//! items (HTML scraping with optional pagination, RSS/Atom feeds, or HTML
//! fragments wrapped in JSON), which selector finds them, and how many pages
//! to walk. A failing outlet is logged and skipped; it never takes the run
//! down with it.
//!
//! ## Usage
//!
//! ```sh
//! popular_press -n 10
//! popular_press --sources ./sources.yaml --json
//! ```
//!
//! ## Architecture
//!
//! 1. **Registry**: built-in outlet list, or a YAML file
//! 2. **Fetching**: one adapter per strategy, sources fetched concurrently
//! 3. **Previews**: best-effort short excerpt per item, bounded concurrency
//! 4. **Output**: one list sorted by `(source, title)`, printed or dumped
//!    as JSON

use std::error::Error;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod adapters;
mod aggregator;
mod cli;
mod error;
mod extract;
mod models;
mod preview;
mod registry;
mod transport;
mod utils;

use cli::Cli;
use transport::Transport;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("popular_press starting up");

    let args = Cli::parse();
    debug!(?args.top_n, ?args.sources, ?args.json, "Parsed CLI arguments");

    let sources = match args.sources.as_deref() {
        Some(path) => registry::load_sources(path)?,
        None => registry::default_sources(),
    };
    info!(count = sources.len(), "Source registry ready");

    let transport = Transport::new(Duration::from_secs(args.timeout))?;
    let news = aggregator::aggregate(&transport, &sources, args.top_n).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&news)?);
    } else {
        for (index, entry) in news.iter().enumerate() {
            println!(
                "{}. [{}] {} - {}",
                index + 1,
                entry.source,
                entry.item.title,
                entry.item.link
            );
            if !entry.item.preview.is_empty() {
                println!("    {}", entry.item.preview);
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        items = news.len(),
        "Execution complete"
    );

    Ok(())
}
