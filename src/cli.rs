//! Command-line interface definitions for Popular Press.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the Popular Press aggregator.
///
/// # Examples
///
/// ```sh
/// # Aggregate the built-in outlets, ten items per source
/// popular_press
///
/// # Five items per source, custom registry, JSON output
/// popular_press -n 5 --sources ./sources.yaml --json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Number of items to keep per source
    #[arg(short = 'n', long, default_value_t = 10)]
    pub top_n: usize,

    /// Path to a YAML source registry (defaults to the built-in outlets)
    #[arg(short, long)]
    pub sources: Option<String>,

    /// Print the aggregate as pretty JSON instead of a numbered listing
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds for primary page and feed fetches
    #[arg(long, env = "POPULAR_PRESS_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,
}
