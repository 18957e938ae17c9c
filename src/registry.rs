//! The source registry.
//!
//! The built-in registry lists the Greek outlets this tool was written for.
//! A YAML file can replace it wholesale; see `load_sources`. Selector
//! strings are site knowledge, not engine logic, and change whenever the
//! outlets redesign.

use std::error::Error;

use tracing::{info, warn};

use crate::models::SourceSpec;

/// The built-in outlets, one JSON-wrapped widget, one plain HTML listing,
/// and eight feeds.
pub fn default_sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec::json_html(
            "Kathimerini",
            "https://www.kathimerini.gr/infeeds/popular/popular_html.txt",
            "ul.nx-dhmofilh__list li a",
            "popular",
        ),
        SourceSpec::rss("Proto Thema", "https://www.protothema.gr/rss/"),
        SourceSpec::rss("In.gr", "https://www.in.gr/feed"),
        SourceSpec::html(
            "News247",
            "https://www.news247.gr",
            "section.popular_articles_section article a",
        ),
        SourceSpec::rss("SKAI", "https://www.skai.gr/feed.xml"),
        SourceSpec::rss("Naftemporiki", "https://www.naftemporiki.gr/feed/"),
        SourceSpec::rss("To Vima", "https://www.tovima.gr/feed"),
        SourceSpec::rss("Ethnos", "https://www.ethnos.gr/rss"),
        SourceSpec::rss("Zougla", "https://www.zougla.gr/feed/"),
        SourceSpec::rss("NewsIT", "https://www.newsit.gr/feed/"),
    ]
}

/// Load a registry from a YAML file.
///
/// The file is a sequence of source maps. Entries that do not deserialize
/// are skipped with a warning so one typo cannot take the whole registry
/// down; an unreadable or non-sequence file is still an error.
pub fn load_sources(path: &str) -> Result<Vec<SourceSpec>, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let sources = parse_sources(&raw)?;
    info!(path, count = sources.len(), "Loaded source registry");
    Ok(sources)
}

/// Parse registry YAML, skipping malformed entries.
pub fn parse_sources(raw: &str) -> Result<Vec<SourceSpec>, serde_yaml::Error> {
    let entries: Vec<serde_yaml::Value> = serde_yaml::from_str(raw)?;
    let mut sources = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_yaml::from_value::<SourceSpec>(entry) {
            Ok(spec) => sources.push(spec),
            Err(e) => warn!(index, error = %e, "Skipping malformed source entry"),
        }
    }
    Ok(sources)
}
