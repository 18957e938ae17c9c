//! Per-strategy source adapters.
//!
//! Each submodule fetches one kind of source and returns the same normalized
//! item shape:
//!
//! | Strategy    | Module        | Method |
//! |-------------|---------------|--------|
//! | `html`      | [`html_list`] | selector extraction over one or more HTML pages |
//! | `rss`       | [`feed`]      | RSS/Atom parsing, feed order preserved |
//! | `json_html` | [`json_html`] | HTML fragment unwrapped from a JSON response |
//!
//! [`fetch_source`] is the single dispatch point. A source declaring a
//! strategy this table does not know is a configuration error for that
//! source alone; the run carries on without it.

pub mod feed;
pub mod html_list;
pub mod json_html;

use crate::error::FetchError;
use crate::models::{Item, SourceSpec, Strategy};
use crate::transport::Transport;

/// Fetch one source with the adapter matching its declared strategy.
///
/// Returns at most `top_n` items. All failure modes surface as a single
/// [`FetchError`] for the source; partial pages never leak out.
pub async fn fetch_source(
    transport: &Transport,
    source: &SourceSpec,
    top_n: usize,
) -> Result<Vec<Item>, FetchError> {
    match source.strategy {
        Strategy::Html => html_list::fetch(transport, source, top_n).await,
        Strategy::Rss => feed::fetch(transport, source, top_n).await,
        Strategy::JsonHtml => json_html::fetch(transport, source, top_n).await,
        Strategy::Unknown => Err(FetchError::Config(format!(
            "source `{}` declares an unrecognized strategy",
            source.name
        ))),
    }
}
