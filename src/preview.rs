//! Best-effort article previews.
//!
//! A preview is cosmetic: a missing one degrades the listing, not the data.
//! This is the single place in the system where failure is swallowed rather
//! than surfaced. [`extract_preview`] therefore returns a plain `String`,
//! never an error, and logs the cause at debug level only.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::FetchError;
use crate::extract::{RawItem, normalized_text};
use crate::models::Item;
use crate::transport::Transport;
use crate::utils::truncate_chars;

/// Hard cap on preview length, in characters.
pub const PREVIEW_MAX_CHARS: usize = 200;

/// Preview fetches run concurrently per source, but only this many at once.
pub(crate) const PREVIEW_CONCURRENCY: usize = 4;

/// Tight budget for preview fetches so a slow article server cannot stall
/// the overall run.
const PREVIEW_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetch an article page and derive a short plain-text preview.
///
/// Prefers the page's meta description; falls back to the text of the first
/// paragraph. The result is truncated to [`PREVIEW_MAX_CHARS`] characters
/// with no regard for word boundaries. Any fetch or parse problem yields an
/// empty string.
pub async fn extract_preview(transport: &Transport, url: &str) -> String {
    match fetch_preview(transport, url).await {
        Ok(preview) => preview,
        Err(e) => {
            debug!(%url, error = %e, "Preview unavailable");
            String::new()
        }
    }
}

/// Turn raw extracted anchors into finished items, fetching previews with
/// bounded concurrency. Input order is preserved.
pub async fn attach_previews(transport: &Transport, raw: Vec<RawItem>) -> Vec<Item> {
    stream::iter(raw)
        .map(|entry| async move {
            let preview = extract_preview(transport, entry.link.as_str()).await;
            Item {
                title: entry.title,
                link: entry.link.to_string(),
                preview,
            }
        })
        .buffered(PREVIEW_CONCURRENCY)
        .collect()
        .await
}

async fn fetch_preview(transport: &Transport, url: &str) -> Result<String, FetchError> {
    let body = transport.fetch_with_timeout(url, PREVIEW_TIMEOUT).await?;
    Ok(preview_from_html(&body))
}

fn preview_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    let meta = Selector::parse(r#"meta[name="description"]"#).unwrap();
    if let Some(content) = document
        .select(&meta)
        .next()
        .and_then(|element| element.value().attr("content"))
    {
        let content = content.trim();
        if !content.is_empty() {
            return truncate_chars(content, PREVIEW_MAX_CHARS).to_string();
        }
    }

    let paragraph = Selector::parse("p").unwrap();
    document
        .select(&paragraph)
        .next()
        .map(|element| truncate_chars(&normalized_text(&element), PREVIEW_MAX_CHARS).to_string())
        .unwrap_or_default()
}
