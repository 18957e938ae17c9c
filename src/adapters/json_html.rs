//! Adapter for HTML fragments delivered inside JSON.
//!
//! Some outlets publish their most-read widget as a JSON document whose
//! payload is a ready-made HTML fragment under a configurable key. The
//! fragment is unwrapped and then handled exactly like any other listing,
//! with links resolving against the source URL rather than anything inside
//! the fragment.

use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;
use crate::extract::{parse_selector, scan_fragment};
use crate::models::{Item, SourceSpec};
use crate::preview::attach_previews;
use crate::transport::Transport;

/// Key consulted when a source does not name one.
const DEFAULT_JSON_KEY: &str = "html";

/// Fetch a JSON-wrapped HTML source.
///
/// Invalid JSON, a missing key, and a non-string value are each a failure
/// for the whole source.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn fetch(
    transport: &Transport,
    source: &SourceSpec,
    top_n: usize,
) -> Result<Vec<Item>, FetchError> {
    let selector_raw = source
        .selector
        .as_deref()
        .ok_or_else(|| FetchError::missing_selector(&source.name))?;
    let selector = parse_selector(selector_raw)?;
    let base = Url::parse(&source.url)?;

    let body = transport.fetch(&source.url).await?;
    let payload: Value = serde_json::from_str(&body)?;
    let key = source.json_key.as_deref().unwrap_or(DEFAULT_JSON_KEY);
    let fragment = payload
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| FetchError::JsonKey(key.to_string()))?;

    let mut raw = scan_fragment(fragment, &base, &selector);
    debug!(count = raw.len(), "Extracted items from fragment");
    raw.truncate(top_n);
    Ok(attach_previews(transport, raw).await)
}
