//! HTML listing adapter with optional pagination.
//!
//! Covers the three shapes a most-read listing comes in:
//!
//! - a single page of anchors,
//! - a page family addressed by a `?page=N` style template, where the first
//!   page advertises how many pages exist,
//! - a chain of pages connected by a "next" anchor.
//!
//! Any page fetch failure is terminal for the source on this run; there are
//! no retries. The aggregator decides what that means for the overall run.

use scraper::Selector;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;
use crate::extract::{RawItem, parse_selector, scan_page};
use crate::models::{Item, Pagination, SourceSpec};
use crate::preview::attach_previews;
use crate::transport::Transport;

/// Ceiling on next-link walks when no `max_pages` is configured. Remote
/// markup can point "next" back at an earlier page; the walk must still
/// terminate.
pub(crate) const MAX_WALK_PAGES: usize = 25;

/// Fetch a selector-based HTML source, walking pagination when configured.
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

    let mut raw = match source.pagination()? {
        Pagination::None => {
            let body = transport.fetch(&source.url).await?;
            scan_page(&body, &base, &selector, None).items
        }
        Pagination::PageParam(template) => {
            fetch_paged(transport, source, template, &selector).await?
        }
        Pagination::NextLink(next_raw) => {
            fetch_chained(transport, source, &base, next_raw, &selector).await?
        }
    };

    debug!(count = raw.len(), "Extracted raw items");
    raw.truncate(top_n);
    Ok(attach_previews(transport, raw).await)
}

/// Walk a `{page}`-templated page family.
///
/// Page 1 doubles as the page-count probe: its anchors are scanned for the
/// largest `page=N` value, and that first document is reused, never fetched
/// twice. `max_pages` caps the detected count, it never extends it.
async fn fetch_paged(
    transport: &Transport,
    source: &SourceSpec,
    template: &str,
    selector: &Selector,
) -> Result<Vec<RawItem>, FetchError> {
    let first_url = page_url(&source.url, template, 1);
    let body = transport.fetch(&first_url).await?;
    let scan = scan_page(&body, &Url::parse(&first_url)?, selector, None);

    let mut raw = scan.items;
    let detected = scan.max_page_hint;
    let total = detected.min(source.max_pages.unwrap_or(detected));
    debug!(detected, total, "Resolved page count");

    for page in 2..=total {
        let url = page_url(&source.url, template, page);
        let body = transport.fetch(&url).await?;
        raw.extend(scan_page(&body, &Url::parse(&url)?, selector, None).items);
    }
    Ok(raw)
}

/// Follow "next" anchors until the chain ends or the cap is reached.
///
/// The cap is checked before each fetch, so a source never costs one page
/// more than its budget. Next hrefs resolve against the source base URL.
async fn fetch_chained(
    transport: &Transport,
    source: &SourceSpec,
    base: &Url,
    next_raw: &str,
    selector: &Selector,
) -> Result<Vec<RawItem>, FetchError> {
    let next_selector = parse_selector(next_raw)?;
    let cap = source.max_pages.unwrap_or(MAX_WALK_PAGES);

    let mut raw = Vec::new();
    let mut current = base.clone();
    let mut fetched = 0usize;
    while fetched < cap {
        let body = transport.fetch(current.as_str()).await?;
        let scan = scan_page(&body, &current, selector, Some(&next_selector));
        raw.extend(scan.items);
        fetched += 1;
        match scan.next_href.and_then(|href| base.join(&href).ok()) {
            Some(next) => current = next,
            None => break,
        }
    }
    debug!(pages = fetched, "Finished next-link walk");
    Ok(raw)
}

fn page_url(base: &str, template: &str, page: usize) -> String {
    format!("{}{}", base, template.replace("{page}", &page.to_string()))
}
