//! Selector-based item extraction from HTML documents.
//!
//! A page is parsed exactly once per fetch. [`scan_page`] answers everything
//! the adapters need from the parsed document in one pass: the item anchors
//! matched by the source selector, the next-page anchor when asked for, and
//! the highest page number advertised anywhere in the document's links.
//!
//! `scraper::Html` is not `Send`, so nothing here is async and no document
//! handle ever crosses an await point; callers get owned data back.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;
use url::Url;

use crate::error::FetchError;

static PAGE_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"page=(\d+)").unwrap());

/// A candidate headline pulled out of a document, link already resolved.
#[derive(Debug, Clone)]
pub struct RawItem {
    pub title: String,
    pub link: Url,
}

/// Everything one parsed page has to say.
#[derive(Debug)]
pub struct PageScan {
    /// Items matched by the source selector, incomplete entries dropped.
    pub items: Vec<RawItem>,
    /// Raw `href` of the first next-page anchor, when a selector was given.
    /// Resolution against the source base URL is the caller's job.
    pub next_href: Option<String>,
    /// Highest well-formed `page=<digits>` value found in any anchor, else 1.
    pub max_page_hint: usize,
}

/// Compile a selector string from configuration.
///
/// `scraper`'s parse error borrows the input, so it is flattened into an
/// owned [`FetchError::Selector`] here.
pub fn parse_selector(raw: &str) -> Result<Selector, FetchError> {
    Selector::parse(raw).map_err(|e| FetchError::Selector {
        selector: raw.to_string(),
        message: e.to_string(),
    })
}

/// Parse a fetched page and extract items, pagination hints, and next link.
///
/// Item links resolve against `page_url` with standard URL-joining rules;
/// entries whose href does not resolve or whose title is empty are silently
/// dropped, since a structurally incomplete entry carries no value.
pub fn scan_page(
    body: &str,
    page_url: &Url,
    selector: &Selector,
    next_selector: Option<&Selector>,
) -> PageScan {
    let document = Html::parse_document(body);
    let items = collect_items(&document, page_url, selector);
    let next_href = next_selector
        .and_then(|sel| document.select(sel).next())
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string);
    let max_page_hint = max_page_hint(&document);
    trace!(
        items = items.len(),
        next = next_href.is_some(),
        max_page_hint,
        "Scanned page"
    );
    PageScan {
        items,
        next_href,
        max_page_hint,
    }
}

/// Extract items from an HTML fragment, e.g. one unwrapped from JSON.
///
/// Links resolve against `base`, not against anything inside the fragment.
pub fn scan_fragment(fragment: &str, base: &Url, selector: &Selector) -> Vec<RawItem> {
    let document = Html::parse_fragment(fragment);
    collect_items(&document, base, selector)
}

/// Visible text of an element with whitespace runs collapsed.
pub fn normalized_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_items(document: &Html, base: &Url, selector: &Selector) -> Vec<RawItem> {
    let mut items = Vec::new();
    for element in document.select(selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let title = normalized_text(&element);
        if title.is_empty() {
            continue;
        }
        let Ok(link) = base.join(href) else {
            continue;
        };
        items.push(RawItem { title, link });
    }
    items
}

fn max_page_hint(document: &Html) -> usize {
    let anchors = Selector::parse("a[href]").unwrap();
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| PAGE_PARAM.captures(href))
        .filter_map(|caps| caps[1].parse::<usize>().ok())
        .max()
        .unwrap_or(1)
}
