//! Data models for source descriptions and aggregated headlines.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`SourceSpec`]: the declarative description of one news source
//! - [`Strategy`]: how that source's items are retrieved and parsed
//! - [`Pagination`]: how multi-page HTML listings are traversed
//! - [`Item`]: one normalized headline
//! - [`AggregatedItem`]: a headline tagged with its source name
//!
//! Source descriptions are configuration: they deserialize from YAML and are
//! never mutated by the engine.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Retrieval strategy for a source.
///
/// The set is closed on purpose; dispatch in `adapters::fetch_source` is an
/// exhaustive match, and adding a strategy means adding a variant arm there.
/// Strings that match no known tag deserialize to [`Strategy::Unknown`] so a
/// typo in one registry entry is a per-source problem, not a file-level one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Strategy {
    /// Selector-based extraction from fetched HTML pages.
    Html,
    /// RSS or Atom feed parsing.
    Rss,
    /// An HTML fragment wrapped inside a JSON response.
    JsonHtml,
    /// Anything else found in a config file; rejected at dispatch time.
    Unknown,
}

impl Strategy {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "html" => Strategy::Html,
            "rss" => Strategy::Rss,
            "json_html" => Strategy::JsonHtml,
            _ => Strategy::Unknown,
        }
    }
}

impl From<String> for Strategy {
    fn from(tag: String) -> Self {
        Strategy::from_tag(&tag)
    }
}

/// Pagination mode derived from a [`SourceSpec`]'s optional fields.
///
/// Borrowed view; the owning spec outlives any dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination<'a> {
    /// Single fetch, single extraction pass.
    None,
    /// URL suffix template carrying a literal `{page}` placeholder.
    PageParam(&'a str),
    /// Selector locating the next-page anchor in the current document.
    NextLink(&'a str),
}

/// Declarative description of one news source.
///
/// Supplied externally (built-in registry or YAML file) and treated as
/// read-only. Selector strings are opaque site knowledge; the engine only
/// compiles and applies them.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    /// Display name, unique within the registry.
    pub name: String,
    /// Base endpoint for the source.
    pub url: String,
    /// How items are retrieved and parsed.
    pub strategy: Strategy,
    /// CSS selector for item anchors (`html` and `json_html` strategies).
    #[serde(default)]
    pub selector: Option<String>,
    /// URL suffix template with a `{page}` placeholder, e.g. `?page={page}`.
    #[serde(default)]
    pub page_param: Option<String>,
    /// Selector locating the next-page anchor.
    #[serde(default)]
    pub next_selector: Option<String>,
    /// Hard cap on pages fetched per source.
    #[serde(default)]
    pub max_pages: Option<usize>,
    /// Key under which a JSON response nests its HTML fragment.
    #[serde(default)]
    pub json_key: Option<String>,
}

impl SourceSpec {
    /// Describe a feed source.
    pub fn rss(name: &str, url: &str) -> Self {
        SourceSpec {
            name: name.to_string(),
            url: url.to_string(),
            strategy: Strategy::Rss,
            selector: None,
            page_param: None,
            next_selector: None,
            max_pages: None,
            json_key: None,
        }
    }

    /// Describe a plain HTML source.
    pub fn html(name: &str, url: &str, selector: &str) -> Self {
        SourceSpec {
            selector: Some(selector.to_string()),
            strategy: Strategy::Html,
            ..SourceSpec::rss(name, url)
        }
    }

    /// Describe a source that wraps an HTML fragment in JSON.
    pub fn json_html(name: &str, url: &str, selector: &str, json_key: &str) -> Self {
        SourceSpec {
            selector: Some(selector.to_string()),
            json_key: Some(json_key.to_string()),
            strategy: Strategy::JsonHtml,
            ..SourceSpec::rss(name, url)
        }
    }

    /// Resolve the pagination mode for this source.
    ///
    /// `page_param` and `next_selector` are mutually exclusive; a spec
    /// carrying both is misconfigured and is rejected as a whole rather than
    /// silently preferring one walk over the other.
    pub fn pagination(&self) -> Result<Pagination<'_>, FetchError> {
        match (self.page_param.as_deref(), self.next_selector.as_deref()) {
            (Some(_), Some(_)) => Err(FetchError::Config(format!(
                "source `{}` sets both page_param and next_selector",
                self.name
            ))),
            (Some(template), None) => Ok(Pagination::PageParam(template)),
            (None, Some(selector)) => Ok(Pagination::NextLink(selector)),
            (None, None) => Ok(Pagination::None),
        }
    }
}

/// One normalized headline.
///
/// Extraction drops any candidate whose title or link is empty, so both
/// fields are always non-empty here. `preview` is best-effort and may be
/// empty; it is capped at 200 characters at the point of extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Headline text, whitespace-normalized.
    pub title: String,
    /// Absolute URL of the story.
    pub link: String,
    /// Short plain-text excerpt, possibly empty.
    pub preview: String,
}

/// A headline tagged with the name of the source it came from.
///
/// Created once per successfully extracted item during a run and immutable
/// afterwards. The final result is a `Vec<AggregatedItem>` sorted by
/// `(source, title)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedItem {
    /// Name of the owning source.
    pub source: String,
    #[serde(flatten)]
    pub item: Item,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_known_tags() {
        assert_eq!(Strategy::from("html".to_string()), Strategy::Html);
        assert_eq!(Strategy::from("rss".to_string()), Strategy::Rss);
        assert_eq!(Strategy::from("json_html".to_string()), Strategy::JsonHtml);
    }

    #[test]
    fn test_strategy_unknown_tag() {
        assert_eq!(Strategy::from("soap".to_string()), Strategy::Unknown);
        assert_eq!(Strategy::from("".to_string()), Strategy::Unknown);
    }

    #[test]
    fn test_source_spec_from_yaml() {
        let yaml = r#"
name: Kathimerini
url: https://www.kathimerini.gr/most-popular/
strategy: html
selector: "ul.most-popular-list li a"
page_param: "?page={page}"
max_pages: 3
"#;
        let spec: SourceSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.name, "Kathimerini");
        assert_eq!(spec.strategy, Strategy::Html);
        assert_eq!(spec.selector.as_deref(), Some("ul.most-popular-list li a"));
        assert_eq!(spec.max_pages, Some(3));
        assert_eq!(
            spec.pagination().unwrap(),
            Pagination::PageParam("?page={page}")
        );
    }

    #[test]
    fn test_source_spec_unknown_strategy_from_yaml() {
        let yaml = "name: Mystery\nurl: https://example.test/\nstrategy: telepathy\n";
        let spec: SourceSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.strategy, Strategy::Unknown);
    }

    #[test]
    fn test_pagination_defaults_to_none() {
        let spec = SourceSpec::rss("Proto Thema", "https://www.protothema.gr/rss/");
        assert_eq!(spec.pagination().unwrap(), Pagination::None);
    }

    #[test]
    fn test_pagination_next_link() {
        let mut spec = SourceSpec::html(
            "Proto Thema",
            "https://www.protothema.gr/most-read/",
            "article h2 a",
        );
        spec.next_selector = Some("a.next".to_string());
        assert_eq!(spec.pagination().unwrap(), Pagination::NextLink("a.next"));
    }

    #[test]
    fn test_pagination_conflicting_fields_rejected() {
        let mut spec = SourceSpec::html("Broken", "https://example.test/", "li a");
        spec.page_param = Some("?page={page}".to_string());
        spec.next_selector = Some("a.next".to_string());
        let err = spec.pagination().unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_aggregated_item_serializes_flat() {
        let entry = AggregatedItem {
            source: "SKAI".to_string(),
            item: Item {
                title: "Headline".to_string(),
                link: "https://www.skai.gr/story/1".to_string(),
                preview: "".to_string(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["source"], "SKAI");
        assert_eq!(json["title"], "Headline");
        assert_eq!(json["link"], "https://www.skai.gr/story/1");
    }
}
