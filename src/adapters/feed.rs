//! RSS/Atom feed adapter.
//!
//! Feed order is authoritative: the first `top_n` entries are taken as-is,
//! no re-sorting. Previews come from the entry's own summary when it has
//! one; only summary-less entries cost an extra article fetch.

use futures::stream::{self, StreamExt};
use tracing::{debug, instrument};

use crate::error::FetchError;
use crate::models::{Item, SourceSpec};
use crate::preview::{PREVIEW_CONCURRENCY, PREVIEW_MAX_CHARS, extract_preview};
use crate::transport::Transport;
use crate::utils::{strip_tags, truncate_chars};

struct Candidate {
    title: String,
    link: String,
    summary: Option<String>,
}

/// Fetch a feed source and normalize its first `top_n` entries.
///
/// A feed that cannot be fetched or parsed fails the source as a whole;
/// there is no such thing as a partially parsed feed here.
#[instrument(level = "info", skip_all, fields(source = %source.name))]
pub async fn fetch(
    transport: &Transport,
    source: &SourceSpec,
    top_n: usize,
) -> Result<Vec<Item>, FetchError> {
    let body = transport.fetch(&source.url).await?;
    let feed =
        feed_rs::parser::parse(body.as_bytes()).map_err(|e| FetchError::Feed(e.to_string()))?;
    debug!(entries = feed.entries.len(), "Parsed feed");

    let candidates: Vec<Candidate> = feed
        .entries
        .into_iter()
        .take(top_n)
        .filter_map(|entry| {
            let title = entry
                .title
                .map(|t| t.content.trim().to_string())
                .unwrap_or_default();
            let link = entry
                .links
                .into_iter()
                .next()
                .map(|l| l.href)
                .unwrap_or_default();
            if title.is_empty() || link.is_empty() {
                return None;
            }
            let summary = entry
                .summary
                .map(|s| strip_tags(&s.content))
                .filter(|s| !s.is_empty());
            Some(Candidate {
                title,
                link,
                summary,
            })
        })
        .collect();

    let items = stream::iter(candidates)
        .map(|candidate| async move {
            let preview = match candidate.summary {
                Some(summary) => truncate_chars(&summary, PREVIEW_MAX_CHARS).to_string(),
                None => extract_preview(transport, &candidate.link).await,
            };
            Item {
                title: candidate.title,
                link: candidate.link,
                preview,
            }
        })
        .buffered(PREVIEW_CONCURRENCY)
        .collect()
        .await;

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::DEFAULT_TIMEOUT;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Most Read</title>
    <item>
      <title>First story</title>
      <link>https://example.test/story/1</link>
      <description>&lt;b&gt;Hi&lt;/b&gt; there</description>
    </item>
    <item>
      <title>Second story</title>
      <link>https://example.test/story/2</link>
      <description>Plain summary</description>
    </item>
    <item>
      <title>Third story</title>
      <link>https://example.test/story/3</link>
      <description>Another one</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Most Read</title>
  <id>urn:feed:most-read</id>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <title>Atom entry</title>
    <link href="https://example.test/atom/1"/>
    <id>atom-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>Short note</summary>
  </entry>
</feed>"#;

    fn transport() -> Transport {
        Transport::new(DEFAULT_TIMEOUT).unwrap()
    }

    async fn serve_feed(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_feed_items_in_feed_order() {
        let server = serve_feed(RSS_SAMPLE).await;
        let source = SourceSpec::rss("Feed", &format!("{}/feed", server.uri()));
        let items = fetch(&transport(), &source, 10).await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "First story");
        assert_eq!(items[1].title, "Second story");
        assert_eq!(items[0].link, "https://example.test/story/1");
    }

    #[tokio::test]
    async fn test_feed_summary_tags_are_stripped() {
        let server = serve_feed(RSS_SAMPLE).await;
        let source = SourceSpec::rss("Feed", &format!("{}/feed", server.uri()));
        let items = fetch(&transport(), &source, 10).await.unwrap();
        assert_eq!(items[0].preview, "Hi there");
        assert_eq!(items[1].preview, "Plain summary");
    }

    #[tokio::test]
    async fn test_feed_top_n_takes_first_entries() {
        let server = serve_feed(RSS_SAMPLE).await;
        let source = SourceSpec::rss("Feed", &format!("{}/feed", server.uri()));
        let items = fetch(&transport(), &source, 2).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First story");
        assert_eq!(items[1].title, "Second story");
    }

    #[tokio::test]
    async fn test_atom_feed_parses() {
        let server = serve_feed(ATOM_SAMPLE).await;
        let source = SourceSpec::rss("Atom", &format!("{}/feed", server.uri()));
        let items = fetch(&transport(), &source, 10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Atom entry");
        assert_eq!(items[0].link, "https://example.test/atom/1");
        assert_eq!(items[0].preview, "Short note");
    }

    #[tokio::test]
    async fn test_entry_without_link_is_dropped() {
        let feed = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title>
  <item><title>No link here</title><description>d</description></item>
  <item><title>Linked</title><link>https://example.test/ok</link><description>d</description></item>
</channel></rss>"#;
        let server = serve_feed(feed).await;
        let source = SourceSpec::rss("Feed", &format!("{}/feed", server.uri()));
        let items = fetch(&transport(), &source, 10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Linked");
    }

    #[tokio::test]
    async fn test_summaryless_entry_gets_fetched_preview() {
        let server = MockServer::start().await;
        let feed = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title>
  <item><title>Quiet entry</title><link>{}/article</link></item>
</channel></rss>"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_string(feed))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><meta name="description" content="From the article."></head></html>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let source = SourceSpec::rss("Feed", &format!("{}/feed", server.uri()));
        let items = fetch(&transport(), &source, 10).await.unwrap();
        assert_eq!(items[0].preview, "From the article.");
    }

    #[tokio::test]
    async fn test_malformed_feed_fails_the_source() {
        let server = serve_feed("this is not a feed at all").await;
        let source = SourceSpec::rss("Broken", &format!("{}/feed", server.uri()));
        let err = fetch(&transport(), &source, 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Feed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_feed_fails_the_source() {
        let source = SourceSpec::rss("Gone", "http://127.0.0.1:1/feed");
        let err = fetch(&transport(), &source, 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
