//! Cross-source aggregation.
//!
//! [`aggregate`] is the one operation callers see, and it never fails: every
//! adapter error stops at the per-source boundary, is logged with the source
//! name and cause, and costs the run nothing but that source's items. The
//! worst case is an empty result.
//!
//! Sources are independent, so they are fetched concurrently; the output is
//! sorted at the end, which makes the result deterministic regardless of
//! completion order.

use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument, warn};

use crate::adapters::fetch_source;
use crate::error::FetchError;
use crate::models::{AggregatedItem, SourceSpec};
use crate::transport::Transport;

/// How many sources are in flight at once.
const SOURCE_CONCURRENCY: usize = 6;

/// Fetch every source in the registry and merge the results.
///
/// Each source contributes at most `top_n` items, tagged with the source
/// name. The returned collection is sorted ascending by `(source, title)`
/// with natural string ordering.
#[instrument(level = "info", skip_all, fields(sources = sources.len(), top_n))]
pub async fn aggregate(
    transport: &Transport,
    sources: &[SourceSpec],
    top_n: usize,
) -> Vec<AggregatedItem> {
    let per_source: Vec<Vec<AggregatedItem>> = stream::iter(sources)
        .map(|source| async move {
            match fetch_source(transport, source, top_n).await {
                Ok(items) => {
                    info!(source = %source.name, count = items.len(), "Source fetched");
                    items
                        .into_iter()
                        .map(|item| AggregatedItem {
                            source: source.name.clone(),
                            item,
                        })
                        .collect()
                }
                Err(FetchError::Config(reason)) => {
                    warn!(source = %source.name, %reason, "Source skipped");
                    Vec::new()
                }
                Err(e) => {
                    error!(source = %source.name, error = %e, "Source failed");
                    Vec::new()
                }
            }
        })
        .buffer_unordered(SOURCE_CONCURRENCY)
        .collect()
        .await;

    let mut aggregated: Vec<AggregatedItem> = per_source.into_iter().flatten().collect();
    aggregated.sort_by(|a, b| {
        a.source
            .cmp(&b.source)
            .then_with(|| a.item.title.cmp(&b.item.title))
    });
    info!(count = aggregated.len(), "Aggregation complete");
    aggregated
}
