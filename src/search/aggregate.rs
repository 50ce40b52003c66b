// src/search/aggregate.rs
use metrics::counter;
use std::collections::HashSet;

use crate::search::client::{FetchOutcome, PageFetcher};
use crate::search::extract::{Extraction, ResultExtractor};
use crate::search::types::SearchResult;

pub const DEFAULT_DEPTH: usize = 3;
pub const DEFAULT_PER_PAGE: usize = 10;
/// Bodies shorter than this on a non-first page are read as a block signal.
pub const DEFAULT_BLOCK_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub depth: usize,
    pub per_page: usize,
    pub block_threshold: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            per_page: DEFAULT_PER_PAGE,
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
        }
    }
}

/// Why pagination ended for a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStop {
    DepthReached,
    /// A page produced no candidates.
    Exhausted,
    /// Short body on a non-first page.
    Blocked,
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub results: Vec<SearchResult>,
    pub pages_fetched: usize,
    pub duplicates: usize,
    pub stop: PageStop,
}

/// Merge `incoming` into `acc`, first-seen link wins. Returns the number dropped.
pub fn merge_unique(
    acc: &mut Vec<SearchResult>,
    seen: &mut HashSet<String>,
    incoming: Vec<SearchResult>,
) -> usize {
    let mut dropped = 0usize;
    for r in incoming {
        if seen.insert(r.link.clone()) {
            acc.push(r);
        } else {
            dropped += 1;
        }
    }
    dropped
}

/// Fetch up to `pagination.depth` pages for `query` and merge them by link.
pub async fn aggregate(
    fetcher: &dyn PageFetcher,
    extractor: &ResultExtractor,
    query: &str,
    pagination: &Pagination,
) -> Aggregation {
    crate::ensure_metrics_described();

    let mut results = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates = 0usize;
    let mut pages_fetched = 0usize;
    let mut stop = PageStop::DepthReached;

    for page in 0..pagination.depth {
        let body = match fetcher.fetch_page(query, page, pagination.per_page).await {
            FetchOutcome::Page { body, .. } => body,
            FetchOutcome::Failed { reason } => {
                tracing::warn!(
                    target: "search",
                    page,
                    reason = %reason,
                    provider = fetcher.name(),
                    "page failed, stopping"
                );
                stop = PageStop::FetchFailed;
                break;
            }
        };
        pages_fetched += 1;

        let len = body.chars().count();
        if page > 0 && len < pagination.block_threshold {
            tracing::warn!(
                target: "search",
                page,
                len,
                threshold = pagination.block_threshold,
                "short body, assuming blocked"
            );
            counter!("search_blocked_total").increment(1);
            stop = PageStop::Blocked;
            break;
        }

        let candidates = match extractor.extract(&body) {
            Extraction::Found(v) => v,
            Extraction::Empty => {
                tracing::debug!(target: "search", page, "empty page, end of results");
                stop = PageStop::Exhausted;
                break;
            }
        };

        duplicates += merge_unique(&mut results, &mut seen, candidates);
    }

    counter!("search_results_kept_total").increment(results.len() as u64);
    counter!("search_duplicates_total").increment(duplicates as u64);

    Aggregation {
        results,
        pages_fetched,
        duplicates,
        stop,
    }
}
