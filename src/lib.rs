// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod notify;
pub mod report;
pub mod search;
pub mod topics;
pub mod tracker;

pub use crate::config::TrackerConfig;
pub use crate::notify::{DeliveryOutcome, Notifier, PushPlusNotifier};
pub use crate::report::{Report, TopicReport};
pub use crate::search::SearchResult;
pub use crate::topics::Topic;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up once a recorder is installed).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("search_pages_total", "Result pages requested.");
        describe_counter!(
            "search_page_failures_total",
            "Result pages that failed (timeout, connection, non-2xx)."
        );
        describe_counter!(
            "search_blocked_total",
            "Topics whose pagination stopped on a block signal."
        );
        describe_counter!(
            "search_results_kept_total",
            "Results kept after link dedup."
        );
        describe_counter!(
            "search_duplicates_total",
            "Results dropped as duplicate links."
        );
        describe_histogram!("search_fetch_ms", "Result page fetch time in milliseconds.");
    });
}
