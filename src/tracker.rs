// src/tracker.rs
//! One tracking run: every topic in registry order, pages in offset order, no overlap.

use chrono::NaiveDate;

use crate::config::TrackerConfig;
use crate::report::{build_report, Report, TopicReport};
use crate::search::{
    aggregate, build_query, PageFetcher, Pagination, QueryStrategy, ResultExtractor,
};
use crate::topics::Topic;

/// Aggregate every topic. Topics without keywords are skipped without a request.
pub async fn collect_topics(
    fetcher: &dyn PageFetcher,
    extractor: &ResultExtractor,
    topics: &[Topic],
    strategy: &QueryStrategy,
    pagination: &Pagination,
) -> Vec<TopicReport> {
    let mut out = Vec::with_capacity(topics.len());

    for topic in topics {
        if topic.is_empty() {
            tracing::info!(target: "tracker", topic = %topic.label, "no keywords, skipped");
            out.push(TopicReport {
                topic: topic.clone(),
                results: Vec::new(),
            });
            continue;
        }

        let query = build_query(topic, strategy);
        tracing::info!(target: "tracker", topic = %topic.label, query = %query, "searching");

        let agg = aggregate(fetcher, extractor, &query, pagination).await;
        tracing::info!(
            target: "tracker",
            topic = %topic.label,
            kept = agg.results.len(),
            pages = agg.pages_fetched,
            duplicates = agg.duplicates,
            stop = ?agg.stop,
            "topic done"
        );

        out.push(TopicReport {
            topic: topic.clone(),
            results: agg.results,
        });
    }

    out
}

/// Search all configured topics and build the report for `date`.
pub async fn run_once(
    cfg: &TrackerConfig,
    fetcher: &dyn PageFetcher,
    date: NaiveDate,
) -> Report {
    let extractor = ResultExtractor::default();
    let sections = collect_topics(
        fetcher,
        &extractor,
        &cfg.topics(),
        &cfg.query,
        &cfg.search.pagination(),
    )
    .await;
    build_report(&sections, date, &cfg.report)
}
