// tests/metrics_search.rs
mod common;

use common::{ok, page_html, StubFetcher};
use edu_hotspot_tracker::search::{aggregate, Pagination, ResultExtractor};
use metrics_exporter_prometheus::PrometheusBuilder;

#[tokio::test]
async fn aggregation_counters_are_exposed() {
    // Install a local recorder for this test binary
    let handle = PrometheusBuilder::new().install_recorder().expect("recorder");

    let fetcher = StubFetcher::new(vec![
        ok(page_html(
            &[
                ("A long first headline", "L1", "S"),
                ("A long first headline again", "L1", "S"),
            ],
            false,
        )),
        ok(page_html(&[("Some later headline", "L2", "S")], false)),
    ]);
    let pagination = Pagination {
        depth: 2,
        ..Pagination::default()
    };
    let agg = aggregate(&fetcher, &ResultExtractor::default(), "q", &pagination).await;
    assert_eq!(agg.results.len(), 1);

    let out = handle.render();
    assert!(out.contains("search_results_kept_total"));
    assert!(out.contains("search_duplicates_total"));
    assert!(out.contains("search_blocked_total"));
}
