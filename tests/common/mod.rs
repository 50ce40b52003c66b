// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use edu_hotspot_tracker::search::{FetchOutcome, PageFetcher};
use std::sync::Mutex;

/// Pads bodies past the default block threshold.
pub const PADDING: usize = 12_000;

/// Result-page markup in the engine's layout. `padded` pushes it past 10k chars.
pub fn page_html(hits: &[(&str, &str, &str)], padded: bool) -> String {
    let mut body = String::from("<html><head><title>news</title></head><body><div id=\"content_left\">");
    for (title, link, source) in hits {
        body.push_str(&format!(
            r#"<div class="result"><h3><a target="_blank" href="{link}">{title}</a></h3><p class="c-author">{source}</p></div>"#
        ));
    }
    body.push_str("</div>");
    if padded {
        body.push_str(&format!("<!-- {} -->", "x".repeat(PADDING)));
    }
    body.push_str("</body></html>");
    body
}

pub fn ok(body: String) -> FetchOutcome {
    FetchOutcome::Page { status: 200, body }
}

/// Serves canned pages by index and records every page index requested.
pub struct StubFetcher {
    pages: Vec<FetchOutcome>,
    pub calls: Mutex<Vec<(String, usize, usize)>>,
}

impl StubFetcher {
    pub fn new(pages: Vec<FetchOutcome>) -> Self {
        Self {
            pages,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn pages_requested(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(|c| c.1).collect()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_page(&self, query: &str, page: usize, per_page: usize) -> FetchOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), page, per_page));
        self.pages.get(page).cloned().unwrap_or(FetchOutcome::Failed {
            reason: "no stub for page".into(),
        })
    }

    fn name(&self) -> &'static str {
        "Stub"
    }
}
