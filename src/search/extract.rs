// src/search/extract.rs
//! Result page parsing.
//!
//! Result containers are located by an ordered list of strategies; the first one
//! that yields any container wins. Within a container the title link is the first
//! `a[target="_blank"]`, the byline is tried as `p.c-author` then `span.c-info`.
//!
//! Selectors are brittle by nature. Add a strategy rather than editing one in place.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::search::types::SearchResult;

/// Titles with this many characters or fewer are treated as noise.
pub const MIN_TITLE_CHARS: usize = 10;

pub const UNKNOWN_SOURCE: &str = "未知来源";

static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[target="_blank"]"#).unwrap());
static SOURCE_SELECTORS: Lazy<[Selector; 2]> = Lazy::new(|| {
    [
        Selector::parse("p.c-author").unwrap(),
        Selector::parse("span.c-info").unwrap(),
    ]
});
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Given a parsed document, produce zero or more result container nodes.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn containers<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>>;
}

/// Strategy backed by a single CSS selector.
pub struct CssStrategy {
    name: String,
    selector: Selector,
}

impl CssStrategy {
    pub fn new(css: &str) -> anyhow::Result<Self> {
        let selector =
            Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css:?}: {e:?}"))?;
        Ok(Self {
            name: css.to_string(),
            selector,
        })
    }
}

impl ExtractionStrategy for CssStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn containers<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        doc.select(&self.selector).collect()
    }
}

/// Outcome of parsing one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(Vec<SearchResult>),
    /// No container matched, or every candidate was filtered out.
    Empty,
}

impl Extraction {
    pub fn into_results(self) -> Vec<SearchResult> {
        match self {
            Extraction::Found(v) => v,
            Extraction::Empty => Vec::new(),
        }
    }
}

pub struct ResultExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ResultExtractor {
    /// `div.result`, falling back to `div.c-container`.
    fn default() -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = ["div.result", "div.c-container"]
            .into_iter()
            .filter_map(|css| CssStrategy::new(css).ok())
            .map(|s| Box::new(s) as Box<dyn ExtractionStrategy>)
            .collect();
        Self { strategies }
    }
}

impl ResultExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, body: &str) -> Extraction {
        let doc = Html::parse_document(body);

        let Some((strategy, containers)) = self
            .strategies
            .iter()
            .map(|s| (s, s.containers(&doc)))
            .find(|(_, c)| !c.is_empty())
        else {
            tracing::debug!(target: "search", "no result containers matched");
            return Extraction::Empty;
        };

        let out: Vec<SearchResult> = containers.into_iter().filter_map(candidate).collect();
        tracing::debug!(
            target: "search",
            strategy = strategy.name(),
            kept = out.len(),
            "extracted candidates"
        );

        if out.is_empty() {
            Extraction::Empty
        } else {
            Extraction::Found(out)
        }
    }
}

/// Each text fragment trimmed, then concatenated. Whitespace inside a fragment is kept.
fn fragment_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Byline text for display: fragment text with whitespace runs collapsed.
fn byline_text(el: ElementRef<'_>) -> String {
    RE_WS.replace_all(&fragment_text(el), " ").trim().to_string()
}

fn candidate(container: ElementRef<'_>) -> Option<SearchResult> {
    let link_el = container.select(&TITLE_LINK).next()?;
    let link = link_el.value().attr("href")?.trim();
    if link.is_empty() {
        return None;
    }

    let title = fragment_text(link_el);
    if title.chars().count() <= MIN_TITLE_CHARS {
        return None;
    }

    let source = SOURCE_SELECTORS
        .iter()
        .find_map(|sel| container.select(sel).next())
        .map(byline_text)
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

    Some(SearchResult {
        title,
        link: link.to_string(),
        source,
    })
}
