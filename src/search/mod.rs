// src/search/mod.rs
pub mod aggregate;
pub mod client;
pub mod extract;
pub mod query;
pub mod types;

pub use aggregate::{aggregate, Aggregation, PageStop, Pagination};
pub use client::{BaiduNewsClient, FetchOutcome, PageFetcher, Recency, UserAgent};
pub use extract::{CssStrategy, Extraction, ExtractionStrategy, ResultExtractor};
pub use query::{build_query, KeywordJoin, QueryStrategy};
pub use types::SearchResult;
