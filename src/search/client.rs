// src/search/client.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.baidu.com/s?tn=news&rtt=4&gpc=1";

const MOBILE_UA: &str = "Mozilla/5.0 (Linux; Android 14; SM-S928B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";
const DESKTOP_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Recency window passed to the engine as `qdr`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recency {
    #[default]
    Day,
    Week,
}

impl Recency {
    fn qdr(self) -> u8 {
        match self {
            Recency::Day => 1,
            Recency::Week => 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserAgent {
    #[default]
    Mobile,
    Desktop,
    Custom(String),
}

impl UserAgent {
    pub fn as_str(&self) -> &str {
        match self {
            UserAgent::Mobile => MOBILE_UA,
            UserAgent::Desktop => DESKTOP_UA,
            UserAgent::Custom(s) => s,
        }
    }
}

/// Result of fetching one result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response with its body.
    Page { status: u16, body: String },
    /// Timeout, connection error or non-2xx status. Treated as zero results.
    Failed { reason: String },
}

/// Anything that can return the raw markup of a result page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, query: &str, page: usize, per_page: usize) -> FetchOutcome;
    fn name(&self) -> &'static str;
}

/// Build the request URL for `page`: encoded query plus `pn` offset.
pub fn page_url(
    base_url: &str,
    recency: Recency,
    query: &str,
    page: usize,
    per_page: usize,
) -> String {
    format!(
        "{}&qdr={}&wd={}&pn={}",
        base_url.trim_end_matches('&'),
        recency.qdr(),
        urlencoding::encode(query),
        page.saturating_mul(per_page)
    )
}

pub struct BaiduNewsClient {
    client: Client,
    base_url: String,
    recency: Recency,
}

impl BaiduNewsClient {
    pub fn new(
        base_url: impl Into<String>,
        recency: Recency,
        ua: &UserAgent,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(ua.as_str())
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("building search http client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            recency,
        })
    }

    async fn get(&self, url: &str) -> Result<(u16, String)> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("search http get()")?
            .error_for_status()
            .context("search non-2xx")?;
        let status = resp.status().as_u16();
        let body = resp.text().await.context("search http .text()")?;
        Ok((status, body))
    }
}

#[async_trait]
impl PageFetcher for BaiduNewsClient {
    async fn fetch_page(&self, query: &str, page: usize, per_page: usize) -> FetchOutcome {
        let url = page_url(&self.base_url, self.recency, query, page, per_page);
        let t0 = std::time::Instant::now();
        counter!("search_pages_total").increment(1);

        let outcome = match self.get(&url).await {
            Ok((status, body)) => {
                tracing::info!(
                    target: "search",
                    page,
                    status,
                    len = body.chars().count(),
                    "search status"
                );
                FetchOutcome::Page { status, body }
            }
            Err(e) => {
                tracing::warn!(target: "search", page, error = ?e, "search error");
                counter!("search_page_failures_total").increment(1);
                FetchOutcome::Failed {
                    reason: format!("{e:#}"),
                }
            }
        };

        histogram!("search_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        outcome
    }

    fn name(&self) -> &'static str {
        "BaiduNews"
    }
}
