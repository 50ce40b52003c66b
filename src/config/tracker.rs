// src/config/tracker.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::notify::pushplus::DEFAULT_ENDPOINT;
use crate::report::ReportSettings;
use crate::search::aggregate::{
    Pagination, DEFAULT_BLOCK_THRESHOLD, DEFAULT_DEPTH, DEFAULT_PER_PAGE,
};
use crate::search::client::DEFAULT_BASE_URL;
use crate::search::{QueryStrategy, Recency, UserAgent};
use crate::topics::{default_topics, Topic};

pub const ENV_CONFIG_PATH: &str = "TRACKER_CONFIG_PATH";
/// Webhook credential. Read once in the binary and passed down explicitly.
pub const ENV_TOKEN: &str = "PUSHPLUS_TOKEN";

const DEFAULT_CONFIG_PATH: &str = "config/tracker.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    pub base_url: String,
    pub recency: Recency,
    pub user_agent: UserAgent,
    pub timeout_secs: u64,
    /// Max pages per topic.
    pub depth: usize,
    pub per_page: usize,
    /// Body length (chars) under which a non-first page counts as blocked.
    pub block_threshold: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            recency: Recency::Day,
            user_agent: UserAgent::Mobile,
            timeout_secs: 15,
            depth: DEFAULT_DEPTH,
            per_page: DEFAULT_PER_PAGE,
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
        }
    }
}

impl SearchSettings {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            depth: self.depth,
            per_page: self.per_page,
            block_threshold: self.block_threshold,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotifySettings {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrackerConfig {
    pub search: SearchSettings,
    pub query: QueryStrategy,
    pub report: ReportSettings,
    pub notify: NotifySettings,
    /// Replaces the built-in registry when present.
    pub topics: Option<Vec<Topic>>,
}

impl TrackerConfig {
    pub fn topics(&self) -> Vec<Topic> {
        self.topics.clone().unwrap_or_else(default_topics)
    }

    fn sanitize(mut self) -> Self {
        self.search.per_page = self.search.per_page.max(1);
        self.search.timeout_secs = self.search.timeout_secs.max(1);
        self.notify.timeout_secs = self.notify.timeout_secs.max(1);
        if self.search.base_url.trim().is_empty() {
            self.search.base_url = DEFAULT_BASE_URL.to_string();
        }
        if self.notify.endpoint.trim().is_empty() {
            self.notify.endpoint = DEFAULT_ENDPOINT.to_string();
        }
        self
    }
}

fn parse_config(s: &str) -> Result<TrackerConfig> {
    let cfg: TrackerConfig = toml::from_str(s)?;
    Ok(cfg.sanitize())
}

/// Load config from an explicit TOML path.
pub fn load_config_from(path: &Path) -> Result<TrackerConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading tracker config from {}", path.display()))?;
    parse_config(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Load config using env var + fallbacks:
/// 1) $TRACKER_CONFIG_PATH
/// 2) config/tracker.toml
/// 3) built-in defaults
pub fn load_config_default() -> Result<TrackerConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_CONFIG_PATH);
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    Ok(TrackerConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::KeywordJoin;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, TrackerConfig::default());
        assert_eq!(cfg.search.pagination(), Pagination::default());
        assert_eq!(cfg.topics().len(), 3);
    }

    #[test]
    fn partial_overrides_and_sanitizing() {
        let cfg = parse_config(
            r#"
[search]
recency = "week"
user_agent = "desktop"
depth = 2
per_page = 0
block_threshold = 5000

[query]
join = "or"
platforms = ["微博", "抖音"]
prefix = "教育"

[report]
display_limit = 5
show_count = true

[[topics]]
label = "A"
keywords = ["x", "y"]
"#,
        )
        .unwrap();
        assert_eq!(cfg.search.recency, Recency::Week);
        assert_eq!(cfg.search.user_agent, UserAgent::Desktop);
        assert_eq!(cfg.search.per_page, 1);
        assert_eq!(cfg.search.block_threshold, 5000);
        assert_eq!(cfg.search.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.query.join, KeywordJoin::Or);
        assert_eq!(cfg.report.display_limit, 5);
        assert!(cfg.report.show_count);
        assert_eq!(cfg.report.footer, ReportSettings::default().footer);
        assert_eq!(cfg.topics(), vec![Topic::new("A", ["x", "y"])]);
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        assert!(parse_config("[search]\nrecency = \"month\"").is_err());
    }
}
