// src/search/query.rs
use serde::{Deserialize, Serialize};

use crate::topics::Topic;

/// How keywords inside one topic are combined.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeywordJoin {
    /// `a OR b OR c`, favours recall.
    Or,
    /// `a b c`, the engine treats whitespace as AND.
    #[default]
    And,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryStrategy {
    pub join: KeywordJoin,
    /// Platform filter terms, required alongside the keyword clause when non-empty.
    pub platforms: Vec<String>,
    /// Literal appended at the end (e.g. a source-type hint).
    pub qualifier: Option<String>,
    /// Literal prepended at the front.
    pub prefix: Option<String>,
}

impl Default for QueryStrategy {
    fn default() -> Self {
        Self {
            join: KeywordJoin::And,
            platforms: Vec::new(),
            qualifier: None,
            prefix: Some("教育".to_string()),
        }
    }
}

fn clean(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build the search query for `topic`. Never fails and never returns an empty string.
pub fn build_query(topic: &Topic, strategy: &QueryStrategy) -> String {
    let keywords = clean(&topic.keywords);
    let platforms = clean(&strategy.platforms);

    let mut clause = match strategy.join {
        KeywordJoin::Or => keywords.join(" OR "),
        KeywordJoin::And => keywords.join(" "),
    };

    if !platforms.is_empty() && !clause.is_empty() {
        clause = format!("({}) AND ({})", clause, platforms.join(" OR "));
    }

    let prefix = strategy
        .prefix
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let qualifier = strategy
        .qualifier
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    // An empty keyword list falls back to the topic label.
    let body = if clause.is_empty() {
        topic.label.trim()
    } else {
        clause.as_str()
    };

    let parts: Vec<&str> = prefix
        .into_iter()
        .chain(Some(body).filter(|b| !b.is_empty()))
        .chain(qualifier)
        .collect();

    if parts.is_empty() {
        "教育".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Topic {
        Topic::new("A", ["x", "y"])
    }

    #[test]
    fn and_join_uses_whitespace_with_prefix() {
        let q = build_query(&topic(), &QueryStrategy::default());
        assert_eq!(q, "教育 x y");
    }

    #[test]
    fn or_join_with_platform_filter_and_qualifier() {
        let strategy = QueryStrategy {
            join: KeywordJoin::Or,
            platforms: vec!["微博".into(), " 知乎 ".into(), "".into()],
            qualifier: Some("公众号".into()),
            prefix: None,
        };
        let q = build_query(&topic(), &strategy);
        assert_eq!(q, "(x OR y) AND (微博 OR 知乎) 公众号");
    }

    #[test]
    fn empty_keywords_still_produce_a_query() {
        let empty = Topic::new("家庭教育", Vec::<String>::new());
        let q = build_query(&empty, &QueryStrategy::default());
        assert_eq!(q, "教育 家庭教育");

        let bare = QueryStrategy {
            prefix: None,
            ..QueryStrategy::default()
        };
        assert_eq!(build_query(&empty, &bare), "家庭教育");
        assert!(!build_query(&Topic::new("", Vec::<String>::new()), &bare).is_empty());
    }
}
