// src/topics.rs
//! Topic registry: ordered `label -> keywords` clusters that make up one report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Topic {
    pub fn new<L, I, K>(label: L, keywords: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// True when there is nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.keywords.iter().all(|k| k.trim().is_empty())
    }
}

/// Built-in registry, in report order.
pub fn default_topics() -> Vec<Topic> {
    vec![
        Topic::new(
            "高考/中考教育",
            ["高考", "中考", "志愿填报", "分数线", "强基计划"],
        ),
        Topic::new("家庭教育", ["家庭教育", "亲子关系", "教育方法", "情商培养"]),
        Topic::new("成长学习", ["学习方法", "高效学习", "成长思维", "记忆力"]),
    ]
}
