// src/report.rs
//! Markdown digest assembly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::search::SearchResult;
use crate::topics::Topic;

/// Aggregated results for one topic, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicReport {
    pub topic: Topic,
    pub results: Vec<SearchResult>,
}

/// Final document. One per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSettings {
    /// Max bullets per topic.
    pub display_limit: usize,
    /// Annotate section headers with the total hit count.
    pub show_count: bool,
    pub title_prefix: String,
    pub header: String,
    pub section_suffix: String,
    pub fallback: String,
    pub footer: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            display_limit: 10,
            show_count: false,
            title_prefix: "全网热点追踪".to_string(),
            header: "## 🔥 全网热点追踪 - 最近一周趋势 (扩大范围)".to_string(),
            section_suffix: "热门讨论".to_string(),
            fallback: "今日未发现符合所有主题的明确热点。请尝试手动扩大搜索范围。".to_string(),
            footer: "*💡 结果来自百度新闻聚合 (最近七天，范围已扩大)。*".to_string(),
        }
    }
}

pub fn report_title(settings: &ReportSettings, date: NaiveDate) -> String {
    format!("{} ({})", settings.title_prefix, date.format("%Y-%m-%d"))
}

fn bullet(r: &SearchResult) -> String {
    format!("- [{}]({}) ({})", r.title, r.link, r.source)
}

/// Render all topic sections into one Markdown report.
/// Topics without results are left out; if none have any, the fallback line is used.
pub fn build_report(
    sections: &[TopicReport],
    date: NaiveDate,
    settings: &ReportSettings,
) -> Report {
    let mut lines: Vec<String> = vec![settings.header.clone(), "---".to_string()];
    let mut any = false;

    for section in sections.iter().filter(|s| !s.results.is_empty()) {
        any = true;
        let mut heading = format!(
            "### 🚀 {} - {}",
            section.topic.label, settings.section_suffix
        );
        if settings.show_count {
            heading.push_str(&format!(" (共 {} 条)", section.results.len()));
        }
        lines.push(heading);
        lines.extend(
            section
                .results
                .iter()
                .take(settings.display_limit)
                .map(bullet),
        );
        lines.push(String::new());
    }

    if !any {
        lines.push(settings.fallback.clone());
    }

    lines.push("---".to_string());
    lines.push(settings.footer.clone());

    Report {
        title: report_title(settings, date),
        body: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()
    }

    fn hit(i: usize) -> SearchResult {
        SearchResult {
            title: format!("Headline number {i} here"),
            link: format!("https://news.example/{i}"),
            source: format!("S{i}"),
        }
    }

    fn section(label: &str, n: usize) -> TopicReport {
        TopicReport {
            topic: Topic::new(label, ["k"]),
            results: (0..n).map(hit).collect(),
        }
    }

    #[test]
    fn title_carries_the_date() {
        let r = build_report(&[], date(), &ReportSettings::default());
        assert_eq!(r.title, "全网热点追踪 (2025-06-07)");
    }

    #[test]
    fn fallback_when_nothing_found() {
        let s = ReportSettings::default();
        let r = build_report(&[section("A", 0), section("B", 0)], date(), &s);
        assert!(!r.body.contains("###"));
        assert!(r.body.contains(&s.fallback));
        assert!(r.body.starts_with(&s.header));
        assert!(r.body.ends_with(&s.footer));
    }

    #[test]
    fn empty_topics_are_omitted_and_order_kept() {
        let s = ReportSettings::default();
        let sections = [section("A", 1), section("B", 0), section("C", 2)];
        let r = build_report(&sections, date(), &s);
        assert!(!r.body.contains(&s.fallback));
        assert!(!r.body.contains("B - "));
        let a = r.body.find("### 🚀 A - 热门讨论").unwrap();
        let c = r.body.find("### 🚀 C - 热门讨论").unwrap();
        assert!(a < c);
        assert!(r
            .body
            .contains("- [Headline number 0 here](https://news.example/0) (S0)"));
    }

    #[test]
    fn bullets_truncated_to_display_limit_with_count() {
        let s = ReportSettings {
            display_limit: 5,
            show_count: true,
            ..ReportSettings::default()
        };
        let r = build_report(&[section("A", 12)], date(), &s);
        assert_eq!(r.body.lines().filter(|l| l.starts_with("- [")).count(), 5);
        assert!(r.body.contains("### 🚀 A - 热门讨论 (共 12 条)"));
        assert!(r.body.contains("https://news.example/4"));
        assert!(!r.body.contains("https://news.example/5"));
    }
}
