// src/notify/pushplus.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{DeliveryOutcome, Notifier};
use crate::report::Report;

pub const DEFAULT_ENDPOINT: &str = "http://www.pushplus.plus/send";

#[derive(Clone)]
pub struct PushPlusNotifier {
    token: String,
    endpoint: String,
    client: Client,
    timeout: Duration,
}

impl PushPlusNotifier {
    /// `token` comes from configuration; it is never read from the environment here.
    pub fn new(token: String, endpoint: impl Into<String>) -> Self {
        Self {
            token,
            endpoint: endpoint.into(),
            client: Client::new(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    async fn post(&self, payload: &PushPlusPayload<'_>) -> Result<()> {
        let rsp = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .context("pushplus post")?;

        if let Err(e) = rsp.error_for_status_ref() {
            return Err(anyhow!("PushPlus webhook HTTP error: {e}"));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for PushPlusNotifier {
    async fn send(&self, report: &Report) -> DeliveryOutcome {
        let payload = PushPlusPayload::markdown(&self.token, &report.title, &report.body);

        match self.post(&payload).await {
            Ok(()) => {
                tracing::info!(target: "notify", title = %report.title, "push successful");
                DeliveryOutcome::Delivered
            }
            Err(e) => {
                tracing::warn!(target: "notify", error = ?e, "push failed");
                DeliveryOutcome::Failed(format!("{e:#}"))
            }
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct PushPlusPayload<'a> {
    token: &'a str,
    title: &'a str,
    content: &'a str,
    template: &'static str,
}

impl<'a> PushPlusPayload<'a> {
    fn markdown(token: &'a str, title: &'a str, content: &'a str) -> Self {
        Self {
            token,
            title,
            content,
            template: "markdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_has_four_string_fields() {
        let p = PushPlusPayload::markdown("tok", "T", "## body");
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "token": "tok",
                "title": "T",
                "content": "## body",
                "template": "markdown"
            })
        );
    }
}
