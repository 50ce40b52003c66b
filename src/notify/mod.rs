// src/notify/mod.rs
pub mod pushplus;

use async_trait::async_trait;

use crate::report::Report;

pub use pushplus::PushPlusNotifier;

/// Best-effort delivery result. Never an error: the report already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, report: &Report) -> DeliveryOutcome;
}

/// Resolve the webhook token; absent or blank is a fatal configuration error.
pub fn require_token(token: Option<&str>) -> anyhow::Result<String> {
    match token.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => anyhow::bail!("missing PushPlus token (set {})", crate::config::ENV_TOKEN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_must_be_present_and_non_blank() {
        assert!(require_token(None).is_err());
        assert!(require_token(Some("   ")).is_err());
        assert_eq!(require_token(Some(" abc ")).unwrap(), "abc");
    }
}
