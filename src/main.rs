//! Education hotspot tracker binary entrypoint.
//! Searches every topic, builds the Markdown digest and pushes it to PushPlus.
//!
//! Runs once by default (cron style). Set TRACKER_INTERVAL_SECS to keep running.

use anyhow::Result;
use std::process::ExitCode;
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use edu_hotspot_tracker::config::{load_config_default, TrackerConfig, ENV_TOKEN};
use edu_hotspot_tracker::notify::{require_token, DeliveryOutcome, Notifier, PushPlusNotifier};
use edu_hotspot_tracker::search::{BaiduNewsClient, PageFetcher};
use edu_hotspot_tracker::tracker::run_once;

const ENV_INTERVAL_SECS: &str = "TRACKER_INTERVAL_SECS";
const ENV_DRY_RUN: &str = "TRACKER_DRY_RUN";
const ENV_LOG_JSON: &str = "TRACKER_LOG_JSON";
/// Library logs use the `search`, `tracker` and `notify` targets.
const DEFAULT_LOG_FILTER: &str = "search=info,tracker=info,notify=info,warn";

fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().is_some_and(|v| v == "1")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    if env_flag(ENV_LOG_JSON) {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

async fn tick(
    cfg: &TrackerConfig,
    fetcher: &dyn PageFetcher,
    notifier: &dyn Notifier,
    dry_run: bool,
) {
    let today = chrono::Local::now().date_naive();
    let report = run_once(cfg, fetcher, today).await;

    if dry_run {
        tracing::info!(
            target: "notify",
            title = %report.title,
            "dry run, not sending\n{}",
            report.body
        );
        return;
    }
    if let DeliveryOutcome::Failed(reason) = notifier.send(&report).await {
        tracing::warn!(target: "notify", reason = %reason, "report not delivered");
    }
}

/// A slow run pushes the next tick back instead of firing a burst of reports.
fn schedule(secs: u64) -> Interval {
    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn run() -> Result<()> {
    let cfg = load_config_default()?;

    // Fatal before any client is built.
    let token = require_token(std::env::var(ENV_TOKEN).ok().as_deref())?;

    let fetcher = BaiduNewsClient::new(
        cfg.search.base_url.clone(),
        cfg.search.recency,
        &cfg.search.user_agent,
        cfg.search.timeout_secs,
    )?;
    let notifier = PushPlusNotifier::new(token, cfg.notify.endpoint.clone())
        .with_timeout(cfg.notify.timeout_secs);
    let dry_run = env_flag(ENV_DRY_RUN);

    let interval_secs: Option<u64> = std::env::var(ENV_INTERVAL_SECS)
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|&s| s > 0);

    match interval_secs {
        None => tick(&cfg, &fetcher, &notifier, dry_run).await,
        Some(secs) => {
            tracing::info!(target: "tracker", interval_secs = secs, "scheduled mode");
            let mut ticker = schedule(secs);
            loop {
                ticker.tick().await;
                tick(&cfg, &fetcher, &notifier, dry_run).await;
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "fatal configuration error");
            ExitCode::FAILURE
        }
    }
}
