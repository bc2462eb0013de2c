//! Call Analysis Cache - Main entry point
//!
//! Builds the caching client against the configured backend, optionally warms the caches
//! for a subject, then logs cache statistics on an interval until interrupted.

use anyhow::Result;
use call_analysis_cache::client::{AsyncBackend, AsyncBackendImpl};
use call_analysis_cache::{BackendClient, CachingFetchClient, Config, StatsPoller};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // RUST_LOG wins; LOG_LEVEL is the fallback
    let fallback = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Using analysis API at {}", config.api_base_url);

    let backend = BackendClient::new(&config);
    let backend = Arc::new(AsyncBackendImpl::new(backend)) as Arc<dyn AsyncBackend>;
    let client = Arc::new(CachingFetchClient::new(backend));

    if let Some(subject_id) = &config.preload_subject_id {
        client.preload(subject_id).await;
    }

    let mut poller = StatsPoller::start(
        client.clone(),
        Duration::from_secs(config.stats_poll_interval_secs),
    );

    info!(
        "Reporting cache statistics every {} seconds",
        config.stats_poll_interval_secs
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupt received");
                break;
            }
            snapshot = poller.next_snapshot() => {
                let Some(stats) = snapshot else {
                    break;
                };
                let stats = serde_json::to_string(&stats)
                    .unwrap_or_else(|_| "<invalid json>".to_string());
                info!(stats = %stats, "Cache statistics");
            }
        }
    }

    poller.shutdown();

    let summary = client.metrics().summary();
    info!(
        hits = summary.cache_hits_total,
        misses = summary.cache_misses_total,
        "Shutdown complete"
    );
    Ok(())
}
