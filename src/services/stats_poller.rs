//! Periodic cache statistics polling.
//!
//! A [`StatsPoller`] owns a background task that snapshots
//! [`CachingFetchClient::stats`] on a fixed interval. The task is aborted on
//! [`StatsPoller::shutdown`] or when the poller is dropped.

use crate::services::caching_client::{CachingFetchClient, ClientCacheStats};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Shortest accepted polling period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Background poller exposing the latest cache statistics.
pub struct StatsPoller {
    latest: watch::Receiver<Option<ClientCacheStats>>,
    handle: JoinHandle<()>,
}

impl StatsPoller {
    /// Start polling `client` every `period`. The first snapshot is taken immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(client: Arc<CachingFetchClient>, period: Duration) -> Self {
        let (tx, latest) = watch::channel(None);
        let period = period.max(MIN_PERIOD);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if tx.send(Some(client.stats())).is_err() {
                    break;
                }
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "Stats poller started");

        Self { latest, handle }
    }

    /// The most recent snapshot, if one has been taken.
    pub fn latest(&self) -> Option<ClientCacheStats> {
        self.latest.borrow().clone()
    }

    /// Wait for the next snapshot. Returns `None` once the poller has stopped.
    pub async fn next_snapshot(&mut self) -> Option<ClientCacheStats> {
        self.latest.changed().await.ok()?;
        self.latest.borrow_and_update().clone()
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop polling. The last snapshot stays readable.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
