//! Caching fetch client.
//!
//! Mediates between callers and the analysis backend using one bounded TTL cache per
//! resource class. Hits are served without touching the network; misses fetch, and only
//! bodies with `"success": true` are stored. Concurrent misses for the same key are not
//! coalesced: each one reaches the backend.

use crate::cache::{BoundedTtlCache, CacheStats};
use crate::client::AsyncBackend;
use crate::domain::{ItemInclude, Resource};
use crate::error::ApiResult;
use crate::metrics::Metrics;
use crate::services::keys;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maximum cached listing pages.
pub const LISTINGS_MAX_SIZE: usize = 50;
/// TTL for listing pages.
pub const LISTINGS_TTL: Duration = Duration::from_secs(10 * 60);
/// Maximum cached items across all include levels.
pub const ITEMS_MAX_SIZE: usize = 100;
/// TTL for summary items.
pub const ITEM_SUMMARY_TTL: Duration = Duration::from_secs(30 * 60);
/// TTL for items fetched with a fuller include.
pub const ITEM_FULL_TTL: Duration = Duration::from_secs(60 * 60);
/// Maximum cached aggregate views.
pub const AGGREGATES_MAX_SIZE: usize = 10;
/// TTL for aggregate views.
pub const AGGREGATES_TTL: Duration = Duration::from_secs(15 * 60);

/// Page fetched by [`CachingFetchClient::preload`].
const PRELOAD_PAGE_SIZE: u32 = 20;

static SHARED_CACHES: Lazy<ResourceCaches> = Lazy::new(ResourceCaches::new);

/// The three per-resource caches.
///
/// Cloning yields handles to the same storage, so any number of clients built from
/// one `ResourceCaches` converge on the same warm entries.
#[derive(Debug, Clone)]
pub struct ResourceCaches {
    pub listings: BoundedTtlCache<Value>,
    pub items: BoundedTtlCache<Value>,
    pub aggregates: BoundedTtlCache<Value>,
}

impl ResourceCaches {
    /// Fresh, isolated caches with the standard sizes and TTLs.
    pub fn new() -> Self {
        Self {
            listings: BoundedTtlCache::new(LISTINGS_MAX_SIZE, LISTINGS_TTL),
            items: BoundedTtlCache::new(ITEMS_MAX_SIZE, ITEM_SUMMARY_TTL),
            aggregates: BoundedTtlCache::new(AGGREGATES_MAX_SIZE, AGGREGATES_TTL),
        }
    }

    /// Handles to the process-wide caches.
    pub fn shared() -> Self {
        SHARED_CACHES.clone()
    }

    /// Snapshot statistics for every resource class.
    pub fn stats(&self) -> ClientCacheStats {
        ClientCacheStats {
            listings: self.listings.stats(),
            items: self.items.stats(),
            aggregates: self.aggregates.stats(),
        }
    }
}

impl Default for ResourceCaches {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for all resource classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCacheStats {
    pub listings: CacheStats,
    pub items: CacheStats,
    pub aggregates: CacheStats,
}

/// Whether a backend body reports success.
fn is_success(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(true)
}

/// TTL for an item at the given include level.
pub fn item_ttl(include: ItemInclude) -> Duration {
    if include.is_full() {
        ITEM_FULL_TTL
    } else {
        ITEM_SUMMARY_TTL
    }
}

/// Fetch client that caches successful backend responses per resource class.
pub struct CachingFetchClient {
    backend: Arc<dyn AsyncBackend>,
    caches: ResourceCaches,
    metrics: Metrics,
}

impl CachingFetchClient {
    /// Create a client backed by the process-wide caches.
    pub fn new(backend: Arc<dyn AsyncBackend>) -> Self {
        Self::with_caches(backend, ResourceCaches::shared())
    }

    /// Create a client over the given caches.
    pub fn with_caches(backend: Arc<dyn AsyncBackend>, caches: ResourceCaches) -> Self {
        Self {
            backend,
            caches,
            metrics: Metrics::new(),
        }
    }

    /// The caches this client reads and writes.
    pub fn caches(&self) -> &ResourceCaches {
        &self.caches
    }

    /// Hit/miss counters for this client.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Serve `key` from `cache` unless refreshing, otherwise fetch `path` and cache a
    /// successful body under `key` for `ttl`.
    async fn fetch_cached(
        &self,
        cache: &BoundedTtlCache<Value>,
        key: String,
        path: String,
        ttl: Duration,
        force_refresh: bool,
    ) -> ApiResult<Value> {
        if !force_refresh {
            if let Some(cached) = cache.get(&key) {
                self.metrics.record_cache_hit();
                debug!(key = %key, "Cache hit");
                return Ok(cached);
            }
            self.metrics.record_cache_miss();
            debug!(key = %key, "Cache miss");
        } else {
            debug!(key = %key, "Forced refresh");
        }

        let body = self.backend.get_json(&path).await?;

        if is_success(&body) {
            cache.insert_with_ttl(key, body.clone(), ttl);
        } else {
            warn!(key = %key, path = %path, "Backend reported failure; response not cached");
        }

        Ok(body)
    }

    /// Get a page of listings, optionally filtered by a search term.
    pub async fn get_listings(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
        force_refresh: bool,
    ) -> ApiResult<Value> {
        self.fetch_cached(
            &self.caches.listings,
            keys::listings_key(page, page_size, search),
            keys::listings_path(page, page_size, search),
            LISTINGS_TTL,
            force_refresh,
        )
        .await
    }

    /// Get a single item at the requested include level.
    ///
    /// Summaries are cached for 30 minutes, fuller includes for 60.
    pub async fn get_item(
        &self,
        id: &str,
        include: ItemInclude,
        force_refresh: bool,
    ) -> ApiResult<Value> {
        self.fetch_cached(
            &self.caches.items,
            keys::item_key(id, include),
            keys::item_path(id, include),
            item_ttl(include),
            force_refresh,
        )
        .await
    }

    /// Get the aggregate dashboard view.
    pub async fn get_aggregates(
        &self,
        include_activity: bool,
        force_refresh: bool,
    ) -> ApiResult<Value> {
        self.fetch_cached(
            &self.caches.aggregates,
            keys::aggregates_key(include_activity),
            keys::aggregates_path(include_activity),
            AGGREGATES_TTL,
            force_refresh,
        )
        .await
    }

    /// Invalidate by resource name. Unknown names are ignored.
    pub fn invalidate(&self, resource: &str, identifier: Option<&str>) {
        match resource.parse::<Resource>() {
            Ok(resource) => self.invalidate_resource(resource, identifier),
            Err(e) => debug!("Ignoring invalidation: {}", e),
        }
    }

    /// Invalidate cached entries for a resource class.
    ///
    /// Listings and aggregates are always cleared wholesale. Items with an identifier
    /// lose exactly the keys for each include level; without one the whole items
    /// cache is cleared.
    pub fn invalidate_resource(&self, resource: Resource, identifier: Option<&str>) {
        match (resource, identifier) {
            (Resource::Listings, _) => self.caches.listings.clear(),
            (Resource::Aggregates, _) => self.caches.aggregates.clear(),
            (Resource::Items, Some(id)) => {
                for include in ItemInclude::ALL_VARIANTS {
                    self.caches.items.remove(&keys::item_key(id, include));
                }
            }
            (Resource::Items, None) => self.caches.items.clear(),
        }

        info!(
            resource = %resource,
            identifier = identifier.unwrap_or("*"),
            "Cache invalidated"
        );
    }

    /// Statistics for every resource class.
    pub fn stats(&self) -> ClientCacheStats {
        self.caches.stats()
    }

    /// Warm the first listings page and the aggregates view for a subject.
    ///
    /// Failures are logged and swallowed.
    pub async fn preload(&self, subject_id: &str) {
        info!(subject_id = %subject_id, "Preloading caches");

        let (listings, aggregates) = tokio::join!(
            self.get_listings(1, PRELOAD_PAGE_SIZE, None, false),
            self.get_aggregates(false, false),
        );

        if let Err(e) = listings {
            warn!(subject_id = %subject_id, "Listings preload failed: {}", e);
        }
        if let Err(e) = aggregates {
            warn!(subject_id = %subject_id, "Aggregates preload failed: {}", e);
        }
    }
}
