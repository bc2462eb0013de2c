//! Call Analysis Cache - a bandwidth-optimized caching client for the call-recording
//! analysis API.
//!
//! Listings, individual recordings and dashboard aggregates are fetched as JSON from the
//! backend and kept in bounded, per-resource TTL caches so repeat views cost no network
//! round-trip.
//!
//! # Architecture
//!
//! - **cache**: Size-bounded TTL cache with FIFO eviction and lazy expiry
//! - **client**: Blocking HTTP JSON client and its async wrapper
//! - **services**: Caching fetch client, cache key construction, stats polling
//! - **domain**: Resource classes and item include levels
//! - **metrics**: HTTP and cache hit/miss counters
//! - **config**: Configuration from environment variables
//! - **error**: Custom error types for precise error handling

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod services;

pub use cache::{BoundedTtlCache, CacheStats};
pub use client::{AsyncBackend, AsyncBackendImpl, BackendClient};
pub use config::Config;
pub use domain::{ItemInclude, Resource};
pub use error::{ApiError, ApiResult, ConfigError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use services::{CachingFetchClient, ClientCacheStats, ResourceCaches, StatsPoller};
