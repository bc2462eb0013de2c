//! Caching utilities for the call analysis client.
//!
//! This module provides a size-bounded, time-based cache with FIFO eviction.

pub mod bounded_ttl_cache;

pub use bounded_ttl_cache::{format_bytes, BoundedTtlCache, CacheStats};
