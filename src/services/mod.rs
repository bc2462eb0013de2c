//! Application service layer.
//!
//! Services sit between callers and the backend client. The caching fetch client
//! decides what is served from cache, what goes to the network, and what is stored;
//! the stats poller reports on it.

pub mod caching_client;
pub mod keys;
pub mod stats_poller;

pub use caching_client::{
    item_ttl, CachingFetchClient, ClientCacheStats, ResourceCaches, AGGREGATES_MAX_SIZE,
    AGGREGATES_TTL, ITEMS_MAX_SIZE, ITEM_FULL_TTL, ITEM_SUMMARY_TTL, LISTINGS_MAX_SIZE,
    LISTINGS_TTL,
};
pub use stats_poller::StatsPoller;
