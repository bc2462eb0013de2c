//! Async wrapper around the synchronous BackendClient.
//!
//! This module provides an async interface to the blocking [`BackendClient`] by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::BackendClient;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async JSON fetch capability the caching client is built on.
///
/// Implementations return the decoded body for a successful HTTP exchange and an
/// error for anything transport-level, including undecodable bodies.
#[async_trait]
pub trait AsyncBackend: Send + Sync {
    /// GET `path` (relative to the backend base URL, query string included).
    async fn get_json(&self, path: &str) -> ApiResult<Value>;
}

/// Async wrapper around the synchronous BackendClient.
#[derive(Clone)]
pub struct AsyncBackendImpl {
    client: Arc<BackendClient>,
}

impl AsyncBackendImpl {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Access the wrapped blocking client.
    pub fn inner(&self) -> &BackendClient {
        &self.client
    }
}

#[async_trait]
impl AsyncBackend for AsyncBackendImpl {
    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let client = self.client.clone();
        let path = path.to_string();

        tokio::task::spawn_blocking(move || client.get_json(&path))
            .await
            .map_err(|e| ApiError::TaskJoin(e.to_string()))?
    }
}
