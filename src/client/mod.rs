//! HTTP client for the call analysis backend.
//!
//! This module provides a synchronous JSON fetch client that can be used from async
//! contexts via `tokio::task::spawn_blocking`. It handles URL construction, the optional
//! bearer token, and mapping transport/status failures onto [`ApiError`]. Response bodies
//! are returned as untyped JSON; interpreting them is the caller's business.

mod async_wrapper;
pub use async_wrapper::{AsyncBackend, AsyncBackendImpl};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{HttpTimer, Metrics};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Blocking JSON-over-HTTP client for the analysis backend.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct BackendClient {
    /// Base URL for the backend API
    base_url: String,

    /// Optional bearer token
    api_token: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl BackendClient {
    /// Create a new BackendClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            api_token: config.api_token.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a BackendClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_token: None,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path (which may carry a query string).
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> Result<ureq::Response, ApiError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(token) = &self.api_token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        match request.call() {
            Ok(response) => {
                tracing::debug!("GET {} - Success (status: {})", url, response.status());
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                let error = self.map_error(e);
                tracing::debug!("GET {} - Error: {}", url, error);
                timer.complete_with_error();
                Err(error)
            }
        }
    }

    /// Map a ureq error to an ApiError.
    fn map_error(&self, error: ureq::Error) -> ApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => ApiError::Unauthorized,
                    404 => ApiError::NotFound(message),
                    429 => ApiError::RateLimitExceeded,
                    _ => ApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ApiError::Timeout
                } else {
                    ApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// GET `path` and decode the body as JSON.
    pub fn get_json(&self, path: &str) -> ApiResult<Value> {
        let response = self.get(path)?;
        let body = response
            .into_string()
            .map_err(|e| ApiError::HttpError(e.to_string()))?;

        serde_json::from_str::<Value>(&body).map_err(ApiError::JsonError)
    }
}
