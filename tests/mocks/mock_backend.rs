use async_trait::async_trait;
use call_analysis_cache::client::AsyncBackend;
use call_analysis_cache::error::{ApiError, ApiResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum MockReply {
    Json(Value),
    NetworkError,
}

/// Mock backend for testing.
///
/// Serves canned JSON per request path, can simulate transport failures, and
/// records every path it was asked for. Unknown paths answer with `NotFound`.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockBackend {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    calls: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockBackend {
    /// Create a new MockBackend with no canned replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend every request for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `path` with `body`.
    pub fn respond(&self, path: &str, body: Value) {
        let mut replies = self.replies.lock().unwrap();
        replies.insert(path.to_string(), MockReply::Json(body));
    }

    /// Fail `path` with a transport error.
    pub fn fail(&self, path: &str) {
        let mut replies = self.replies.lock().unwrap();
        replies.insert(path.to_string(), MockReply::NetworkError);
    }

    /// Number of requests made for `path`.
    pub fn call_count(&self, path: &str) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.iter().filter(|p| p.as_str() == path).count()
    }

    /// Number of requests made for any path.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Paths requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Reset the recorded calls.
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl AsyncBackend for MockBackend {
    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        self.calls.lock().unwrap().push(path.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().get(path).cloned();
        match reply {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::NetworkError) => {
                Err(ApiError::HttpError("Connection refused".to_string()))
            }
            None => Err(ApiError::NotFound(path.to_string())),
        }
    }
}
