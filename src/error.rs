//! Error types for the call analysis client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! The cache itself never fails; only network access and configuration loading do.

use thiserror::Error;

/// Errors that can occur when fetching from the analysis backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The blocking fetch task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("item".to_string());
        assert_eq!(err.to_string(), "Resource not found: item");

        let err = ConfigError::MissingVar("CALL_API_BASE_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: CALL_API_BASE_URL"
        );

        let err = ApiError::TaskJoin("cancelled".to_string());
        assert_eq!(err.to_string(), "Task join error: cancelled");
    }

    #[test]
    fn test_api_error_variants() {
        let err = ApiError::ApiError {
            status: 503,
            message: "Service unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service unavailable"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ApiError = parse_err.into();
        assert!(matches!(err, ApiError::JsonError(_)));
    }
}
