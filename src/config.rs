//! Configuration management for the call analysis client.
//!
//! This module handles loading and validating configuration from environment variables,
//! optionally seeded from a `.env` file. Cache sizes and TTLs are fixed per resource class
//! and are deliberately not part of the configuration.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the call analysis client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Analysis API base URL
    pub api_base_url: String,

    /// Optional bearer token forwarded to the backend
    pub api_token: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Cache statistics polling interval in seconds (default: 10)
    pub stats_poll_interval_secs: u64,

    /// Subject to warm the caches for on startup, if any
    pub preload_subject_id: Option<String>,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CALL_API_BASE_URL`: Base URL for the analysis API
    ///
    /// Optional environment variables:
    /// - `CALL_API_TOKEN`: Bearer token (default: none)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `STATS_POLL_INTERVAL_SECS`: Stats polling period (default: 10)
    /// - `PRELOAD_SUBJECT_ID`: Subject to preload on startup (default: none)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("CALL_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("CALL_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "CALL_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let api_token = Self::optional_env("CALL_API_TOKEN");
        let request_timeout = Self::parse_env_nonzero_u64("REQUEST_TIMEOUT", 10)?;
        let stats_poll_interval_secs =
            Self::parse_env_nonzero_u64("STATS_POLL_INTERVAL_SECS", 10)?;
        let preload_subject_id = Self::optional_env("PRELOAD_SUBJECT_ID");
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            api_token,
            request_timeout,
            stats_poll_interval_secs,
            preload_subject_id,
            log_level,
        })
    }

    /// Read an optional variable, treating blank values as unset.
    fn optional_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
    }

    /// Parse an environment variable as a positive u64 with a default value.
    fn parse_env_nonzero_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => match val.parse::<u64>() {
                Ok(parsed) if parsed > 0 => Ok(parsed),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be a positive number, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            api_token: None,
            request_timeout: 10,
            stats_poll_interval_secs: 10,
            preload_subject_id: None,
            log_level: "info".to_string(),
        }
    }
}
