//! Configuration loading from environment variables.

use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_FETCH_ATTEMPTS, DEFAULT_FETCH_RETRY_DELAY_MS, DEFAULT_SERVER_URL};
use crate::retry::RetryPolicy;

/// Runtime configuration for the notekeep engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_url: String,
    pub fetch_attempts: u32,
    pub fetch_retry_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            server_url: env::var("NOTEKEEP_SERVER")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            fetch_attempts: env::var("NOTEKEEP_FETCH_ATTEMPTS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_FETCH_ATTEMPTS),
            fetch_retry_delay_ms: env::var("NOTEKEEP_RETRY_DELAY_MS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_FETCH_RETRY_DELAY_MS),
        }
    }

    /// Retry policy for the list-fetch path derived from this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.fetch_attempts,
            delay: Duration::from_millis(self.fetch_retry_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            fetch_attempts: DEFAULT_FETCH_ATTEMPTS,
            fetch_retry_delay_ms: DEFAULT_FETCH_RETRY_DELAY_MS,
        }
    }
}
