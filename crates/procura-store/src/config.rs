//! Store configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference-data loader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Milliseconds a fetched list is served without refetching
    pub stale_after_ms: u64,
    /// Attempts per fetch, including the first
    pub retry_attempts: u32,
    /// Fixed pause between attempts, in milliseconds
    pub retry_backoff_ms: u64,
    /// Maximum cached lists per entity kind
    pub max_entries: u64,
}

impl LoaderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With staleness window
    #[inline]
    #[must_use]
    pub fn with_stale_after(mut self, window: Duration) -> Self {
        self.stale_after_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With retry attempts
    #[inline]
    #[must_use]
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// With retry backoff
    #[inline]
    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Staleness window
    #[inline]
    #[must_use]
    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_after_ms)
    }

    /// Pause between attempts
    #[inline]
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            stale_after_ms: 300_000,
            retry_attempts: 3,
            retry_backoff_ms: 250,
            max_entries: 256,
        }
    }
}

/// HTTP backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL, e.g. `https://procura.example`
    pub base_url: String,
    /// Bearer/API key
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Create configuration for a base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// With API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_owned(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.stale_after(), Duration::from_secs(300));
        assert_eq!(config.retry_attempts, 3);
    }

    #[test]
    fn builders() {
        let config = LoaderConfig::new()
            .with_stale_after(Duration::from_secs(60))
            .with_retry_attempts(5)
            .with_retry_backoff(Duration::ZERO);
        assert_eq!(config.stale_after_ms, 60_000);
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.retry_backoff(), Duration::ZERO);
    }

    #[test]
    fn partial_deserialization_uses_defaults() {
        let config: LoaderConfig = serde_json::from_str(r#"{"retry_attempts": 1}"#).unwrap();
        assert_eq!(config.retry_attempts, 1);
        assert_eq!(config.stale_after_ms, 300_000);
    }

    #[test]
    fn sub_second_window_is_kept() {
        let config = LoaderConfig::new().with_stale_after(Duration::from_millis(500));
        assert_eq!(config.stale_after(), Duration::from_millis(500));
    }
}
