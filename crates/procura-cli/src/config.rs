//! CLI configuration
//!
//! Read from a TOML file, then overridden by `PROCURA_API_URL` and
//! `PROCURA_API_KEY` when set.
//!
//! ```toml
//! log_filter = "procura_store=debug,info"
//! log_json = false
//!
//! [api]
//! base_url = "https://procura.example"
//! timeout_secs = 10
//!
//! [loader]
//! stale_after_ms = 300000
//! retry_attempts = 3
//! ```

use procura_store::{HttpConfig, LoaderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the API base URL
pub const API_URL_VAR: &str = "PROCURA_API_URL";
/// Environment variable overriding the API key
pub const API_KEY_VAR: &str = "PROCURA_API_KEY";

/// Configuration and fixture loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML was malformed
    #[error("invalid config {}: {source}", path.display())]
    Toml {
        /// File path
        path: PathBuf,
        /// Parse error
        #[source]
        source: toml::de::Error,
    },

    /// Fixture JSON was malformed
    #[error("invalid fixture {}: {source}", path.display())]
    Fixture {
        /// File path
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Top-level CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcuraConfig {
    /// Backend connection
    pub api: HttpConfig,
    /// Reference-data loading
    pub loader: LoaderConfig,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ProcuraConfig {
    fn default() -> Self {
        Self {
            api: HttpConfig::default(),
            loader: LoaderConfig::default(),
            log_filter: "info".to_owned(),
            log_json: false,
        }
    }
}

impl ProcuraConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With API base URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// With API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api.api_key = Some(key.into());
        self
    }

    /// With log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] naming `origin` when the text is malformed.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load from an optional file, then apply environment overrides
    ///
    /// # Errors
    /// Unreadable or malformed config file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let text =
                    std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
                Self::from_toml_str(&text, path)?
            }
            None => Self::default(),
        };
        Ok(config.with_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply `PROCURA_API_URL` / `PROCURA_API_KEY` from a variable lookup
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("api url overridden by {}", API_URL_VAR);
            self = self.with_api_url(url);
        }
        if let Some(key) = lookup(API_KEY_VAR).filter(|v| !v.trim().is_empty()) {
            self = self.with_api_key(key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ProcuraConfig::new();
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.loader.stale_after_ms, 300_000);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let text = r#"
            [api]
            base_url = "https://procura.example"

            [loader]
            retry_attempts = 5
        "#;
        let config = ProcuraConfig::from_toml_str(text, Path::new("inline.toml")).unwrap();

        assert_eq!(config.api.base_url, "https://procura.example");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.loader.retry_attempts, 5);
        assert_eq!(config.loader.stale_after_ms, 300_000);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn malformed_toml_names_file() {
        let err = ProcuraConfig::from_toml_str("api = [", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn env_overrides_apply() {
        let config = ProcuraConfig::new().with_overrides(|name| match name {
            API_URL_VAR => Some("https://override.example".to_owned()),
            API_KEY_VAR => Some("secret".to_owned()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://override.example");
        assert_eq!(config.api.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = ProcuraConfig::new().with_overrides(|_| Some("  ".to_owned()));
        assert_eq!(config, ProcuraConfig::new());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_filter = \"debug\"").unwrap();

        let config = ProcuraConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProcuraConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
