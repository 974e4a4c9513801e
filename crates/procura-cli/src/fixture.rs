//! Offline fixtures
//!
//! A fixture file is a JSON object with optional `tables` (endpoint → rows),
//! `documents` (endpoint → object) and `rpcs` (name → canned response),
//! served through an [`InMemoryExecutor`].

use crate::config::ConfigError;
use procura_store::InMemoryExecutor;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Parsed fixture file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Rows per endpoint
    pub tables: BTreeMap<String, Vec<Value>>,
    /// Single documents per endpoint
    pub documents: BTreeMap<String, Value>,
    /// Canned responses per remote procedure
    pub rpcs: BTreeMap<String, Value>,
}

impl Fixture {
    /// Read a fixture file
    ///
    /// # Errors
    /// Unreadable file or malformed JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Fixture {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the executor serving this fixture
    #[must_use]
    pub fn into_executor(self) -> InMemoryExecutor {
        tracing::info!(
            "serving fixture: {} tables, {} documents, {} rpcs",
            self.tables.len(),
            self.documents.len(),
            self.rpcs.len()
        );

        let mut executor = InMemoryExecutor::new();
        for (endpoint, rows) in self.tables {
            executor = executor.with_table(endpoint, rows);
        }
        for (endpoint, document) in self.documents {
            executor = executor.with_document(endpoint, document);
        }
        for (name, response) in self.rpcs {
            executor = executor.with_rpc(name, move |_| Ok(response.clone()));
        }
        executor
    }
}
