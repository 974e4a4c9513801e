//! In-process executor backed by JSON tables
//!
//! Serves fixture data for tests and offline reports. Parameters filter
//! table rows by field equality (or membership, for array fields); a
//! parameter naming a field the row does not have is ignored.

use crate::error::{StoreError, StoreResult};
use crate::executor::{QueryExecutor, QueryParams};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

type RpcHandler = Arc<dyn Fn(&QueryParams) -> StoreResult<Value> + Send + Sync>;

/// [`QueryExecutor`] over in-memory tables
#[derive(Default)]
pub struct InMemoryExecutor {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    documents: RwLock<HashMap<String, Value>>,
    rpcs: RwLock<HashMap<String, RpcHandler>>,
    failures: Mutex<HashMap<String, usize>>,
    calls: DashMap<String, usize>,
    latency: Mutex<Option<Duration>>,
}

impl fmt::Debug for InMemoryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryExecutor")
            .field("tables", &self.tables.read().keys().collect::<Vec<_>>())
            .field("documents", &self.documents.read().keys().collect::<Vec<_>>())
            .field("rpcs", &self.rpcs.read().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl InMemoryExecutor {
    /// Create empty executor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a table of rows served by `query(endpoint)`
    #[must_use]
    pub fn with_table(self, endpoint: impl Into<String>, rows: Vec<Value>) -> Self {
        self.set_table(endpoint, rows);
        self
    }

    /// With a single document served by `query(endpoint)`
    #[must_use]
    pub fn with_document(self, endpoint: impl Into<String>, document: Value) -> Self {
        self.documents.write().insert(endpoint.into(), document);
        self
    }

    /// With a remote procedure handler
    #[must_use]
    pub fn with_rpc<F>(self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&QueryParams) -> StoreResult<Value> + Send + Sync + 'static,
    {
        self.rpcs.write().insert(name.into(), Arc::new(handler));
        self
    }

    /// With artificial latency on every call
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        *self.latency.lock() = Some(latency);
        self
    }

    /// Replace a table's rows
    pub fn set_table(&self, endpoint: impl Into<String>, rows: Vec<Value>) {
        self.tables.write().insert(endpoint.into(), rows);
    }

    /// Make the next `count` calls to an endpoint or rpc fail with a backend error
    pub fn fail_next(&self, target: impl Into<String>, count: usize) {
        *self.failures.lock().entry(target.into()).or_default() += count;
    }

    /// Number of calls made to an endpoint or rpc, failed ones included
    #[must_use]
    pub fn calls(&self, target: &str) -> usize {
        self.calls.get(target).map_or(0, |c| *c)
    }

    async fn enter(&self, target: &str) -> StoreResult<()> {
        *self.calls.entry(target.to_owned()).or_default() += 1;

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let mut failures = self.failures.lock();
        if let Some(remaining) = failures.get_mut(target) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StoreError::Backend(format!("injected failure for {target}")));
            }
        }
        Ok(())
    }
}

fn row_matches(row: &Value, params: &QueryParams) -> bool {
    params.iter().all(|(name, wanted)| match row.get(name) {
        None => true,
        Some(Value::Array(items)) => items.contains(wanted),
        Some(actual) => actual == wanted,
    })
}

#[async_trait]
impl QueryExecutor for InMemoryExecutor {
    async fn query(&self, endpoint: &str, params: &QueryParams) -> StoreResult<Value> {
        self.enter(endpoint).await?;

        if let Some(rows) = self.tables.read().get(endpoint) {
            let matched = rows
                .iter()
                .filter(|row| row_matches(row, params))
                .cloned()
                .collect();
            return Ok(Value::Array(matched));
        }
        self.documents
            .read()
            .get(endpoint)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEndpoint(endpoint.to_owned()))
    }

    async fn rpc(&self, name: &str, params: &QueryParams) -> StoreResult<Value> {
        self.enter(name).await?;

        let handler = self
            .rpcs
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::UnknownRpc(name.to_owned()))?;
        handler(params)
    }
}
