//! Query/RPC executor seam
//!
//! The backing store is treated purely as "execute a named query or
//! remote procedure with named parameters, receive JSON or an error".
//! Decoding into typed records happens once, here, against a single
//! wire contract per record type.

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use procura_model::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Named query parameters, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, Value>);

impl QueryParams {
    /// Create empty parameter set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters identifying and scoping the caller
    #[must_use]
    pub fn scoped(session: &Session) -> Self {
        let mut params = Self::new();
        for (name, value) in session.scope_params() {
            params.insert(name, value);
        }
        params
    }

    /// With an additional parameter
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterate parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no parameters are set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as URL query pairs; strings are sent without JSON quoting
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    }
}

/// Backend that executes named queries and remote procedures
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Read from a named endpoint (`offices`, `tenders`, ...)
    async fn query(&self, endpoint: &str, params: &QueryParams) -> StoreResult<Value>;

    /// Invoke a named remote procedure (`get_tender_deliveries`, ...)
    async fn rpc(&self, name: &str, params: &QueryParams) -> StoreResult<Value>;
}

/// Decode an array response into records
///
/// Rows that do not match the contract are skipped with a warning; the
/// response itself must be an array.
///
/// # Errors
/// `StoreError::UnexpectedShape` when the payload is not an array.
pub fn decode_rows<T: DeserializeOwned>(target: &str, payload: Value) -> StoreResult<Vec<T>> {
    let Value::Array(rows) = payload else {
        return Err(StoreError::UnexpectedShape {
            target: target.to_owned(),
            expected: "array",
        });
    };

    let total = rows.len();
    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(target_name = target, index, error = %e, "skipping malformed row");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!(
            "{}: decoded {} of {} rows",
            target,
            decoded.len(),
            total
        );
    }
    Ok(decoded)
}

/// Decode an object response into a single record
///
/// # Errors
/// `StoreError::Decode` when the payload does not match the contract.
pub fn decode_one<T: DeserializeOwned>(target: &str, payload: Value) -> StoreResult<T> {
    serde_json::from_value(payload).map_err(|e| StoreError::decode(target, e))
}

/// Serialize a request parameter
///
/// # Errors
/// `StoreError::Encode` when the value cannot be represented as JSON.
pub fn encode_param<T: Serialize + ?Sized>(
    target: &str,
    param: &str,
    value: &T,
) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|e| StoreError::encode(target, param, e))
}
