//! HTTP executor for the REST/RPC backend
//!
//! - `query("offices", p)` → `GET {base}/api/offices?{p}`
//! - `rpc("get_tender_deliveries", p)` → `POST {base}/rpc/get_tender_deliveries` with `p` as JSON body

use crate::config::HttpConfig;
use crate::error::{StoreError, StoreResult};
use crate::executor::{QueryExecutor, QueryParams};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

/// [`QueryExecutor`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpExecutor {
    /// Create executor from configuration
    ///
    /// # Errors
    /// - `StoreError::InvalidUrl` if the base URL is not http(s)
    /// - `StoreError::Transport` if the client cannot be built
    pub fn new(config: &HttpConfig) -> StoreResult<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StoreError::InvalidUrl(config.base_url.clone()));
        }

        let timeout = config.timeout();
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            timeout,
        })
    }

    /// Base URL requests are issued against
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn rpc_url(&self, name: &str) -> String {
        format!("{}/rpc/{}", self.base_url, name)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key).header("apikey", key),
            None => request,
        }
    }

    async fn send(&self, target: &str, request: RequestBuilder) -> StoreResult<Value> {
        let response = self.authorize(request).send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout {
                    duration_secs: self.timeout.as_secs(),
                }
            } else {
                StoreError::Transport(e)
            }
        })?;
        read_json(target, response).await
    }
}

async fn read_json(target: &str, response: Response) -> StoreResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(target_name = target, status = status.as_u16(), "backend rejected request");
        return Err(StoreError::status(target, status.as_u16(), body));
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| StoreError::decode(target, e))
}

#[async_trait]
impl QueryExecutor for HttpExecutor {
    async fn query(&self, endpoint: &str, params: &QueryParams) -> StoreResult<Value> {
        let request = self
            .client
            .get(self.endpoint_url(endpoint))
            .query(&params.to_query_pairs());
        self.send(endpoint, request).await
    }

    async fn rpc(&self, name: &str, params: &QueryParams) -> StoreResult<Value> {
        let request = self.client.post(self.rpc_url(name)).json(params);
        self.send(name, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_normalized() {
        let config = HttpConfig::new("https://example.test/").with_api_key("k");
        let executor = HttpExecutor::new(&config).unwrap();

        assert_eq!(executor.base_url(), "https://example.test");
        assert_eq!(
            executor.endpoint_url("/stock-transaction-dashboard-stats"),
            "https://example.test/api/stock-transaction-dashboard-stats"
        );
        assert_eq!(
            executor.rpc_url("save_delivery_with_items"),
            "https://example.test/rpc/save_delivery_with_items"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        let err = HttpExecutor::new(&HttpConfig::new("ftp://example.test")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
    }
}
