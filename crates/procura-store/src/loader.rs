//! Cached reference-data loading
//!
//! [`ReferenceDataLoader`] fetches office, wing and DEC lists through a
//! [`QueryExecutor`] and keeps them in a moka cache:
//!
//! - a fetched list is served without refetching for the staleness window
//! - concurrent requests for the same list share one in-flight fetch
//! - retryable failures are retried a fixed number of times
//! - a failure that survives retries notifies the user once per fetch and
//!   serves the last-known-good list instead of an empty one

use crate::config::LoaderConfig;
use crate::error::{StoreError, StoreResult};
use crate::executor::{decode_rows, QueryExecutor, QueryParams};
use crate::notify::{Notification, Notifier, TracingNotifier};
use dashmap::DashMap;
use moka::future::Cache;
use procura_model::{
    Dec, EntityKind, Hierarchy, Office, OfficeId, ReferenceEntity, Wing, WingId,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Cache key: the optional parent filter
type ParentFilter = Option<i64>;

/// Endpoint serving a reference list
#[must_use]
pub fn endpoint(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Office => "offices",
        EntityKind::Wing => "wings",
        EntityKind::Dec => "decs",
    }
}

/// Query parameter naming the parent filter, if the kind has one
#[must_use]
pub fn parent_param(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Office => None,
        EntityKind::Wing => Some("officeId"),
        EntityKind::Dec => Some("wingId"),
    }
}

/// Outcome of a reference-data read
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    /// Active items (last-known-good when `error` is set)
    pub items: Arc<Vec<T>>,
    /// Error that prevented a fresh read
    pub error: Option<Arc<StoreError>>,
}

impl<T> Loaded<T> {
    fn fresh(items: Arc<Vec<T>>) -> Self {
        Self { items, error: None }
    }

    /// True when the items did not come from a successful read
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.error.is_some()
    }
}

/// All three reference lists in one snapshot
#[derive(Debug, Clone)]
pub struct HierarchySnapshot {
    /// Indexed hierarchy
    pub hierarchy: Hierarchy,
    /// Errors from any of the three reads
    pub errors: Vec<Arc<StoreError>>,
}

impl HierarchySnapshot {
    /// True when any list was served from last-known-good data
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        !self.errors.is_empty()
    }
}

struct ListCache<T> {
    fresh: Cache<ParentFilter, Arc<Vec<T>>>,
    last_good: DashMap<ParentFilter, Arc<Vec<T>>>,
}

impl<T: Send + Sync + 'static> ListCache<T> {
    fn new(config: &LoaderConfig) -> Self {
        Self {
            fresh: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.stale_after())
                .build(),
            last_good: DashMap::new(),
        }
    }

    fn last_good(&self, filter: ParentFilter) -> Arc<Vec<T>> {
        self.last_good
            .get(&filter)
            .map(|entry| Arc::clone(entry.value()))
            .unwrap_or_default()
    }
}

/// Cached, coalescing loader for offices, wings and DECs
pub struct ReferenceDataLoader {
    executor: Arc<dyn QueryExecutor>,
    notifier: Arc<dyn Notifier>,
    config: LoaderConfig,
    offices: ListCache<Office>,
    wings: ListCache<Wing>,
    decs: ListCache<Dec>,
}

impl fmt::Debug for ReferenceDataLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceDataLoader")
            .field("config", &self.config)
            .field("cached_office_lists", &self.offices.fresh.entry_count())
            .field("cached_wing_lists", &self.wings.fresh.entry_count())
            .field("cached_dec_lists", &self.decs.fresh.entry_count())
            .finish_non_exhaustive()
    }
}

impl ReferenceDataLoader {
    /// Create loader that reports failures to the tracing log
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>, config: LoaderConfig) -> Self {
        Self::with_notifier(executor, config, Arc::new(TracingNotifier))
    }

    /// Create loader with a specific notifier
    #[must_use]
    pub fn with_notifier(
        executor: Arc<dyn QueryExecutor>,
        config: LoaderConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            offices: ListCache::new(&config),
            wings: ListCache::new(&config),
            decs: ListCache::new(&config),
            executor,
            notifier,
            config,
        }
    }

    /// Loader configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Active offices
    pub async fn offices(&self) -> Loaded<Office> {
        self.load(&self.offices, None).await
    }

    /// Active wings, optionally only those of one office
    pub async fn wings(&self, office: Option<OfficeId>) -> Loaded<Wing> {
        self.load(&self.wings, office.map(OfficeId::get)).await
    }

    /// Active DECs, optionally only those of one wing
    pub async fn decs(&self, wing: Option<WingId>) -> Loaded<Dec> {
        self.load(&self.decs, wing.map(WingId::get)).await
    }

    /// Load all three unfiltered lists concurrently
    pub async fn hierarchy(&self) -> HierarchySnapshot {
        let (offices, wings, decs) =
            futures::join!(self.offices(), self.wings(None), self.decs(None));

        let errors = [offices.error, wings.error, decs.error]
            .into_iter()
            .flatten()
            .collect();
        let hierarchy = Hierarchy::new(
            offices.items.iter().cloned(),
            wings.items.iter().cloned(),
            decs.items.iter().cloned(),
        );
        HierarchySnapshot { hierarchy, errors }
    }

    /// Mark every cached list of a kind as stale
    ///
    /// Last-known-good data is kept for fallback.
    pub fn invalidate(&self, kind: EntityKind) {
        match kind {
            EntityKind::Office => self.offices.fresh.invalidate_all(),
            EntityKind::Wing => self.wings.fresh.invalidate_all(),
            EntityKind::Dec => self.decs.fresh.invalidate_all(),
        }
    }

    /// Mark every cached list as stale
    pub fn invalidate_all(&self) {
        for kind in EntityKind::ALL {
            self.invalidate(kind);
        }
    }

    async fn load<T>(&self, cache: &ListCache<T>, filter: ParentFilter) -> Loaded<T>
    where
        T: ReferenceEntity + DeserializeOwned + Send + Sync + 'static,
    {
        match cache
            .fresh
            .try_get_with(filter, self.fetch_with_retry::<T>(filter))
            .await
        {
            Ok(items) => {
                cache.last_good.insert(filter, Arc::clone(&items));
                Loaded::fresh(items)
            }
            Err(error) => {
                let fallback = cache.last_good(filter);
                tracing::debug!(
                    "serving {} cached {} after fetch failure: {}",
                    fallback.len(),
                    T::KIND.plural(),
                    error
                );
                Loaded {
                    items: fallback,
                    error: Some(error),
                }
            }
        }
    }

    async fn fetch_with_retry<T>(&self, filter: ParentFilter) -> StoreResult<Arc<Vec<T>>>
    where
        T: ReferenceEntity + DeserializeOwned,
    {
        let kind = T::KIND;
        let target = endpoint(kind);
        let mut params = QueryParams::new();
        if let (Some(parent), Some(name)) = (filter, parent_param(kind)) {
            params.insert(name, parent);
        }

        let attempts = self.config.retry_attempts.max(1);
        let mut attempt = 1;
        loop {
            let result = match self.executor.query(target, &params).await {
                Ok(payload) => decode_rows::<T>(target, payload),
                Err(e) => Err(e),
            };

            match result {
                Ok(rows) => {
                    let items: Vec<T> = rows
                        .into_iter()
                        .filter(|item| item.is_active())
                        .filter(|item| filter.is_none() || item.parent_key() == filter)
                        .collect();
                    tracing::debug!(
                        endpoint = target,
                        parent = ?filter,
                        count = items.len(),
                        attempt,
                        "fetched reference list"
                    );
                    return Ok(Arc::new(items));
                }
                Err(e) if e.is_retryable() && attempt < attempts => {
                    tracing::warn!(endpoint = target, attempt, error = %e, "reference fetch failed, retrying");
                    tokio::time::sleep(self.config.retry_backoff()).await;
                    attempt += 1;
                }
                Err(e) => {
                    // Shared by every coalesced waiter on this list
                    tracing::warn!(endpoint = target, attempt, error = %e, "reference fetch failed");
                    self.notifier.notify(Notification::warning(
                        format!("Could not refresh {}", kind.plural()),
                        e.to_string(),
                    ));
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryExecutor;
    use crate::notify::MockNotifier;
    use serde_json::json;
    use std::time::Duration;

    fn executor() -> Arc<InMemoryExecutor> {
        Arc::new(
            InMemoryExecutor::new()
                .with_table(
                    "offices",
                    vec![
                        json!({"id": 1, "name": "HQ"}),
                        json!({"id": 2, "name": "Closed", "isActive": false}),
                    ],
                )
                .with_table(
                    "wings",
                    vec![
                        json!({"id": 10, "name": "Works", "officeId": 1}),
                        json!({"id": 11, "name": "Stores", "officeId": 2}),
                    ],
                )
                .with_table("decs", vec![json!({"id": 100, "name": "C1", "wingId": 10})]),
        )
    }

    fn config() -> LoaderConfig {
        LoaderConfig::new().with_retry_backoff(Duration::ZERO)
    }

    #[tokio::test]
    async fn inactive_rows_are_dropped() {
        let loader = ReferenceDataLoader::new(executor(), config());
        let offices = loader.offices().await;
        assert!(!offices.is_stale());
        assert_eq!(offices.items.len(), 1);
        assert_eq!(offices.items[0].name, "HQ");
    }

    #[tokio::test]
    async fn parent_filter_narrows() {
        let loader = ReferenceDataLoader::new(executor(), config());
        let wings = loader.wings(Some(OfficeId(2))).await;
        assert_eq!(wings.items.len(), 1);
        assert_eq!(wings.items[0].id, WingId(11));
        assert_eq!(loader.wings(None).await.items.len(), 2);
    }

    #[tokio::test]
    async fn failure_notifies_once() {
        let exec = executor();
        exec.fail_next("decs", 5);

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.title == "Could not refresh DECs")
            .times(1)
            .return_const(());

        let loader = ReferenceDataLoader::with_notifier(
            exec.clone(),
            config().with_retry_attempts(2),
            Arc::new(notifier),
        );
        let decs = loader.decs(None).await;

        assert!(decs.is_stale());
        assert!(decs.items.is_empty());
        assert_eq!(exec.calls("decs"), 2);
    }

    #[tokio::test]
    async fn hierarchy_snapshot() {
        let loader = ReferenceDataLoader::new(executor(), config());
        let snapshot = loader.hierarchy().await;
        assert!(!snapshot.is_stale());
        assert_eq!(snapshot.hierarchy.counts(), (1, 2, 1));
    }

    #[test]
    fn endpoint_mapping() {
        assert_eq!(endpoint(EntityKind::Dec), "decs");
        assert_eq!(parent_param(EntityKind::Wing), Some("officeId"));
        assert_eq!(parent_param(EntityKind::Office), None);
    }
}
