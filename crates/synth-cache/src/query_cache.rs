//! Query cache backed by Moka.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use moka::notification::RemovalCause;
use synth_keys::QueryKey;
use tracing::debug;

use crate::error::CacheError;
use crate::settings::CacheConfig;
use crate::telemetry::CacheMetrics;

/// Label for keys without a category token.
const UNCATEGORIZED: &str = "none";

fn category_of(key: &QueryKey) -> String {
    key.category()
        .map(ToString::to_string)
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Async cache of query results addressed by [`QueryKey`].
///
/// Lookups use exact key equality. Values are shared behind `Arc`, and the
/// handle itself is cheap to clone.
///
/// # Examples
///
/// ```no_run
/// use synth_cache::{CacheConfig, QueryCache};
/// use synth_keys::QueryKeys;
///
/// # #[tokio::main]
/// # async fn main() {
/// let keys = QueryKeys::new();
/// let cache: QueryCache<Vec<String>> = QueryCache::new(&CacheConfig::default());
///
/// if cache.get(&keys.synths().frozen_synths()).await.is_none() {
///     println!("Cache miss");
/// }
/// # }
/// ```
pub struct QueryCache<V> {
    inner: Cache<QueryKey, Arc<V>>,
    metrics: CacheMetrics,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<V> QueryCache<V>
where
    V: Send + Sync + 'static,
{
    /// Creates a cache with the given settings.
    pub fn new(config: &CacheConfig) -> Self {
        let metrics = CacheMetrics::new();

        let mut builder = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.ttl_seconds));

        if let Some(tti) = config.tti_seconds {
            builder = builder.time_to_idle(Duration::from_secs(tti));
        }

        let eviction_metrics = metrics.clone();
        builder = builder.eviction_listener(move |_key, _value, cause| {
            let reason = match cause {
                RemovalCause::Expired => "ttl",
                RemovalCause::Size => "capacity",
                RemovalCause::Explicit => "manual",
                RemovalCause::Replaced => "replaced",
            };
            eviction_metrics.record_eviction(reason);
        });

        Self {
            inner: builder.build(),
            metrics,
        }
    }

    /// Returns the cached value for `key`, or `None` on a miss.
    pub async fn get(&self, key: &QueryKey) -> Option<Arc<V>> {
        let start = Instant::now();
        let result = self.inner.get(key).await;
        let category = category_of(key);

        if result.is_some() {
            self.metrics.record_hit(&category);
        } else {
            self.metrics.record_miss(&category);
        }

        self.metrics.record_operation_duration("get", start.elapsed());
        self.update_entry_gauge();

        result
    }

    /// Returns the cached value, or runs `fetch` on a miss and caches its result.
    ///
    /// Concurrent callers for the same key share a single `fetch`. A failed
    /// fetch is returned to every waiting caller and is not cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: QueryKey,
        fetch: F,
    ) -> Result<Arc<V>, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display + Send + Sync + 'static,
    {
        let start = Instant::now();
        let category = category_of(&key);

        if let Some(cached) = self.inner.get(&key).await {
            self.metrics.record_hit(&category);
            self.metrics
                .record_operation_duration("get_or_fetch_hit", start.elapsed());
            return Ok(cached);
        }

        self.metrics.record_miss(&category);

        let display_key = key.to_string();
        let value = self
            .inner
            .try_get_with(key, async {
                debug!(key = %display_key, "Fetching query on cache miss");
                fetch().await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<E>| {
                self.metrics.record_fetch_error(&category);
                CacheError::fetch(display_key.clone(), e.to_string())
            })?;

        self.metrics
            .record_operation_duration("get_or_fetch_miss", start.elapsed());
        self.update_entry_gauge();

        Ok(value)
    }

    /// Inserts a value, replacing any existing entry for the key.
    pub async fn insert(&self, key: QueryKey, value: V) {
        self.inner.insert(key, Arc::new(value)).await;
    }

    /// Removes the entry for exactly this key.
    pub async fn invalidate(&self, key: &QueryKey) {
        self.inner.invalidate(key).await;
    }

    /// Removes every entry.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate number of entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Snapshot iterator over the entries. Entries may change during iteration.
    pub fn iter(&self) -> impl Iterator<Item = (Arc<QueryKey>, Arc<V>)> + '_ {
        self.inner.iter()
    }

    /// Applies pending maintenance (expirations, invalidations, counts).
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn update_entry_gauge(&self) {
        self.metrics.update_entry_count(self.inner.entry_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use synth_keys::{CurrencyKey, Period, QueryKeys};

    fn cache() -> QueryCache<String> {
        QueryCache::new(&CacheConfig::default())
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let keys = QueryKeys::new();
        let cache = cache();
        let key = keys.rates().exchange_rates();

        cache.insert(key.clone(), "rates".to_string()).await;

        let cached = cache.get(&key).await;
        assert_eq!(cached.as_deref().map(String::as_str), Some("rates"));
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let keys = QueryKeys::new();
        let cache = cache();

        assert!(cache.get(&keys.trades().all_trades()).await.is_none());
        assert_eq!(cache.metrics().misses(), 1);
    }

    #[tokio::test]
    async fn test_independently_built_keys_hit() {
        let cache = cache();
        let writer = QueryKeys::new();
        let reader = QueryKeys::new();

        cache
            .insert(
                writer
                    .rates()
                    .historical_rates(&CurrencyKey::new("sBTC"), &Period::new("1M")),
                "chart".to_string(),
            )
            .await;

        let hit = cache
            .get(
                &reader
                    .rates()
                    .historical_rates(&CurrencyKey::new("sBTC"), &Period::new("1M")),
            )
            .await;
        assert!(hit.is_some());
        assert_eq!(cache.metrics().hits(), 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_populates_cache() {
        let keys = QueryKeys::new();
        let cache = cache();
        let key = keys.synths().frozen_synths();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..2 {
            let calls = Arc::clone(&calls);
            let value = cache
                .get_or_fetch(key.clone(), || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("sBTC".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value.as_str(), "sBTC");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_is_not_cached() {
        let keys = QueryKeys::new();
        let cache = cache();
        let key = keys.system_status().is_upgrading();

        let err = cache
            .get_or_fetch(key.clone(), || async { Err::<String, _>("rpc down") })
            .await
            .unwrap_err();

        assert!(err.is_fetch_error());
        assert!(err.to_string().contains("systemStatus:isUpgrading"));
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let keys = QueryKeys::new();
        let cache = cache();
        let key = keys.network().eth_gas_price();

        cache.insert(key.clone(), "42 gwei".to_string()).await;
        assert!(cache.get(&key).await.is_some());

        cache.invalidate(&key).await;
        cache.run_pending_tasks().await;

        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_fetch_runs_once() {
        let cache = Arc::new(cache());
        let calls = Arc::new(AtomicU32::new(0));
        let key = QueryKeys::new().coin_gecko().coin_list();

        let mut handles = vec![];
        for _ in 0..100 {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            let calls = Arc::clone(&calls);

            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(key, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Ok::<_, String>("coins".to_string())
                    })
                    .await
            }));
        }

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
