//! Prefix and pattern invalidation.

use glob::Pattern;
use synth_keys::QueryKey;
use tracing::{debug, info};

use crate::query_cache::QueryCache;

/// Result of an invalidation.
#[derive(Debug, Clone)]
pub struct InvalidationResult {
    /// Number of entries invalidated.
    pub count: usize,
    /// Prefixes or patterns applied.
    pub patterns: Vec<String>,
}

impl InvalidationResult {
    fn single(pattern: String, count: usize) -> Self {
        Self {
            count,
            patterns: vec![pattern],
        }
    }
}

impl<V> QueryCache<V>
where
    V: Send + Sync + 'static,
{
    /// Invalidates every entry whose key starts with `prefix`.
    ///
    /// Prefixes are compared token by token, so `["rates"]` does not match
    /// `["ratesV2", ..]`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use synth_cache::{CacheConfig, QueryCache};
    /// # use synth_keys::QueryKey;
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let cache: QueryCache<String> = QueryCache::new(&CacheConfig::default());
    /// // Drop every wallet balance after a transaction confirms
    /// let result = cache.invalidate_prefix(&QueryKey::new(["walletBalances"])).await;
    /// println!("Invalidated {} entries", result.count);
    /// # }
    /// ```
    pub async fn invalidate_prefix(&self, prefix: &QueryKey) -> InvalidationResult {
        let count = self.invalidate_where(|key| key.starts_with(prefix)).await;

        info!(prefix = %prefix, count, "Query cache entries invalidated by prefix");
        InvalidationResult::single(prefix.to_string(), count)
    }

    /// Invalidates entries whose display form (`token:token:..`) matches a glob.
    ///
    /// - `*`: matches any sequence of characters
    /// - `?`: matches a single character
    ///
    /// An invalid pattern invalidates nothing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use synth_cache::{CacheConfig, QueryCache};
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let cache: QueryCache<String> = QueryCache::new(&CacheConfig::default());
    /// // All historical rates for sBTC, any period
    /// let result = cache.invalidate_by_pattern("rates:historicalRates:sBTC:*").await;
    /// # }
    /// ```
    pub async fn invalidate_by_pattern(&self, pattern: &str) -> InvalidationResult {
        let count = match Pattern::new(pattern) {
            Ok(glob) => {
                self.invalidate_where(|key| glob.matches(&key.to_string()))
                    .await
            },
            Err(e) => {
                debug!(pattern, error = %e, "Ignoring invalid glob pattern");
                0
            },
        };

        info!(pattern, count, "Query cache entries invalidated by pattern");
        InvalidationResult::single(pattern.to_string(), count)
    }

    /// Invalidates several glob patterns at once.
    pub async fn invalidate_by_patterns(&self, patterns: &[&str]) -> InvalidationResult {
        let mut total_count = 0;
        let mut all_patterns = Vec::new();

        for pattern in patterns {
            let result = self.invalidate_by_pattern(pattern).await;
            total_count += result.count;
            all_patterns.extend(result.patterns);
        }

        InvalidationResult {
            count: total_count,
            patterns: all_patterns,
        }
    }

    /// Snapshots the matching keys first, then removes them one by one.
    async fn invalidate_where<P>(&self, matches: P) -> usize
    where
        P: Fn(&QueryKey) -> bool,
    {
        let matched: Vec<QueryKey> = self
            .iter()
            .filter(|(key, _)| matches(key))
            .map(|(key, _)| (*key).clone())
            .collect();

        for key in &matched {
            self.invalidate(key).await;
        }
        matched.len()
    }
}
