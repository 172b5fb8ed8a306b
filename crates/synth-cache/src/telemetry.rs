//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Describes the cache series. Call once at startup, after installing a recorder.
pub fn register_cache_metrics() {
    metrics::describe_counter!(
        "synth_query_cache_hits_total",
        "Total number of query cache hits"
    );
    metrics::describe_counter!(
        "synth_query_cache_misses_total",
        "Total number of query cache misses"
    );
    metrics::describe_counter!(
        "synth_query_cache_evictions_total",
        "Total number of query cache evictions"
    );
    metrics::describe_counter!(
        "synth_query_cache_fetch_errors_total",
        "Total number of failed fetches on a miss"
    );
    metrics::describe_gauge!(
        "synth_query_cache_entries",
        "Current number of entries in the query cache"
    );
    metrics::describe_histogram!(
        "synth_query_cache_operation_seconds",
        "Time spent on query cache operations"
    );
}

/// Records cache metrics through the `metrics` facade.
///
/// Hits and misses are labelled with the key's category (its first token),
/// and also kept in local atomics for `hit_rate`.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self, category: &str) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("synth_query_cache_hits_total", "category" => category.to_string()).increment(1);
    }

    pub fn record_miss(&self, category: &str) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("synth_query_cache_misses_total", "category" => category.to_string())
            .increment(1);
    }

    pub fn record_fetch_error(&self, category: &str) {
        counter!("synth_query_cache_fetch_errors_total", "category" => category.to_string())
            .increment(1);
    }

    /// `reason` is one of `ttl`, `capacity`, `manual`, `replaced`.
    pub fn record_eviction(&self, reason: &str) {
        counter!("synth_query_cache_evictions_total", "reason" => reason.to_string())
            .increment(1);
    }

    pub fn update_entry_count(&self, count: u64) {
        gauge!("synth_query_cache_entries").set(count as f64);
    }

    pub fn record_operation_duration(&self, operation: &str, duration: Duration) {
        histogram!(
            "synth_query_cache_operation_seconds",
            "operation" => operation.to_string()
        )
        .record(duration.as_secs_f64());
    }

    /// Ratio of hits to lookups, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
