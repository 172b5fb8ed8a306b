//! Synth Cache - async query cache
//!
//! Caches the results of remote queries under the keys produced by
//! [`synth_keys::QueryKeys`]. A key that matches nothing is a miss, never an
//! error; misses can be filled through a single-flight fetch, and groups of
//! entries can be dropped by key prefix or glob pattern.

pub mod error;
pub mod invalidation;
pub mod query_cache;
pub mod settings;
pub mod telemetry;

pub use error::CacheError;
pub use invalidation::InvalidationResult;
pub use query_cache::QueryCache;
pub use settings::CacheConfig;
pub use telemetry::{CacheMetrics, register_cache_metrics};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
