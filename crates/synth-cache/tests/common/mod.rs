#![allow(dead_code)]
use std::sync::Once;

use synth_cache::{CacheConfig, QueryCache};

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Cache with default settings.
pub fn cache<V: Send + Sync + 'static>() -> QueryCache<V> {
    init_tracing();
    QueryCache::new(&CacheConfig::default())
}

/// Balance snapshot used as a cached value.
#[derive(Debug, Clone, PartialEq)]
pub struct Balances {
    pub wallet: String,
    pub total_usd: u64,
}
