#![allow(dead_code)]
use std::sync::Once;

use synth_keys::{Param, ParamKind, QueryKeys};

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Default registry used across the suites.
pub fn keys() -> QueryKeys {
    QueryKeys::new()
}

/// Builds one argument per declared kind, using `seed` to vary the values.
pub fn sample_args(kinds: &[ParamKind], seed: &str) -> Vec<Param> {
    kinds
        .iter()
        .map(|kind| match kind {
            ParamKind::Text => Param::Text(seed.to_string()),
            ParamKind::Number => Param::Number(seed.len() as u64),
            ParamKind::List => Param::List(vec![seed.to_string(), format!("{}2", seed)]),
        })
        .collect()
}
