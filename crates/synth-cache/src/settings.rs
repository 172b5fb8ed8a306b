//! Cache settings.

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Environment prefix read by [`CacheConfig::from_env`].
pub const ENV_PREFIX: &str = "SYNTH_CACHE";

/// Query cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL in seconds (default: 300 = 5 minutes)
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Maximum number of entries (default: 10000)
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-idle in seconds (optional)
    #[serde(default)]
    pub tti_seconds: Option<u64>,
}

fn default_ttl_seconds() -> u64 {
    300
}

fn default_max_capacity() -> u64 {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_capacity: default_max_capacity(),
            tti_seconds: None,
        }
    }
}

impl CacheConfig {
    /// Loads settings from `SYNTH_CACHE_*` environment variables.
    ///
    /// `SYNTH_CACHE_TTL_SECONDS=60` sets `ttl_seconds`. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, CacheError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads settings from the given environment source.
    pub fn load(source: config::Environment) -> Result<Self, CacheError> {
        let settings = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
