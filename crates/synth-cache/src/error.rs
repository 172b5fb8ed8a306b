//! Cache errors.

use thiserror::Error;

/// Errors raised by the query cache.
///
/// A cache miss is not an error; lookups return `None` instead.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The fetch function supplied for a miss failed. Nothing was cached.
    #[error("failed to fetch query '{key}': {message}")]
    Fetch { key: String, message: String },

    /// Cache settings could not be loaded.
    #[error("invalid cache configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl CacheError {
    /// Creates a Fetch error.
    pub fn fetch(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns true if a fetch failed.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
