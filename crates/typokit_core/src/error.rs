//! Core error types.

use thiserror::Error;

/// Errors that can occur while resolving settings or managing the cache.
#[derive(Debug, Error)]
pub enum TypoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] typokit_cache::CacheError),
}

impl TypoError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
