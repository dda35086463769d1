//! Cache error types.

use thiserror::Error;

/// Errors reported by a key/value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted store data could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend-specific failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Errors that can occur while building a large-object envelope.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Value could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Payload could not be compressed.
    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),
}

/// Errors that can occur in the versioned cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store rejected an operation.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A value could not be encoded for storage.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Cache bookkeeping could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CacheError {
    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
