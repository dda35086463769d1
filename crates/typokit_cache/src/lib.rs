//! # typokit_cache
//!
//! Caching layer for Typokit.
//!
//! This crate provides a generic key/value cache whose whole namespace can be
//! invalidated at once without enumerating the keys stored in the backend.
//!
//! ## Cache Strategy
//!
//! 1. **Epoch-qualified keys**: every logical key is stored as
//!    `<group>:<epoch>:<key>`, so bumping the epoch makes all previous entries
//!    unreachable immediately
//! 2. **Backlog cleanup**: keys written since the last invalidation are
//!    tracked and deleted on a best-effort basis for backends without eviction
//! 3. **Soft failures**: backend errors surface as cache misses
//!
//! ## Storage
//!
//! Complex values are stored as large-object envelopes
//! (JSON → zlib → base64), so any backend that stores plain strings works.

pub mod codec;
mod error;
mod file_store;
mod store;
mod versioned;

pub use codec::{decode, decode_bytes, encode, encode_bytes};
pub use error::{CacheError, CodecError, StoreError};
pub use file_store::FileStore;
pub use store::{KeyValueStore, MemoryStore};
pub use versioned::VersionedCache;
