//! Epoch-versioned cache over a [`KeyValueStore`].

use std::collections::BTreeSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{CacheError, KeyValueStore, codec};

/// Epoch and backlog, mirrored from the backing store.
#[derive(Debug)]
struct EpochState {
    epoch: u64,
    backlog: BTreeSet<String>,
}

/// Returns a new epoch strictly greater than `previous`.
///
/// Based on wall-clock microseconds so that epochs stay increasing across
/// process restarts even when the persisted epoch was lost.
fn next_epoch(previous: u64) -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);
    now.max(previous.saturating_add(1))
}

/// A cache whose whole namespace is invalidated by advancing an epoch.
///
/// Every logical key is stored under `<group>:<epoch>:<key>`. After
/// [`invalidate`](Self::invalidate), entries written under older epochs are
/// unreachable even if the backend never deletes them.
///
/// Read failures are soft: they surface as misses. Write failures are
/// returned to the caller, who should carry on without caching.
pub struct VersionedCache<S> {
    store: S,
    group: String,
    state: Mutex<EpochState>,
}

impl<S: KeyValueStore> VersionedCache<S> {
    /// Creates a cache for `group`, loading its epoch and backlog from `store`.
    ///
    /// Missing or unreadable bookkeeping starts a fresh epoch with an empty
    /// backlog.
    pub fn new(store: S, group: impl Into<String>) -> Self {
        let group = group.into();
        let epoch_key = format!("{}:epoch", group);
        let backlog_key = format!("{}:backlog", group);

        let stored_epoch = match store.get(&epoch_key) {
            Ok(value) => value.and_then(|v| v.parse::<u64>().ok()),
            Err(e) => {
                warn!("Failed to read cache epoch for {}: {}", group, e);
                None
            }
        };

        let epoch = match stored_epoch {
            Some(epoch) => epoch,
            None => {
                let epoch = next_epoch(0);
                if let Err(e) = store.set(&epoch_key, &epoch.to_string(), None) {
                    warn!("Failed to persist cache epoch for {}: {}", group, e);
                }
                epoch
            }
        };

        let backlog = match store.get(&backlog_key) {
            Ok(Some(json)) => serde_json::from_str::<BTreeSet<String>>(&json).unwrap_or_else(|e| {
                warn!("Discarding corrupted cache backlog for {}: {}", group, e);
                BTreeSet::new()
            }),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                warn!("Failed to read cache backlog for {}: {}", group, e);
                BTreeSet::new()
            }
        };

        debug!(
            "Cache group {} at epoch {} with {} backlogged keys",
            group,
            epoch,
            backlog.len()
        );

        Self {
            store,
            group,
            state: Mutex::new(EpochState { epoch, backlog }),
        }
    }

    /// Returns the cache group name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the current epoch token.
    pub fn epoch(&self) -> u64 {
        self.state.lock().epoch
    }

    /// Returns the number of logical keys written since the last invalidation.
    pub fn backlog_len(&self) -> usize {
        self.state.lock().backlog.len()
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the physical key for `key` under the current epoch.
    pub fn qualify(&self, key: &str) -> String {
        self.qualify_with(self.epoch(), key)
    }

    fn qualify_with(&self, epoch: u64, key: &str) -> String {
        format!("{}:{}:{}", self.group, epoch, key)
    }

    fn epoch_key(&self) -> String {
        format!("{}:epoch", self.group)
    }

    fn backlog_key(&self) -> String {
        format!("{}:backlog", self.group)
    }

    fn persist_backlog(&self, backlog: &BTreeSet<String>) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(backlog).map_err(|e| CacheError::serialization(e.to_string()))?;
        self.store.set(&self.backlog_key(), &json, None)?;
        Ok(())
    }

    /// Reads the value stored under `key` in the current epoch.
    pub fn get(&self, key: &str) -> Option<String> {
        let physical = self.qualify(key);
        match self.store.get(&physical) {
            Ok(value) => {
                debug!(
                    "Cache {} for {}",
                    if value.is_some() { "hit" } else { "miss" },
                    physical
                );
                value
            }
            Err(e) => {
                debug!("Cache read failed for {}: {}", physical, e);
                None
            }
        }
    }

    /// Stores `value` under `key` in the current epoch.
    ///
    /// The key is registered in the backlog first, so that a later
    /// [`invalidate`](Self::invalidate) can clean it up.
    pub fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let epoch = {
            let mut state = self.state.lock();
            if state.backlog.insert(key.to_string())
                && let Err(e) = self.persist_backlog(&state.backlog)
            {
                // An orphaned entry only costs space until the backend evicts it.
                warn!("Failed to persist cache backlog for {}: {}", self.group, e);
            }
            state.epoch
        };

        self.store
            .set(&self.qualify_with(epoch, key), value, ttl)
            .map_err(|e| {
                debug!("Cache write failed for {}: {}", key, e);
                CacheError::from(e)
            })
    }

    /// Removes the current-epoch entry for `key`. Returns whether one existed.
    pub fn delete(&self, key: &str) -> bool {
        let physical = self.qualify(key);
        match self.store.delete(&physical) {
            Ok(existed) => existed,
            Err(e) => {
                debug!("Cache delete failed for {}: {}", physical, e);
                false
            }
        }
    }

    /// Reads a large object stored with [`set_object`](Self::set_object).
    ///
    /// Corrupted or wrong-typed payloads are misses.
    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let encoded = self.get(key)?;
        let value = codec::decode(&encoded);
        if value.is_none() {
            debug!("Discarding undecodable cache object {}", key);
        }
        value
    }

    /// Stores a large object as a compressed envelope.
    pub fn set_object<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let encoded = codec::encode(value)?;
        self.set(key, &encoded, ttl)
    }

    /// Invalidates every entry of the group.
    ///
    /// Deletes all backlogged entries (individual failures are logged and
    /// skipped), clears the backlog and advances the epoch. The in-memory
    /// epoch always advances; an error is returned if the new bookkeeping
    /// could not be persisted.
    pub fn invalidate(&self) -> Result<(), CacheError> {
        let mut state = self.state.lock();

        let mut deleted = 0usize;
        let mut failed = 0usize;
        for key in &state.backlog {
            let physical = self.qualify_with(state.epoch, key);
            match self.store.delete(&physical) {
                Ok(_) => deleted += 1,
                Err(e) => {
                    failed += 1;
                    warn!("Failed to delete cache entry {}: {}", physical, e);
                }
            }
        }

        state.backlog.clear();
        state.epoch = next_epoch(state.epoch);

        info!(
            "Invalidated cache group {} ({} deleted, {} failed), new epoch {}",
            self.group, deleted, failed, state.epoch
        );

        let backlog_result = self.persist_backlog(&state.backlog);
        let epoch_result = self
            .store
            .set(&self.epoch_key(), &state.epoch.to_string(), None)
            .map_err(CacheError::from);

        backlog_result.and(epoch_result)
    }
}
