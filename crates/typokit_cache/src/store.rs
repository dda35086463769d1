//! Key/value backend abstraction and the in-memory backend.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::StoreError;

/// A physical key/value backend.
///
/// Keys passed here are already qualified by the cache; the backend does not
/// know about epochs or backlogs. A `ttl` of `None` (or a zero duration)
/// means the entry never expires.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Expired entries must read as `None`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Deletes a value. Returns whether an entry was present.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        (**self).delete(key)
    }
}

/// Normalizes a TTL so that zero means "no expiry".
pub(crate) fn effective_ttl(ttl: Option<Duration>) -> Option<Duration> {
    ttl.filter(|ttl| !ttl.is_zero())
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Thread-safe in-memory backend with per-entry expiry.
///
/// Expired entries are dropped lazily on access or by [`purge_expired`].
///
/// [`purge_expired`]: MemoryStore::purge_expired
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if a live entry exists under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Removes all expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it while we are here.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let expires_at = effective_ttl(ttl).map(|ttl| Instant::now() + ttl);
        self.entries.write().insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get() {
        let store = MemoryStore::new();
        store.set("key", "value", None).unwrap();

        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
        assert_eq!(store.get("missing").unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("key", "one", None).unwrap();
        store.set("key", "two", None).unwrap();

        assert_eq!(store.get("key").unwrap(), Some("two".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_delete() {
        let store = MemoryStore::new();
        store.set("key", "value", None).unwrap();

        assert!(store.delete("key").unwrap());
        assert!(!store.delete("key").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_expired_entry_reads_as_missing() {
        let store = MemoryStore::new();
        store
            .set("key", "value", Some(Duration::from_millis(1)))
            .unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(store.get("key").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_zero_ttl_never_expires() {
        let store = MemoryStore::new();
        store.set("key", "value", Some(Duration::ZERO)).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert!(store.contains_key("key"));
    }

    #[test]
    fn test_memory_store_purge_expired() {
        let store = MemoryStore::new();
        store
            .set("short", "value", Some(Duration::from_millis(1)))
            .unwrap();
        store.set("long", "value", None).unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.contains_key("long"));
    }
}
