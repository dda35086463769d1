//! JSON file backend.
//!
//! Stands in for a persisted option table: every mutation rewrites the whole
//! file, which is fine for the small number of keys a typography cache holds
//! between invalidations.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::StoreError;
use crate::store::{KeyValueStore, effective_ttl};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    /// Expiry as UNIX seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<u64>,
}

impl FileEntry {
    fn is_expired(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Key/value backend persisted as a single JSON file.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, FileEntry>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let entries: BTreeMap<String, FileEntry> = serde_json::from_str(&content)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            info!("Loaded {} store entries from {}", entries.len(), path.display());
            entries
        } else {
            debug!("No store file found at {}", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of stored entries, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns all keys currently stored, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    /// Removes expired entries and saves. Returns how many were removed.
    pub fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = unix_now();
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    fn save(&self, entries: &BTreeMap<String, FileEntry>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = unix_now();
        Ok(self
            .entries
            .lock()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let expires_at =
            effective_ttl(ttl).map(|ttl| unix_now().saturating_add(ttl.as_secs().max(1)));
        let mut entries = self.entries.lock();
        entries.insert(
            key.to_string(),
            FileEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.save(&entries)
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }
}
