//! File-backed cache store maintenance

use std::path::Path;
use std::time::Duration;

use miette::{Diagnostic, Result};
use thiserror::Error;
use tracing::info;
use typokit_cache::{CacheError, FileStore, StoreError, VersionedCache};

use crate::cli::CacheCommands;

#[derive(Debug, Error, Diagnostic)]
pub enum CacheCommandError {
    #[error("Failed to open cache store {path}: {source}")]
    #[diagnostic(help("delete the file to start with an empty store"))]
    Open {
        path: String,
        #[source]
        source: StoreError,
    },
    #[error("Failed to write cache entry: {0}")]
    Write(#[source] CacheError),
    #[error("Failed to invalidate cache: {0}")]
    Invalidate(#[source] CacheError),
}

/// Runs a cache subcommand. Returns `false` when `get` misses.
pub fn run_cache(path: &Path, group: &str, command: CacheCommands) -> Result<bool> {
    let store = FileStore::open(path).map_err(|source| CacheCommandError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let cache = VersionedCache::new(store, group);

    match command {
        CacheCommands::Get { key } => match cache.get(&key) {
            Some(value) => {
                println!("{}", value);
                Ok(true)
            }
            None => {
                println!("No entry for '{}'", key);
                Ok(false)
            }
        },
        CacheCommands::Set { key, value, ttl } => {
            let ttl = (ttl > 0).then(|| Duration::from_secs(ttl));
            cache
                .set(&key, &value, ttl)
                .map_err(CacheCommandError::Write)?;
            info!("Stored '{}' in group '{}'", key, group);
            Ok(true)
        }
        CacheCommands::Invalidate => {
            let dropped = cache.backlog_len();
            cache.invalidate().map_err(CacheCommandError::Invalidate)?;
            println!("Invalidated {} entries, epoch {}", dropped, cache.epoch());
            Ok(true)
        }
        CacheCommands::Stats => {
            println!("Group:    {}", cache.group());
            println!("Epoch:    {}", cache.epoch());
            println!("Backlog:  {}", cache.backlog_len());
            println!("Entries:  {}", cache.store().len());
            Ok(true)
        }
    }
}
