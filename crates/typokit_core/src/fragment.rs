//! Fragment processing cache.
//!
//! Memoizes the engine's output per fragment, keyed by a fingerprint of the
//! text, the settings hash and the context flags. Fragments are stored as
//! plain strings; settings and other expensive objects go through the
//! large-object codec.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use typokit_cache::{KeyValueStore, VersionedCache};
use typokit_locale::LocaleResolver;

use crate::{Config, ProcessFlags, Settings, TextEngine, TypoError};

/// Default lifetime of a cached fragment.
pub const DEFAULT_FRAGMENT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Hook that may replace the fragment TTL. A zero duration means no expiry.
pub type TtlOverride = Box<dyn Fn(Duration) -> Duration + Send + Sync>;

/// Fragment cache behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentCacheOptions {
    /// Whether fragments are cached at all.
    pub enabled: bool,
    /// Lifetime of cached fragments.
    pub ttl: Duration,
}

impl Default for FragmentCacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_FRAGMENT_TTL,
        }
    }
}

/// Memoizes typographic processing of text fragments.
pub struct FragmentCache<S, E> {
    cache: VersionedCache<S>,
    engine: E,
    resolver: LocaleResolver,
    options: FragmentCacheOptions,
    ttl_override: Option<TtlOverride>,
}

impl<S: KeyValueStore, E: TextEngine> FragmentCache<S, E> {
    /// Creates a fragment cache with default options.
    pub fn new(cache: VersionedCache<S>, engine: E, resolver: LocaleResolver) -> Self {
        Self {
            cache,
            engine,
            resolver,
            options: FragmentCacheOptions::default(),
            ttl_override: None,
        }
    }

    pub fn with_options(mut self, options: FragmentCacheOptions) -> Self {
        self.options = options;
        self
    }

    /// Installs a hook that may replace the configured fragment TTL.
    pub fn with_ttl_override<F>(mut self, hook: F) -> Self
    where
        F: Fn(Duration) -> Duration + Send + Sync + 'static,
    {
        self.ttl_override = Some(Box::new(hook));
        self
    }

    pub fn cache(&self) -> &VersionedCache<S> {
        &self.cache
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    pub fn options(&self) -> FragmentCacheOptions {
        self.options
    }

    /// Returns the TTL used for new fragments, `None` meaning no expiry.
    pub fn fragment_ttl(&self) -> Option<Duration> {
        let ttl = match &self.ttl_override {
            Some(hook) => hook(self.options.ttl),
            None => self.options.ttl,
        };
        (!ttl.is_zero()).then_some(ttl)
    }

    /// Returns the cache key for a fragment.
    pub fn fingerprint(text: &str, flags: ProcessFlags, settings: &Settings) -> String {
        format!(
            "frag:{}:{}:{}",
            blake3::hash(text.as_bytes()).to_hex(),
            settings.hash(),
            flags.bits()
        )
    }

    /// Returns the processed fragment, computing it on a miss.
    pub fn process(&self, text: &str, flags: ProcessFlags, settings: &Settings) -> String {
        if !self.options.enabled {
            return self.engine.process(text, settings, flags);
        }

        let key = Self::fingerprint(text, flags, settings);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let processed = self.engine.process(text, settings, flags);
        if let Err(e) = self.cache.set(&key, &processed, self.fragment_ttl()) {
            warn!("Failed to cache processed fragment: {}", e);
        }
        processed
    }

    /// Returns settings for `config` and `locale`, reusing a cached copy.
    pub fn settings(&self, config: &Config, locale: &str) -> Result<Settings, TypoError> {
        let config_json = serde_json::to_string(config)
            .map_err(|e| TypoError::config(format!("Failed to serialize options: {}", e)))?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(config_json.as_bytes());
        hasher.update(b"\0");
        hasher.update(locale.as_bytes());
        let key = format!("settings:{}", hasher.finalize().to_hex());
        self.remember(&key, || {
            Settings::resolve(config, locale, &self.resolver, &self.engine.languages())
        })
    }

    /// Returns the object cached under `key`, building and storing it on a miss.
    ///
    /// Objects are kept until the next invalidation. A cached payload of the
    /// wrong type counts as a miss.
    pub fn remember<T, F>(&self, key: &str, build: F) -> Result<T, TypoError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, TypoError>,
    {
        if !self.options.enabled {
            return build();
        }

        if let Some(value) = self.cache.get_object::<T>(key) {
            debug!("Reusing cached object {}", key);
            return Ok(value);
        }

        let value = build()?;
        if let Err(e) = self.cache.set_object(key, &value, None) {
            warn!("Failed to cache object {}: {}", key, e);
        }
        Ok(value)
    }

    /// Drops every cached fragment and object.
    pub fn clear_cache(&self) -> Result<(), TypoError> {
        self.cache.invalidate()?;
        Ok(())
    }
}

impl<S, E> fmt::Debug for FragmentCache<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentCache")
            .field("options", &self.options)
            .field("ttl_override", &self.ttl_override.is_some())
            .finish_non_exhaustive()
    }
}
