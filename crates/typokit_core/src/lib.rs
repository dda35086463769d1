//! # typokit_core
//!
//! Core of Typokit: settings and the fragment processing cache.
//!
//! This crate provides:
//! - The flat option mapping (`Config`) consumed from the host's option store
//! - Strongly typed `Settings` with locale-derived defaults and a stable hash
//! - The `TextEngine` seam for the external typographic transformation
//! - The `FragmentCache`, which memoizes processed fragments in a
//!   `VersionedCache`
//!
//! ## Example
//!
//! ```rust,ignore
//! use typokit_cache::{MemoryStore, VersionedCache};
//! use typokit_core::{Config, FragmentCache, ProcessFlags};
//! use typokit_locale::LocaleResolver;
//!
//! let cache = VersionedCache::new(MemoryStore::new(), "typo");
//! let fragments = FragmentCache::new(cache, engine, LocaleResolver::default());
//!
//! let settings = fragments.settings(&Config::from_file("options.json")?, "de_DE")?;
//! let html = fragments.process("\"Hallo\" - Welt", ProcessFlags::default(), &settings);
//! ```

mod config;
mod engine;
mod error;
mod fragment;
mod settings;

pub use config::{Config, ConfigValue, keys};
pub use engine::{LanguageCatalog, ProcessFlags, TextEngine};
pub use error::TypoError;
pub use fragment::{DEFAULT_FRAGMENT_TTL, FragmentCache, FragmentCacheOptions, TtlOverride};
pub use settings::Settings;

pub use typokit_locale::{DashStyle, LanguageList, LocaleResolver, QuoteStyle};
