//! # typokit_locale
//!
//! Locale resolution for Typokit.
//!
//! This crate provides:
//! - Decomposition of raw locale tokens (`de_DE_formal`) into parts
//! - Locale descriptors carrying language-specific typographic defaults
//! - The built-in descriptor registry
//! - The `LocaleResolver`, which picks a descriptor for a locale and matches
//!   locales against engine language lists (hyphenation, diacritics)
//!
//! ## Example
//!
//! ```rust,ignore
//! use typokit_locale::LocaleResolver;
//!
//! let resolver = LocaleResolver::default();
//! let german = resolver.resolve_locale("de_CH").unwrap();
//! assert_eq!(german.name, "Swiss German");
//! ```

mod descriptor;
mod parts;
mod registry;
mod resolver;
mod styles;

pub use descriptor::{LocaleDescriptor, TypographicDefaults};
pub use parts::LocaleParts;
pub use registry::builtin_descriptors;
pub use resolver::{LanguageList, LanguageOverride, LocaleResolver};
pub use styles::{DashStyle, QuoteStyle, StyleError};
