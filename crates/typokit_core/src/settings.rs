//! Typed typography settings.

use serde::{Deserialize, Serialize};
use tracing::debug;
use typokit_locale::{
    DashStyle, LanguageList, LocaleParts, LocaleResolver, QuoteStyle, TypographicDefaults,
};

use crate::config::keys;
use crate::{Config, LanguageCatalog, TypoError};

/// Settings handed to the transformation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub smart_quotes: bool,
    pub primary_quotes: QuoteStyle,
    pub secondary_quotes: QuoteStyle,
    pub smart_dashes: bool,
    pub dash_style: DashStyle,
    pub french_punctuation_spacing: bool,
    pub hyphenation: bool,
    /// `None` when no pattern language applies; hyphenation is then off.
    pub hyphenation_language: Option<String>,
    pub hyphenate_min_length: u32,
    pub hyphenate_min_before: u32,
    pub hyphenate_min_after: u32,
    pub diacritics: bool,
    pub diacritic_language: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = TypographicDefaults::default();
        Self {
            smart_quotes: true,
            primary_quotes: defaults.primary_quotes,
            secondary_quotes: defaults.secondary_quotes,
            smart_dashes: true,
            dash_style: defaults.dash_style,
            french_punctuation_spacing: defaults.french_punctuation_spacing,
            hyphenation: false,
            hyphenation_language: Some("en-US".to_string()),
            hyphenate_min_length: 5,
            hyphenate_min_before: 3,
            hyphenate_min_after: 2,
            diacritics: false,
            diacritic_language: Some("en-US".to_string()),
        }
    }
}

impl Settings {
    /// Builds settings from the option mapping for `locale`.
    ///
    /// Locale defaults (if `locale_defaults` is set) are applied first, then
    /// explicit options. Language options set to `auto` are matched against
    /// `languages`; when nothing matches, the feature is switched off.
    pub fn resolve(
        config: &Config,
        locale: &str,
        resolver: &LocaleResolver,
        languages: &LanguageCatalog,
    ) -> Result<Self, TypoError> {
        let parts = LocaleParts::parse(locale);
        let mut settings = Settings::default();

        if config.get_bool(keys::LOCALE_DEFAULTS)?.unwrap_or(false) {
            match resolver.match_locale(&parts.language, &parts.country, &parts.modifier) {
                Some(descriptor) => settings.apply_defaults(&descriptor.defaults),
                None => debug!("No locale rules for {}, using generic defaults", parts),
            }
        }

        if let Some(value) = config.get_bool(keys::SMART_QUOTES)? {
            settings.smart_quotes = value;
        }
        if let Some(name) = config.get_str(keys::SMART_QUOTES_PRIMARY)? {
            settings.primary_quotes = parse_style(keys::SMART_QUOTES_PRIMARY, name)?;
        }
        if let Some(name) = config.get_str(keys::SMART_QUOTES_SECONDARY)? {
            settings.secondary_quotes = parse_style(keys::SMART_QUOTES_SECONDARY, name)?;
        }
        if let Some(value) = config.get_bool(keys::SMART_DASHES)? {
            settings.smart_dashes = value;
        }
        if let Some(name) = config.get_str(keys::SMART_DASHES_STYLE)? {
            settings.dash_style = parse_style(keys::SMART_DASHES_STYLE, name)?;
        }
        if let Some(value) = config.get_bool(keys::FRENCH_PUNCTUATION_SPACING)? {
            settings.french_punctuation_spacing = value;
        }

        if let Some(value) = config.get_bool(keys::HYPHENATE)? {
            settings.hyphenation = value;
        }
        if let Some(value) = get_length(config, keys::HYPHENATE_MIN_LENGTH)? {
            settings.hyphenate_min_length = value;
        }
        if let Some(value) = get_length(config, keys::HYPHENATE_MIN_BEFORE)? {
            settings.hyphenate_min_before = value;
        }
        if let Some(value) = get_length(config, keys::HYPHENATE_MIN_AFTER)? {
            settings.hyphenate_min_after = value;
        }
        if let Some(code) = config.get_str(keys::HYPHENATE_LANGUAGES)? {
            settings.hyphenation_language =
                select_language(code, &parts, resolver, &languages.hyphenation);
        }
        if settings.hyphenation_language.is_none() {
            settings.hyphenation = false;
        }

        if let Some(value) = config.get_bool(keys::DIACRITIC_REPLACEMENT)? {
            settings.diacritics = value;
        }
        if let Some(code) = config.get_str(keys::DIACRITIC_LANGUAGES)? {
            settings.diacritic_language =
                select_language(code, &parts, resolver, &languages.diacritics);
        }
        if settings.diacritic_language.is_none() {
            settings.diacritics = false;
        }

        Ok(settings)
    }

    /// Overwrites the locale-dependent fields.
    pub fn apply_defaults(&mut self, defaults: &TypographicDefaults) {
        self.primary_quotes = defaults.primary_quotes;
        self.secondary_quotes = defaults.secondary_quotes;
        self.dash_style = defaults.dash_style;
        self.french_punctuation_spacing = defaults.french_punctuation_spacing;
    }

    /// Computes a stable hash of the settings for cache keys.
    ///
    /// Always 64 hex characters.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

fn parse_style<T>(key: &str, name: &str) -> Result<T, TypoError>
where
    T: std::str::FromStr<Err = typokit_locale::StyleError>,
{
    name.parse()
        .map_err(|e| TypoError::config(format!("Option '{}': {}", key, e)))
}

fn get_length(config: &Config, key: &str) -> Result<Option<u32>, TypoError> {
    config
        .get_int(key)?
        .map(|value| {
            u32::try_from(value).map_err(|_| {
                TypoError::config(format!("Option '{}' must not be negative: {}", key, value))
            })
        })
        .transpose()
}

fn select_language(
    code: &str,
    parts: &LocaleParts,
    resolver: &LocaleResolver,
    candidates: &LanguageList,
) -> Option<String> {
    match code.trim() {
        "" => None,
        keys::AUTO => {
            let matched =
                resolver.match_language(candidates, &parts.full_locale(), &parts.language);
            if matched.is_none() {
                debug!("No language for {} among {} candidates", parts, candidates.len());
            }
            matched
        }
        explicit => Some(explicit.to_string()),
    }
}
