//! Locale resolution logic.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::{LocaleDescriptor, LocaleParts, builtin_descriptors};

/// Available language codes mapped to display names.
///
/// Sorted, so narrowing over candidates is deterministic.
pub type LanguageList = BTreeMap<String, String>;

/// Hook that may replace the result of [`LocaleResolver::match_language`].
///
/// Called with `(candidates, full_locale, language)`; returning `None` or an
/// empty string falls through to the built-in matching.
pub type LanguageOverride = Box<dyn Fn(&LanguageList, &str, &str) -> Option<String> + Send + Sync>;

/// Legacy and alternative language codes.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("chi", "zh"),
    ("deu", "de"),
    ("dut", "nl"),
    ("eng", "en"),
    ("fra", "fr"),
    ("fre", "fr"),
    ("ger", "de"),
    ("ita", "it"),
    ("jpn", "ja"),
    ("nb", "no"),
    ("nld", "nl"),
    ("nn", "no"),
    ("por", "pt"),
    ("spa", "es"),
    ("zho", "zh"),
];

/// Locales whose dictionaries are keyed by script rather than region.
const LOCALE_ALIASES: &[(&str, &str)] = &[
    ("zh-CN", "zh-Hans"),
    ("zh-HK", "zh-Hant"),
    ("zh-MO", "zh-Hant"),
    ("zh-SG", "zh-Hans"),
    ("zh-TW", "zh-Hant"),
];

fn normalize_language(language: &str) -> String {
    let language = language.trim().to_ascii_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == language)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(language)
}

fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().replace('_', "-");
    let locale = match locale.split_once('-') {
        Some((language, rest)) => format!("{}-{}", normalize_language(language), rest),
        None => normalize_language(&locale),
    };

    LOCALE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(&locale))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(locale)
}

/// Selects typographic rule sets and language codes for a locale.
pub struct LocaleResolver {
    descriptors: Vec<LocaleDescriptor>,
    language_override: Option<LanguageOverride>,
}

impl LocaleResolver {
    /// Creates a resolver over `descriptors`.
    ///
    /// Descriptors are sorted once by descending priority; descriptors of
    /// equal priority keep their relative order.
    pub fn new(mut descriptors: Vec<LocaleDescriptor>) -> Self {
        descriptors.sort_by_key(|descriptor| std::cmp::Reverse(descriptor.priority));
        Self {
            descriptors,
            language_override: None,
        }
    }

    /// Installs a hook that may override [`match_language`](Self::match_language).
    pub fn with_language_override<F>(mut self, hook: F) -> Self
    where
        F: Fn(&LanguageList, &str, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.language_override = Some(Box::new(hook));
        self
    }

    /// Returns the descriptors in matching order.
    pub fn descriptors(&self) -> &[LocaleDescriptor] {
        &self.descriptors
    }

    /// Returns the first descriptor (by priority) matching the locale parts.
    ///
    /// `None` means no rule set applies; callers fall back to generic
    /// defaults.
    pub fn match_locale(
        &self,
        language: &str,
        country: &str,
        modifier: &str,
    ) -> Option<&LocaleDescriptor> {
        let found = self
            .descriptors
            .iter()
            .find(|descriptor| descriptor.matches(language, country, modifier));

        debug!(
            "Locale {}/{}/{} matched {}",
            language,
            country,
            modifier,
            found.map(|d| d.name.as_str()).unwrap_or("nothing")
        );
        found
    }

    /// Decomposes a raw locale token and matches it.
    pub fn resolve_locale(&self, raw: &str) -> Option<&LocaleDescriptor> {
        let parts = LocaleParts::parse(raw);
        self.match_locale(&parts.language, &parts.country, &parts.modifier)
    }

    /// Picks the best code from `candidates` for a locale.
    ///
    /// # Arguments
    ///
    /// * `candidates` - Available codes (e.g. hyphenation languages)
    /// * `locale` - Full locale, `language-country` (`_` is accepted)
    /// * `language` - Bare language code
    ///
    /// Exact matches on the locale, then the language, win. Otherwise the
    /// codes starting with `language-` are considered: a single one wins; if
    /// several remain, only those starting with the full locale are kept and a
    /// single survivor wins. Ambiguity yields `None`.
    pub fn match_language(
        &self,
        candidates: &LanguageList,
        locale: &str,
        language: &str,
    ) -> Option<String> {
        if let Some(hook) = &self.language_override
            && let Some(code) = hook(candidates, locale, language)
            && !code.is_empty()
        {
            debug!("Language override for {} returned {}", locale, code);
            return Some(code);
        }

        let language = normalize_language(language);
        let locale = normalize_locale(locale);

        if candidates.contains_key(&locale) {
            return Some(locale);
        }
        if candidates.contains_key(&language) {
            return Some(language);
        }

        let prefix = format!("{}-", language);
        let by_language: Vec<&String> = candidates
            .keys()
            .filter(|code| code.starts_with(&prefix))
            .collect();

        let result = match by_language.as_slice() {
            [] => None,
            [only] => Some((*only).clone()),
            several => {
                let by_locale: Vec<&&String> = several
                    .iter()
                    .filter(|code| code.starts_with(&locale))
                    .collect();
                match by_locale.as_slice() {
                    [only] => Some((**only).clone()),
                    _ => None,
                }
            }
        };

        debug!(
            "Language {} ({}) matched {}",
            locale,
            language,
            result.as_deref().unwrap_or("nothing")
        );
        result
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(builtin_descriptors())
    }
}

impl fmt::Debug for LocaleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleResolver")
            .field("descriptors", &self.descriptors)
            .field("language_override", &self.language_override.is_some())
            .finish()
    }
}
