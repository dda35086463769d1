//! Seam to the external typographic transformation engine.

use typokit_locale::LanguageList;

use crate::Settings;

/// Context flags folded into the fragment fingerprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ProcessFlags {
    /// Output goes to a syndication feed.
    pub feed: bool,
    /// Fragment is a title.
    pub title: bool,
}

impl ProcessFlags {
    pub fn feed() -> Self {
        Self {
            feed: true,
            title: false,
        }
    }

    pub fn title() -> Self {
        Self {
            feed: false,
            title: true,
        }
    }

    /// Compact representation used in cache keys.
    pub fn bits(self) -> u8 {
        (self.feed as u8) | ((self.title as u8) << 1)
    }
}

/// Languages an engine ships rules for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    /// Hyphenation pattern languages.
    pub hyphenation: LanguageList,
    /// Diacritic replacement languages.
    pub diacritics: LanguageList,
}

/// The typographic transformation.
///
/// Must be a pure function of its inputs: the fragment cache relies on that to
/// reuse results and to tolerate duplicate computation.
pub trait TextEngine: Send + Sync {
    /// Applies typographic rules to `text`.
    fn process(&self, text: &str, settings: &Settings, flags: ProcessFlags) -> String;

    /// Returns the languages available for automatic selection.
    fn languages(&self) -> LanguageCatalog {
        LanguageCatalog::default()
    }
}

impl<E: TextEngine + ?Sized> TextEngine for &E {
    fn process(&self, text: &str, settings: &Settings, flags: ProcessFlags) -> String {
        (**self).process(text, settings, flags)
    }

    fn languages(&self) -> LanguageCatalog {
        (**self).languages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits_are_distinct() {
        let all = [
            ProcessFlags::default(),
            ProcessFlags::feed(),
            ProcessFlags::title(),
            ProcessFlags {
                feed: true,
                title: true,
            },
        ];
        let bits: std::collections::HashSet<u8> = all.iter().map(|f| f.bits()).collect();
        assert_eq!(bits.len(), 4);
    }
}
