//! Raw locale token decomposition.

use std::fmt;

/// A locale token split into language, country and modifier.
///
/// Raw tokens use `_` as separator (`de_DE_formal`); `-` is accepted as an
/// alias. The language is everything before the first separator, the country
/// is exactly the two characters after it, and the modifier is everything
/// after a second separator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleParts {
    /// Lowercase language code, e.g. `de`.
    pub language: String,
    /// Uppercase two-letter country code, or empty.
    pub country: String,
    /// Free-form modifier, or empty.
    pub modifier: String,
}

impl LocaleParts {
    pub fn new(
        language: impl Into<String>,
        country: impl Into<String>,
        modifier: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
            modifier: modifier.into(),
        }
    }

    /// Splits a raw locale token.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().replace('-', "_");
        let (language, rest) = match normalized.split_once('_') {
            Some((language, rest)) => (language, rest),
            None => (normalized.as_str(), ""),
        };

        let country: String = rest.chars().take(2).collect();
        let modifier = rest
            .split_once('_')
            .map(|(_, modifier)| modifier)
            .unwrap_or_default();

        Self {
            language: language.to_ascii_lowercase(),
            country: country.to_ascii_uppercase(),
            modifier: modifier.to_string(),
        }
    }

    /// Returns `language-country`, or just the language without a country.
    pub fn full_locale(&self) -> String {
        if self.country.is_empty() {
            self.language.clone()
        } else {
            format!("{}-{}", self.language, self.country)
        }
    }
}

/// Renders the canonical `-` separated form, including the modifier.
impl fmt::Display for LocaleParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_locale())?;
        if !self.modifier.is_empty() {
            write!(f, "-{}", self.modifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::language_only("en", "en", "", "")]
    #[case::language_country("en_US", "en", "US", "")]
    #[case::with_modifier("de_DE_formal", "de", "DE", "formal")]
    #[case::modifier_keeps_separators("de_CH_informal_x", "de", "CH", "informal_x")]
    #[case::dash_separator("fr-CA", "fr", "CA", "")]
    #[case::case_normalized("PT_br", "pt", "BR", "")]
    #[case::three_letter_language("gsw_CH", "gsw", "CH", "")]
    #[case::country_is_two_chars("es_419", "es", "41", "")]
    #[case::empty("", "", "", "")]
    fn test_parse(
        #[case] raw: &str,
        #[case] language: &str,
        #[case] country: &str,
        #[case] modifier: &str,
    ) {
        assert_eq!(
            LocaleParts::parse(raw),
            LocaleParts::new(language, country, modifier)
        );
    }

    #[test]
    fn test_full_locale_uses_dash() {
        assert_eq!(LocaleParts::parse("de_DE_formal").full_locale(), "de-DE");
        assert_eq!(LocaleParts::parse("de").full_locale(), "de");
    }

    #[test]
    fn test_display() {
        assert_eq!(LocaleParts::parse("de_DE_formal").to_string(), "de-DE-formal");
        assert_eq!(LocaleParts::parse("nl_NL").to_string(), "nl-NL");
    }
}
