//! Locale descriptors.

use serde::{Deserialize, Serialize};

use crate::{DashStyle, QuoteStyle};

/// Typographic defaults a locale applies to the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographicDefaults {
    pub primary_quotes: QuoteStyle,
    pub secondary_quotes: QuoteStyle,
    pub dash_style: DashStyle,
    /// Narrow no-break space before `: ; ! ?` and inside guillemets.
    pub french_punctuation_spacing: bool,
}

impl Default for TypographicDefaults {
    fn default() -> Self {
        Self {
            primary_quotes: QuoteStyle::DoubleCurled,
            secondary_quotes: QuoteStyle::SingleCurled,
            dash_style: DashStyle::TraditionalUs,
            french_punctuation_spacing: false,
        }
    }
}

/// A rule set describing typographic defaults for a language or region.
///
/// Each constraint list restricts one locale part; an empty list matches
/// anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleDescriptor {
    pub name: String,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub modifiers: Vec<String>,
    /// Higher priorities are tried first.
    pub priority: i32,
    pub defaults: TypographicDefaults,
}

impl LocaleDescriptor {
    /// Creates a descriptor constrained to `languages`, matching any country
    /// and modifier.
    pub fn new(name: impl Into<String>, languages: &[&str], defaults: TypographicDefaults) -> Self {
        Self {
            name: name.into(),
            languages: languages.iter().map(|s| s.to_string()).collect(),
            countries: Vec::new(),
            modifiers: Vec::new(),
            priority: 0,
            defaults,
        }
    }

    pub fn with_countries(mut self, countries: &[&str]) -> Self {
        self.countries = countries.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns whether this descriptor applies to the given locale parts.
    pub fn matches(&self, language: &str, country: &str, modifier: &str) -> bool {
        fn allows(constraint: &[String], value: &str) -> bool {
            constraint.is_empty() || constraint.iter().any(|c| c == value)
        }

        allows(&self.languages, language)
            && allows(&self.countries, country)
            && allows(&self.modifiers, modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_constraints_match_anything() {
        let any = LocaleDescriptor::new("Any", &[], TypographicDefaults::default());
        assert!(any.matches("xx", "YY", "zz"));
        assert!(any.matches("", "", ""));
    }

    #[test]
    fn test_all_constraints_must_hold() {
        let swiss = LocaleDescriptor::new("Swiss German", &["de"], TypographicDefaults::default())
            .with_countries(&["CH", "LI"])
            .with_modifiers(&["formal"]);

        assert!(swiss.matches("de", "CH", "formal"));
        assert!(swiss.matches("de", "LI", "formal"));
        assert!(!swiss.matches("de", "CH", ""));
        assert!(!swiss.matches("de", "DE", "formal"));
        assert!(!swiss.matches("fr", "CH", "formal"));
    }

    #[test]
    fn test_empty_candidate_only_matches_unconstrained_part() {
        let german = LocaleDescriptor::new("German", &["de"], TypographicDefaults::default());
        assert!(german.matches("de", "", ""));

        let austrian = german.clone().with_countries(&["AT"]);
        assert!(!austrian.matches("de", "", ""));
    }
}
