//! Built-in locale descriptors.

use crate::{DashStyle, LocaleDescriptor, QuoteStyle, TypographicDefaults};

const LANGUAGE_PRIORITY: i32 = 10;
const REGION_PRIORITY: i32 = 20;

fn defaults(
    primary_quotes: QuoteStyle,
    secondary_quotes: QuoteStyle,
    dash_style: DashStyle,
    french_punctuation_spacing: bool,
) -> TypographicDefaults {
    TypographicDefaults {
        primary_quotes,
        secondary_quotes,
        dash_style,
        french_punctuation_spacing,
    }
}

/// Returns the built-in descriptors.
///
/// Regional variants carry a higher priority than the language-wide
/// descriptor they refine, so `de_CH` resolves to Swiss German before German.
pub fn builtin_descriptors() -> Vec<LocaleDescriptor> {
    use DashStyle::*;
    use QuoteStyle::*;

    vec![
        LocaleDescriptor::new(
            "US English",
            &["en"],
            defaults(DoubleCurled, SingleCurled, TraditionalUs, false),
        )
        .with_priority(LANGUAGE_PRIORITY),
        LocaleDescriptor::new(
            "UK English",
            &["en"],
            defaults(SingleCurled, DoubleCurled, International, false),
        )
        .with_countries(&["GB", "IE", "AU", "NZ", "ZA", "IN"])
        .with_priority(REGION_PRIORITY),
        LocaleDescriptor::new(
            "German",
            &["de"],
            defaults(DoubleLow9Reversed, SingleLow9Reversed, International, false),
        )
        .with_priority(LANGUAGE_PRIORITY),
        LocaleDescriptor::new(
            "Swiss German",
            &["de", "gsw"],
            defaults(DoubleGuillemets, SingleGuillemets, International, false),
        )
        .with_countries(&["CH", "LI"])
        .with_priority(REGION_PRIORITY),
        LocaleDescriptor::new(
            "French",
            &["fr"],
            defaults(DoubleGuillemetsFrench, DoubleCurled, International, true),
        )
        .with_priority(LANGUAGE_PRIORITY),
        LocaleDescriptor::new(
            "Swiss French",
            &["fr"],
            defaults(DoubleGuillemets, SingleGuillemets, International, false),
        )
        .with_countries(&["CH"])
        .with_priority(REGION_PRIORITY),
        LocaleDescriptor::new(
            "Dutch",
            &["nl"],
            defaults(DoubleLow9, SingleCurled, International, false),
        )
        .with_priority(LANGUAGE_PRIORITY),
        LocaleDescriptor::new(
            "Sino-Japanese",
            &["zh", "ja"],
            defaults(CornerBracket, WhiteCornerBracket, International, false),
        )
        .with_priority(LANGUAGE_PRIORITY),
    ]
}
