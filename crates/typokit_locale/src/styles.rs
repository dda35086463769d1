//! Named quote and dash styles.
//!
//! Only the names are defined here; the engine owns the actual replacement
//! rules. Names match the option values stored by the configuration layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a style name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("Unknown quote style: {0}")]
    UnknownQuoteStyle(String),

    #[error("Unknown dash style: {0}")]
    UnknownDashStyle(String),
}

/// A pair of opening/closing quotation marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuoteStyle {
    DoubleCurled,
    DoubleCurledReversed,
    DoubleLow9,
    DoubleLow9Reversed,
    SingleCurled,
    SingleCurledReversed,
    SingleLow9,
    SingleLow9Reversed,
    DoubleGuillemetsFrench,
    DoubleGuillemets,
    DoubleGuillemetsReversed,
    SingleGuillemets,
    SingleGuillemetsReversed,
    CornerBracket,
    WhiteCornerBracket,
}

impl QuoteStyle {
    pub const ALL: [QuoteStyle; 15] = [
        Self::DoubleCurled,
        Self::DoubleCurledReversed,
        Self::DoubleLow9,
        Self::DoubleLow9Reversed,
        Self::SingleCurled,
        Self::SingleCurledReversed,
        Self::SingleLow9,
        Self::SingleLow9Reversed,
        Self::DoubleGuillemetsFrench,
        Self::DoubleGuillemets,
        Self::DoubleGuillemetsReversed,
        Self::SingleGuillemets,
        Self::SingleGuillemetsReversed,
        Self::CornerBracket,
        Self::WhiteCornerBracket,
    ];

    /// Option value for this style.
    pub fn name(self) -> &'static str {
        match self {
            Self::DoubleCurled => "doubleCurled",
            Self::DoubleCurledReversed => "doubleCurledReversed",
            Self::DoubleLow9 => "doubleLow9",
            Self::DoubleLow9Reversed => "doubleLow9Reversed",
            Self::SingleCurled => "singleCurled",
            Self::SingleCurledReversed => "singleCurledReversed",
            Self::SingleLow9 => "singleLow9",
            Self::SingleLow9Reversed => "singleLow9Reversed",
            Self::DoubleGuillemetsFrench => "doubleGuillemetsFrench",
            Self::DoubleGuillemets => "doubleGuillemets",
            Self::DoubleGuillemetsReversed => "doubleGuillemetsReversed",
            Self::SingleGuillemets => "singleGuillemets",
            Self::SingleGuillemetsReversed => "singleGuillemetsReversed",
            Self::CornerBracket => "cornerBracket",
            Self::WhiteCornerBracket => "whiteCornerBracket",
        }
    }

    /// Opening and closing marks, for display.
    pub fn marks(self) -> (&'static str, &'static str) {
        match self {
            Self::DoubleCurled => ("\u{201c}", "\u{201d}"),
            Self::DoubleCurledReversed => ("\u{201d}", "\u{201c}"),
            Self::DoubleLow9 => ("\u{201e}", "\u{201d}"),
            Self::DoubleLow9Reversed => ("\u{201e}", "\u{201c}"),
            Self::SingleCurled => ("\u{2018}", "\u{2019}"),
            Self::SingleCurledReversed => ("\u{2019}", "\u{2018}"),
            Self::SingleLow9 => ("\u{201a}", "\u{2019}"),
            Self::SingleLow9Reversed => ("\u{201a}", "\u{2018}"),
            Self::DoubleGuillemetsFrench => ("\u{ab}\u{a0}", "\u{a0}\u{bb}"),
            Self::DoubleGuillemets => ("\u{ab}", "\u{bb}"),
            Self::DoubleGuillemetsReversed => ("\u{bb}", "\u{ab}"),
            Self::SingleGuillemets => ("\u{2039}", "\u{203a}"),
            Self::SingleGuillemetsReversed => ("\u{203a}", "\u{2039}"),
            Self::CornerBracket => ("\u{300c}", "\u{300d}"),
            Self::WhiteCornerBracket => ("\u{300e}", "\u{300f}"),
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuoteStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| StyleError::UnknownQuoteStyle(s.to_string()))
    }
}

/// Em/en dash conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashStyle {
    /// Em dash without spaces for parenthetical dashes.
    TraditionalUs,
    /// Spaced en dash.
    International,
    /// Spaced en dash with regular instead of hair spaces.
    InternationalNoHairSpaces,
}

impl DashStyle {
    pub const ALL: [DashStyle; 3] = [
        Self::TraditionalUs,
        Self::International,
        Self::InternationalNoHairSpaces,
    ];

    /// Option value for this style.
    pub fn name(self) -> &'static str {
        match self {
            Self::TraditionalUs => "traditionalUs",
            Self::International => "international",
            Self::InternationalNoHairSpaces => "internationalNoHairSpaces",
        }
    }
}

impl fmt::Display for DashStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DashStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| StyleError::UnknownDashStyle(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for style in QuoteStyle::ALL {
            assert_eq!(style.name().parse::<QuoteStyle>(), Ok(style));
        }
        for style in DashStyle::ALL {
            assert_eq!(style.name().parse::<DashStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_serde_uses_option_names() {
        let json = serde_json::to_string(&QuoteStyle::DoubleLow9Reversed).unwrap();
        assert_eq!(json, "\"doubleLow9Reversed\"");
        let json = serde_json::to_string(&DashStyle::TraditionalUs).unwrap();
        assert_eq!(json, "\"traditionalUs\"");
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            "fancy".parse::<QuoteStyle>(),
            Err(StyleError::UnknownQuoteStyle("fancy".to_string()))
        );
        assert_eq!(
            "long".parse::<DashStyle>(),
            Err(StyleError::UnknownDashStyle("long".to_string()))
        );
    }
}
