//! Locale and language lookups

use miette::{IntoDiagnostic, Result};
use typokit_locale::{LanguageList, LocaleParts, LocaleResolver, QuoteStyle};

use crate::cli::OutputFormat;

/// Prints the rules selected for `locale`. Returns `false` when none apply.
pub fn run_locale(locale: &str, format: OutputFormat) -> Result<bool> {
    let resolver = LocaleResolver::default();
    let parts = LocaleParts::parse(locale);

    let Some(descriptor) =
        resolver.match_locale(&parts.language, &parts.country, &parts.modifier)
    else {
        println!("No locale rules for {}, generic defaults apply", parts);
        return Ok(false);
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(descriptor).into_diagnostic()?;
            println!("{}", output);
        }
        OutputFormat::Text => {
            let defaults = &descriptor.defaults;
            println!("Locale:          {}", parts);
            println!(
                "Rules:           {} (priority {})",
                descriptor.name, descriptor.priority
            );
            println!("Primary quotes:  {}", describe_quotes(defaults.primary_quotes));
            println!(
                "Secondary:       {}",
                describe_quotes(defaults.secondary_quotes)
            );
            println!("Dashes:          {}", defaults.dash_style);
            println!(
                "French spacing:  {}",
                if defaults.french_punctuation_spacing {
                    "yes"
                } else {
                    "no"
                }
            );
        }
    }

    Ok(true)
}

/// Prints the candidate chosen for `locale`. Returns `false` on no match or
/// ambiguity.
pub fn run_language(locale: &str, candidates: &[String]) -> Result<bool> {
    let resolver = LocaleResolver::default();
    let parts = LocaleParts::parse(locale);
    let list: LanguageList = candidates
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(|code| (code.to_string(), code.to_string()))
        .collect();

    match resolver.match_language(&list, &parts.full_locale(), &parts.language) {
        Some(code) => {
            println!("{}", code);
            Ok(true)
        }
        None => {
            println!("No unambiguous language for {}", parts);
            Ok(false)
        }
    }
}

fn describe_quotes(style: QuoteStyle) -> String {
    let (open, close) = style.marks();
    format!("{} {}\u{2026}{}", style, open, close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_quotes() {
        assert_eq!(
            describe_quotes(QuoteStyle::DoubleGuillemets),
            "doubleGuillemets \u{ab}\u{2026}\u{bb}"
        );
    }
}
