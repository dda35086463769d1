//! Settings resolution

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::debug;
use typokit_core::{Config, LanguageCatalog, LanguageList, LocaleResolver, Settings};

/// Resolves settings for `locale` and prints them with their hash as JSON.
pub fn run_settings(
    options: Option<&Path>,
    locale: &str,
    hyphenation_languages: &[String],
    diacritic_languages: &[String],
) -> Result<()> {
    let config = match options {
        Some(path) => {
            debug!("Loading options from {}", path.display());
            Config::from_file(path).into_diagnostic()?
        }
        None => Config::new(),
    };

    let catalog = LanguageCatalog {
        hyphenation: language_list(hyphenation_languages),
        diacritics: language_list(diacritic_languages),
    };

    let settings = Settings::resolve(&config, locale, &LocaleResolver::default(), &catalog)
        .into_diagnostic()?;

    let output = serde_json::json!({
        "locale": locale,
        "hash": settings.hash(),
        "settings": settings,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}

fn language_list(codes: &[String]) -> LanguageList {
    codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(|code| (code.to_string(), code.to_string()))
        .collect()
}
