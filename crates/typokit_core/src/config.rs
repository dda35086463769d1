//! Option mapping supplied by the host's option store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::TypoError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/options.json");
static OPTIONS_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Option names understood by [`Settings::resolve`](crate::Settings::resolve).
pub mod keys {
    pub const LOCALE_DEFAULTS: &str = "locale_defaults";
    pub const SMART_QUOTES: &str = "smart_quotes";
    pub const SMART_QUOTES_PRIMARY: &str = "smart_quotes_primary";
    pub const SMART_QUOTES_SECONDARY: &str = "smart_quotes_secondary";
    pub const SMART_DASHES: &str = "smart_dashes";
    pub const SMART_DASHES_STYLE: &str = "smart_dashes_style";
    pub const FRENCH_PUNCTUATION_SPACING: &str = "french_punctuation_spacing";
    pub const HYPHENATE: &str = "hyphenate";
    pub const HYPHENATE_LANGUAGES: &str = "hyphenate_languages";
    pub const HYPHENATE_MIN_LENGTH: &str = "hyphenate_min_length";
    pub const HYPHENATE_MIN_BEFORE: &str = "hyphenate_min_before";
    pub const HYPHENATE_MIN_AFTER: &str = "hyphenate_min_after";
    pub const DIACRITIC_REPLACEMENT: &str = "diacritic_replacement";
    pub const DIACRITIC_LANGUAGES: &str = "diacritic_languages";

    /// Language option value asking for locale-based selection.
    pub const AUTO: &str = "auto";
}

/// A scalar option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ConfigValue {
    fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Int(_) => "integer",
            ConfigValue::Str(_) => "string",
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Str(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Str(value)
    }
}

/// Flat mapping from option name to scalar value.
///
/// Keys are kept sorted so that serialization, and therefore [`hash`](Self::hash),
/// is canonical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: BTreeMap<String, ConfigValue>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TypoError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| TypoError::config(format!("Failed to read options: {}", e)))?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON object with schema validation.
    pub fn from_json(json: &str) -> Result<Self, TypoError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| TypoError::config(format!("Invalid JSON: {}", e)))?;

        let schema = OPTIONS_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded options schema");
            Validator::new(&schema_json).expect("Invalid options schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(TypoError::config(format!(
                "Options validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| TypoError::config(format!("Invalid options: {}", e)))
    }

    /// Sets an option, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an option.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw value of an option.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Returns a boolean option. A value of another type is an error.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, TypoError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ConfigValue::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(type_mismatch(key, "boolean", other)),
        }
    }

    /// Returns an integer option. A value of another type is an error.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, TypoError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ConfigValue::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(type_mismatch(key, "integer", other)),
        }
    }

    /// Returns a string option. A value of another type is an error.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, TypoError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ConfigValue::Str(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(type_mismatch(key, "string", other)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Computes a hash of the configuration for cache keys.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

fn type_mismatch(key: &str, expected: &str, found: &ConfigValue) -> TypoError {
    TypoError::config(format!(
        "Option '{}' must be a {}, found {}",
        key,
        expected,
        found.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{"smart_quotes": true, "hyphenate_min_length": 6, "hyphenate_languages": "auto"}"#,
        )
        .unwrap();

        assert_eq!(config.len(), 3);
        assert_eq!(config.get_bool(keys::SMART_QUOTES).unwrap(), Some(true));
        assert_eq!(config.get_int(keys::HYPHENATE_MIN_LENGTH).unwrap(), Some(6));
        assert_eq!(
            config.get_str(keys::HYPHENATE_LANGUAGES).unwrap(),
            Some("auto")
        );
        assert_eq!(config.get_bool("missing").unwrap(), None);
    }

    #[test]
    fn test_unknown_scalar_options_are_kept() {
        let config = Config::from_json(r#"{"host_specific": "value"}"#).unwrap();
        assert_eq!(
            config.get("host_specific"),
            Some(&ConfigValue::Str("value".to_string()))
        );
    }

    #[rstest]
    #[case::not_an_object(r#"[1, 2]"#, "validation failed")]
    #[case::nested_value(r#"{"smart_quotes": {"on": true}}"#, "validation failed")]
    #[case::wrong_type(r#"{"smart_quotes": "yes"}"#, "validation failed")]
    #[case::unknown_style(r#"{"smart_quotes_primary": "fancy"}"#, "validation failed")]
    #[case::out_of_range(r#"{"hyphenate_min_length": 1}"#, "validation failed")]
    #[case::invalid_json(r#"{"smart_quotes": "#, "Invalid JSON")]
    fn test_invalid_options(#[case] json: &str, #[case] expected_error_part: &str) {
        let err = Config::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_typed_getters_reject_mismatches() {
        let config = Config::new().with(keys::SMART_QUOTES, "yes");
        let err = config.get_bool(keys::SMART_QUOTES).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Option 'smart_quotes' must be a boolean, found string"
        );
    }

    #[test]
    fn test_hash_is_order_independent() {
        let a = Config::new().with("a", true).with("b", 2i64);
        let b = Config::new().with("b", 2i64).with("a", true);
        let c = Config::new().with("a", false).with("b", 2i64);

        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
        assert_eq!(a.hash().len(), 64);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        fs::write(&path, r#"{"smart_dashes": false}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.get_bool(keys::SMART_DASHES).unwrap(), Some(false));

        assert!(Config::from_file(dir.path().join("missing.json")).is_err());
    }
}
