//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the `typo` binary.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a command for the typo CLI
fn typo_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_typo"))
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        typo_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        typo_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn fails_without_subcommand() {
        typo_cmd().assert().failure();
    }
}

mod locale_command {
    use super::*;

    #[test]
    fn shows_regional_rules() {
        typo_cmd()
            .args(["locale", "de_CH"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Swiss German"))
            .stdout(predicate::str::contains("doubleGuillemets"));
    }

    #[test]
    fn accepts_dash_separator() {
        typo_cmd()
            .args(["locale", "fr-FR"])
            .assert()
            .success()
            .stdout(predicate::str::contains("French spacing:  yes"));
    }

    #[test]
    fn prints_json() {
        let output = typo_cmd()
            .args(["locale", "en_GB", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["priority"], 20);
        assert_eq!(json["defaults"]["primary_quotes"], "singleCurled");
    }

    #[test]
    fn unknown_locale_exits_with_one() {
        typo_cmd()
            .args(["locale", "xx_YY"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("generic defaults"));
    }
}

mod language_command {
    use super::*;

    #[test]
    fn picks_single_prefix_match() {
        typo_cmd()
            .args(["language", "de_AT", "--candidates", "de-DE,en-US"])
            .assert()
            .success()
            .stdout(predicate::str::diff("de-DE\n"));
    }

    #[test]
    fn narrows_by_country() {
        typo_cmd()
            .args([
                "language",
                "de_CH",
                "--candidates",
                "de-DE-1901,de-DE-1996,de-CH-1901",
            ])
            .assert()
            .success()
            .stdout(predicate::str::diff("de-CH-1901\n"));
    }

    #[test]
    fn ambiguity_exits_with_one() {
        typo_cmd()
            .args(["language", "de_DE", "--candidates", "de-DE-1901,de-DE-1996"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("No unambiguous language"));
    }
}

mod settings_command {
    use super::*;
    use std::fs;

    #[test]
    fn resolves_settings_from_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = dir.path().join("options.json");
        fs::write(
            &options,
            r#"{"locale_defaults": true, "hyphenate": true, "hyphenate_languages": "auto"}"#,
        )
        .unwrap();

        let output = typo_cmd()
            .arg("settings")
            .arg("--options")
            .arg(&options)
            .args(["--locale", "de_CH"])
            .args(["--hyphenation-languages", "de-DE-1901,de-CH-1901"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["settings"]["primary_quotes"], "doubleGuillemets");
        assert_eq!(json["settings"]["hyphenation_language"], "de-CH-1901");
        assert_eq!(json["settings"]["hyphenation"], true);
        assert_eq!(json["hash"].as_str().map(str::len), Some(64));
    }

    #[test]
    fn rejects_invalid_options() {
        let dir = tempfile::tempdir().unwrap();
        let options = dir.path().join("options.json");
        fs::write(&options, r#"{"smart_quotes_primary": "fancy"}"#).unwrap();

        typo_cmd()
            .arg("settings")
            .arg("--options")
            .arg(&options)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("validation failed"));
    }
}

mod cache_command {
    use super::*;
    use std::path::Path;

    fn cache_cmd(store: &Path) -> Command {
        let mut cmd = typo_cmd();
        cmd.arg("cache").arg("--store").arg(store);
        cmd
    }

    #[test]
    fn set_get_invalidate() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("cache.json");

        cache_cmd(&store)
            .args(["set", "greeting", "\u{201c}Hello\u{201d}"])
            .assert()
            .success();

        cache_cmd(&store)
            .args(["get", "greeting"])
            .assert()
            .success()
            .stdout(predicate::str::diff("\u{201c}Hello\u{201d}\n"));

        cache_cmd(&store)
            .arg("invalidate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Invalidated 1 entries"));

        cache_cmd(&store)
            .args(["get", "greeting"])
            .assert()
            .code(1);
    }

    #[test]
    fn groups_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("cache.json");

        cache_cmd(&store)
            .args(["--group", "a", "set", "key", "value"])
            .assert()
            .success();

        cache_cmd(&store)
            .args(["--group", "b", "get", "key"])
            .assert()
            .code(1);
    }

    #[test]
    fn stats_report_backlog() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("cache.json");

        cache_cmd(&store).args(["set", "a", "1"]).assert().success();
        cache_cmd(&store).args(["set", "b", "2"]).assert().success();

        cache_cmd(&store)
            .arg("stats")
            .assert()
            .success()
            .stdout(predicate::str::contains("Backlog:  2"));
    }

    #[test]
    fn corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("cache.json");
        std::fs::write(&store, "not json").unwrap();

        cache_cmd(&store).arg("stats").assert().code(2);
    }
}
