//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Typokit - locale-aware typography settings and fragment cache
#[derive(Parser)]
#[command(name = "typo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the locale rules selected for a locale
    Locale {
        /// Locale such as `de_CH` or `fr-FR`
        locale: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Pick a language for a locale from a candidate list
    Language {
        /// Locale such as `de_CH` or `fr-FR`
        locale: String,

        /// Candidate language codes, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        candidates: Vec<String>,
    },

    /// Resolve typography settings from an options file
    Settings {
        /// Options file (JSON object)
        #[arg(short, long)]
        options: Option<PathBuf>,

        /// Locale such as `de_CH` or `fr-FR`
        #[arg(short, long, default_value = "en_US")]
        locale: String,

        /// Hyphenation languages available for `auto` selection
        #[arg(long, value_delimiter = ',')]
        hyphenation_languages: Vec<String>,

        /// Diacritic replacement languages available for `auto` selection
        #[arg(long, value_delimiter = ',')]
        diacritic_languages: Vec<String>,
    },

    /// Inspect or modify a file-backed cache store
    Cache {
        /// Store file
        #[arg(short, long, default_value = ".typokit-cache.json")]
        store: PathBuf,

        /// Cache group
        #[arg(short, long, default_value = "typo")]
        group: String,

        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Print a cached value
    Get {
        /// Logical key
        key: String,
    },

    /// Store a value
    Set {
        /// Logical key
        key: String,

        /// Value to store
        value: String,

        /// Lifetime in seconds (0 = no expiry)
        #[arg(long, default_value_t = 0)]
        ttl: u64,
    },

    /// Drop every entry written since the last invalidation
    Invalidate,

    /// Show epoch and backlog information
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
