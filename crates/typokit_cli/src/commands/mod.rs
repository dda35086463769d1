//! Subcommand implementations

pub mod cache;
pub mod locale;
pub mod settings;
