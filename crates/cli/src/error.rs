//! crates/cli/src/error.rs
//! Usage errors reported by the demo driver.

use logging_sink::ParseColorModeError;
use thiserror::Error;

/// A problem with the command line. Every variant exits with status `1`.
#[derive(Debug, Error)]
pub enum CliError {
    /// Unknown option, missing value or similar `clap` failure.
    #[error("{0}")]
    Usage(#[from] clap::Error),
    /// `--level` did not name a severity.
    #[error("error: unrecognised level '{value}' (expected error, warn, info, debug, trace or 0-4)")]
    Level {
        /// The rejected value.
        value: String,
    },
    /// `--category` was not of the form `NAME=on|off`.
    #[error("error: invalid category switch '{value}' (expected NAME=on|off)")]
    Category {
        /// The rejected value.
        value: String,
    },
    /// `--settings` was not valid JSON.
    #[error("error: --settings is not valid JSON: {0}")]
    SettingsJson(#[source] serde_json::Error),
    /// `--color` did not name a color mode.
    #[error("error: {0}")]
    Color(#[from] ParseColorModeError),
}

impl CliError {
    /// Exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}
