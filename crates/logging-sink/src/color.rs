//! crates/logging-sink/src/color.rs
//! Color selection for terminal sinks.

use std::fmt;
use std::str::FromStr;

/// Selects whether sinks emit ANSI style sequences.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorMode {
    /// Colorize only when the stream is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always emit style sequences.
    Always,
    /// Never emit style sequences; text is written unchanged.
    Never,
}

impl ColorMode {
    /// Resolves the mode for a stream whose terminal status is known.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::ColorMode;
    ///
    /// assert!(ColorMode::Always.resolve(false));
    /// assert!(!ColorMode::Never.resolve(true));
    /// ```
    #[must_use]
    pub fn resolve(self, stream_is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream_is_terminal && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Returns the lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a color mode name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseColorModeError {
    input: String,
}

impl ParseColorModeError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseColorModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color mode '{}' (expected auto, always or never)",
            self.input
        )
    }
}

impl std::error::Error for ParseColorModeError {}

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "yes" | "force" => Ok(Self::Always),
            "never" | "no" | "none" => Ok(Self::Never),
            _ => Err(ParseColorModeError {
                input: input.to_owned(),
            }),
        }
    }
}
