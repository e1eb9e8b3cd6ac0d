//! crates/logging/src/levels.rs
//! Severity ranks and the loosely typed level values accepted by configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Ordered message severity.
///
/// The rank doubles as the verbosity threshold: a message of severity `S`
/// passes a threshold `L` when `S.rank() <= L.rank()`.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rank 0: errors.
    Error = 0,
    /// Rank 1: warnings.
    #[default]
    Warn = 1,
    /// Rank 2: application progress.
    Info = 2,
    /// Rank 3: user and application actions.
    Debug = 3,
    /// Rank 4: application process details.
    Trace = 4,
}

impl Severity {
    /// Every severity, from most critical to most verbose.
    pub const ALL: [Self; 5] = [Self::Error, Self::Warn, Self::Info, Self::Debug, Self::Trace];

    /// Returns the numeric rank (0 for [`Error`](Self::Error) through 4 for
    /// [`Trace`](Self::Trace)).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Looks up the severity with the given rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Severity;
    ///
    /// assert_eq!(Severity::from_rank(3), Some(Severity::Debug));
    /// assert_eq!(Severity::from_rank(5), None);
    /// ```
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Error),
            1 => Some(Self::Warn),
            2 => Some(Self::Info),
            3 => Some(Self::Debug),
            4 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Reports whether a message of this severity passes `threshold`.
    #[must_use]
    pub const fn within(self, threshold: Self) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name one of the five severities.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised severity name '{input}'")]
pub struct ParseSeverityError {
    input: String,
}

impl ParseSeverityError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses a severity name, ignoring ASCII case.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(input))
            .ok_or_else(|| ParseSeverityError {
                input: input.to_owned(),
            })
    }
}

/// A level as supplied by configuration: a numeric rank or a severity name.
///
/// Values are resolved into a [`Severity`] before they are stored; anything
/// that does not resolve is ignored by the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    /// A numeric rank; only 0 through 4 resolve.
    Rank(i64),
    /// A severity name, matched case-insensitively.
    Name(String),
}

impl LevelSpec {
    /// Resolves the value into a severity, if it names one.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{LevelSpec, Severity};
    ///
    /// assert_eq!(LevelSpec::from("TRACE").resolve(), Some(Severity::Trace));
    /// assert_eq!(LevelSpec::from(2).resolve(), Some(Severity::Info));
    /// assert_eq!(LevelSpec::from(7).resolve(), None);
    /// assert_eq!(LevelSpec::from("verbose").resolve(), None);
    /// ```
    #[must_use]
    pub fn resolve(&self) -> Option<Severity> {
        match self {
            Self::Rank(rank) => u8::try_from(*rank).ok().and_then(Severity::from_rank),
            Self::Name(name) => name.parse().ok(),
        }
    }

    /// Reads a level from a JSON number or string.
    ///
    /// Fractional and non-numeric, non-string values yield `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(number) => number
                .as_i64()
                .or_else(|| whole_rank(number.as_f64()?))
                .map(Self::Rank),
            serde_json::Value::String(name) => Some(Self::Name(name.clone())),
            _ => None,
        }
    }
}

/// Accepts a float such as `3.0` when it names a whole rank in range.
#[allow(clippy::cast_possible_truncation)]
fn whole_rank(value: f64) -> Option<i64> {
    let min = f64::from(Severity::Error.rank());
    let max = f64::from(Severity::Trace.rank());
    (value.fract() == 0.0 && (min..=max).contains(&value)).then(|| value as i64)
}

impl From<Severity> for LevelSpec {
    fn from(severity: Severity) -> Self {
        Self::Rank(i64::from(severity.rank()))
    }
}

impl From<i64> for LevelSpec {
    fn from(rank: i64) -> Self {
        Self::Rank(rank)
    }
}

impl From<i32> for LevelSpec {
    fn from(rank: i32) -> Self {
        Self::Rank(i64::from(rank))
    }
}

impl From<u8> for LevelSpec {
    fn from(rank: u8) -> Self {
        Self::Rank(i64::from(rank))
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
