//! crates/logging/src/location.rs
//! Caller locations attached to emitted lines.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Source position of the code that invoked a leveled operation.
///
/// Displays as `file:line:column`, omitting absent parts.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CallerLocation {
    file: Cow<'static, str>,
    line: Option<u32>,
    column: Option<u32>,
}

impl CallerLocation {
    /// Creates a location without filtering.
    #[must_use]
    pub fn new(file: impl Into<Cow<'static, str>>, line: Option<u32>, column: Option<u32>) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Creates a location from an opaque locator such as a URL with a
    /// trailing `:line:column`.
    #[must_use]
    pub fn from_locator(locator: impl Into<Cow<'static, str>>) -> Self {
        Self::new(locator, None, None)
    }

    /// Captures the location of the nearest caller outside `#[track_caller]`
    /// frames, or `None` when that caller is part of this crate.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Option<Self> {
        Self::from_std(Location::caller())
    }

    /// Converts a standard library location, discarding this crate's own
    /// source files.
    #[must_use]
    pub fn from_std(location: &'static Location<'static>) -> Option<Self> {
        Self::here(location.file(), location.line(), location.column())
    }

    /// Builds a location from `file!()`, `line!()` and `column!()`, discarding
    /// this crate's own source files.
    #[must_use]
    pub fn here(file: &'static str, line: u32, column: u32) -> Option<Self> {
        if is_own_source(file) {
            return None;
        }
        Some(Self::new(file, Some(line), Some(column)))
    }

    /// Returns the file or locator text.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the 1-based line, when known.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        self.line
    }

    /// Returns the 1-based column, when known.
    #[must_use]
    pub const fn column(&self) -> Option<u32> {
        self.column
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(column) = self.column {
            write!(f, ":{column}")?;
        }
        Ok(())
    }
}

fn is_own_source(file: &str) -> bool {
    Path::new(file!())
        .parent()
        .is_some_and(|own_dir| Path::new(file).starts_with(own_dir))
}

/// How textual stack traces are searched for the caller's frame.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocationContext {
    /// Scheme a frame must carry (followed by `//`) to be considered,
    /// such as `http:` or `file:`.
    pub scheme: String,
    /// Substring identifying frames that belong to the logger itself.
    pub own_file_marker: String,
}

impl LocationContext {
    /// Creates a context from a scheme and an own-file marker.
    #[must_use]
    pub fn new(scheme: impl Into<String>, own_file_marker: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            own_file_marker: own_file_marker.into(),
        }
    }
}

impl Default for LocationContext {
    fn default() -> Self {
        Self::new("file:", "dbglog.")
    }
}

/// Finds the first frame of `stack` that belongs to the caller.
///
/// Frames are the lines of `stack`. Only frames containing the context's
/// `scheme` followed by `//` are considered, and frames containing the
/// own-file marker are skipped. The locator is the text between the last
/// `(` and the last `)` of the chosen frame; frames without parentheses
/// contribute their text after a leading `at `.
///
/// # Examples
///
/// ```
/// use logging::{LocationContext, resolve_caller_location};
///
/// let stack = "Error\n\
///     at log (http://host/js/dbglog.js:88:17)\n\
///     at boot (http://host/js/app.js:12:5)\n";
/// let context = LocationContext::new("http:", "dbglog.");
///
/// let location = resolve_caller_location(stack, &context).unwrap();
/// assert_eq!(location.to_string(), "http://host/js/app.js:12:5");
/// ```
#[must_use]
pub fn resolve_caller_location(stack: &str, context: &LocationContext) -> Option<CallerLocation> {
    let needle = format!("{}//", context.scheme);

    stack
        .lines()
        .filter(|frame| frame.contains(&needle))
        .find(|frame| !frame.contains(&context.own_file_marker))
        .map(|frame| CallerLocation::from_locator(locator(frame).to_owned()))
}

fn locator(frame: &str) -> &str {
    if let (Some(open), Some(close)) = (frame.rfind('('), frame.rfind(')'))
        && open < close
    {
        return &frame[open + 1..close];
    }

    let trimmed = frame.trim();
    trimmed.strip_prefix("at ").unwrap_or(trimmed)
}
