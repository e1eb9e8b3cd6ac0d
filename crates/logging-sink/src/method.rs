use std::fmt;

/// Console method a line is written through.
///
/// The variants mirror the browser console API. Sinks use the method to pick
/// an output stream; [`SplitSink`](crate::SplitSink) sends
/// [`Error`](Self::Error) and [`Warn`](Self::Warn) to its error writer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ConsoleMethod {
    /// `console.error`
    Error,
    /// `console.warn`
    Warn,
    /// `console.info`
    Info,
    /// `console.log`
    Log,
    /// `console.debug`
    Debug,
}

impl ConsoleMethod {
    /// Returns the lowercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Log => "log",
            Self::Debug => "debug",
        }
    }

    /// Reports whether consoles conventionally route this method to `stderr`.
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

impl fmt::Display for ConsoleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
