use super::{ConsoleSink, WriterSink};
use crate::color::ColorMode;
use crate::line::ConsoleLine;
use crate::line_mode::LineMode;
use crate::style::StyleTable;
use is_terminal::IsTerminal;
use std::io::{self, Stderr, Stdout, Write};

/// Routes error and warn lines to one writer and everything else to another.
///
/// This is the default destination of the logging service: the diagnostic
/// methods go to `stderr`, the informational ones to `stdout`.
#[derive(Clone, Debug)]
pub struct SplitSink<O, E> {
    out: WriterSink<O>,
    err: WriterSink<E>,
}

impl<O, E> SplitSink<O, E> {
    /// Creates a plain-text split sink.
    #[must_use]
    pub fn new(out: O, err: E) -> Self {
        Self::from_sinks(WriterSink::new(out), WriterSink::new(err))
    }

    /// Creates a split sink from two configured writer sinks.
    #[must_use]
    pub const fn from_sinks(out: WriterSink<O>, err: WriterSink<E>) -> Self {
        Self { out, err }
    }

    /// Returns the sink used for informational methods.
    #[must_use]
    pub const fn out(&self) -> &WriterSink<O> {
        &self.out
    }

    /// Returns the sink used for error and warn.
    #[must_use]
    pub const fn err(&self) -> &WriterSink<E> {
        &self.err
    }

    /// Consumes the sink and returns both writers.
    #[must_use]
    pub fn into_parts(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

impl SplitSink<Stdout, Stderr> {
    /// Creates a sink targeting the process's standard streams.
    ///
    /// Color is resolved per stream, so redirecting `stdout` to a file keeps
    /// `stderr` colored when it is still a terminal.
    #[must_use]
    pub fn stdio(mode: ColorMode) -> Self {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let out_color = mode.resolve(stdout.is_terminal());
        let err_color = mode.resolve(stderr.is_terminal());
        Self::from_sinks(
            WriterSink::with_parts(stdout, StyleTable::standard(), out_color, LineMode::WithNewline),
            WriterSink::with_parts(stderr, StyleTable::standard(), err_color, LineMode::WithNewline),
        )
    }
}

impl Default for SplitSink<Stdout, Stderr> {
    fn default() -> Self {
        Self::stdio(ColorMode::Auto)
    }
}

impl<O, E> ConsoleSink for SplitSink<O, E>
where
    O: Write,
    E: Write,
{
    fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()> {
        if line.method().is_diagnostic() {
            self.err.write_line(line)
        } else {
            self.out.write_line(line)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}
