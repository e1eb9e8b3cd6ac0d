//! crates/logging-sink/src/sink/mod.rs
//! The [`ConsoleSink`] trait and its implementations.

mod capture;
mod split;
mod writer;

pub use capture::{CaptureHandle, CaptureSink, CapturedLine};
pub use split::SplitSink;
pub use writer::WriterSink;

use crate::line::ConsoleLine;
use std::io;

/// Destination for rendered console lines.
///
/// One call to [`write_line`](Self::write_line) corresponds to one console
/// method invocation. Implementations decide how styles are rendered; a sink
/// that ignores styles still receives the full text.
pub trait ConsoleSink {
    /// Writes one console line.
    fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()>;

    /// Flushes buffered output.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T> ConsoleSink for &mut T
where
    T: ConsoleSink + ?Sized,
{
    fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

impl<T> ConsoleSink for Box<T>
where
    T: ConsoleSink + ?Sized,
{
    fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
