use super::ConsoleSink;
use crate::line::ConsoleLine;
use crate::method::ConsoleMethod;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A console line recorded by a [`CaptureSink`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CapturedLine {
    line: ConsoleLine,
    text: String,
}

impl CapturedLine {
    /// Returns the console method the line was written through.
    #[must_use]
    pub const fn method(&self) -> ConsoleMethod {
        self.line.method()
    }

    /// Returns the unstyled text of the line.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the full line, including style tags.
    #[must_use]
    pub const fn line(&self) -> &ConsoleLine {
        &self.line
    }
}

type Buffer = Arc<Mutex<Vec<CapturedLine>>>;

fn lock(buffer: &Buffer) -> MutexGuard<'_, Vec<CapturedLine>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sink that records every line in memory.
///
/// The sink hands out [`CaptureHandle`]s sharing its buffer, so a test can
/// move the sink into a logging service and still inspect what was written.
///
/// # Examples
///
/// ```
/// use logging_sink::{CaptureSink, ConsoleLine, ConsoleMethod, ConsoleSink};
///
/// let mut sink = CaptureSink::new();
/// let handle = sink.handle();
///
/// sink.write_line(&ConsoleLine::new(ConsoleMethod::Log).plain("recorded"))?;
///
/// let lines = handle.drain();
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].text(), "recorded");
/// assert!(handle.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    buffer: Buffer,
}

impl CaptureSink {
    /// Creates an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle observing this sink's buffer.
    #[must_use]
    pub fn handle(&self) -> CaptureHandle {
        CaptureHandle {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

impl ConsoleSink for CaptureSink {
    fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()> {
        lock(&self.buffer).push(CapturedLine {
            line: line.clone(),
            text: line.plain_text(),
        });
        Ok(())
    }
}

/// Read side of a [`CaptureSink`].
#[derive(Clone, Debug)]
pub struct CaptureHandle {
    buffer: Buffer,
}

impl CaptureHandle {
    /// Removes and returns every recorded line.
    pub fn drain(&self) -> Vec<CapturedLine> {
        lock(&self.buffer).drain(..).collect()
    }

    /// Returns a copy of the recorded lines without clearing them.
    #[must_use]
    pub fn lines(&self) -> Vec<CapturedLine> {
        lock(&self.buffer).clone()
    }

    /// Returns the unstyled text of every recorded line.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        lock(&self.buffer)
            .iter()
            .map(|captured| captured.text.clone())
            .collect()
    }

    /// Returns the number of recorded lines.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.buffer).len()
    }

    /// Reports whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.buffer).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StyleTag;

    #[test]
    fn records_method_and_plain_text() {
        let mut sink = CaptureSink::new();
        let handle = sink.handle();
        sink.write_line(
            &ConsoleLine::new(ConsoleMethod::Warn)
                .styled(StyleTag::Warn, " wrn ")
                .plain("careful"),
        )
        .expect("capture never fails");

        let lines = handle.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].method(), ConsoleMethod::Warn);
        assert_eq!(lines[0].text(), " wrn  careful");
        assert_eq!(lines[0].line().segments()[0].style(), Some(StyleTag::Warn));
    }

    #[test]
    fn drain_clears_buffer() {
        let mut sink = CaptureSink::new();
        let handle = sink.handle();
        sink.write_line(&ConsoleLine::new(ConsoleMethod::Log).plain("one"))
            .expect("capture never fails");
        sink.write_line(&ConsoleLine::new(ConsoleMethod::Log).plain("two"))
            .expect("capture never fails");

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.texts(), ["one", "two"]);
        assert_eq!(handle.drain().len(), 2);
        assert!(handle.is_empty());
        assert!(handle.drain().is_empty());
    }

    #[test]
    fn cloned_sinks_share_one_buffer() {
        let sink = CaptureSink::new();
        let mut clone = sink.clone();
        clone
            .write_line(&ConsoleLine::new(ConsoleMethod::Debug).plain("shared"))
            .expect("capture never fails");
        assert_eq!(sink.handle().texts(), ["shared"]);
    }
}
