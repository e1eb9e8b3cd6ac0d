use super::ConsoleSink;
use crate::color::ColorMode;
use crate::line::ConsoleLine;
use crate::line_mode::LineMode;
use crate::style::StyleTable;
use std::fmt;
use std::io::{self, Write};
use std::mem;

/// Renders console lines into an [`io::Write`] target.
///
/// The sink owns the writer together with the [`StyleTable`] used to paint
/// segments. Styling is decided once at construction: a sink created for a
/// pipe or a file writes plain text, a sink created for a color terminal
/// wraps each tagged segment in ANSI sequences.
///
/// # Examples
///
/// ```
/// use logging_sink::{ColorMode, ConsoleLine, ConsoleMethod, ConsoleSink, StyleTag, WriterSink};
///
/// let mut sink = WriterSink::with_color_mode(Vec::new(), ColorMode::Always);
/// sink.write_line(&ConsoleLine::new(ConsoleMethod::Error).styled(StyleTag::Error, " ERR "))?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(output.starts_with("\x1b["));
/// assert!(output.contains(" ERR "));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct WriterSink<W> {
    writer: W,
    styles: StyleTable,
    colorize: bool,
    line_mode: LineMode,
}

impl<W> WriterSink<W> {
    /// Creates a sink that writes plain text, one line per console call.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_parts(writer, StyleTable::standard(), false, LineMode::WithNewline)
    }

    /// Creates a sink that honours `mode`.
    ///
    /// The terminal status of an arbitrary writer is unknown, so
    /// [`ColorMode::Auto`] resolves to plain text here. Use
    /// [`SplitSink::stdio`](crate::SplitSink::stdio) for terminal detection.
    #[must_use]
    pub fn with_color_mode(writer: W, mode: ColorMode) -> Self {
        Self::with_parts(
            writer,
            StyleTable::standard(),
            mode.resolve(false),
            LineMode::WithNewline,
        )
    }

    /// Creates a sink from explicit parts.
    #[must_use]
    pub const fn with_parts(
        writer: W,
        styles: StyleTable,
        colorize: bool,
        line_mode: LineMode,
    ) -> Self {
        Self {
            writer,
            styles,
            colorize,
            line_mode,
        }
    }

    /// Reports whether segments are painted with ANSI sequences.
    #[must_use]
    pub const fn colorize(&self) -> bool {
        self.colorize
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Returns the palette used for painting.
    #[must_use]
    pub const fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Replaces the underlying writer and returns the previous one.
    #[must_use = "the returned writer contains lines produced before the replacement"]
    pub fn replace_writer(&mut self, mut writer: W) -> W {
        mem::swap(&mut self.writer, &mut writer);
        writer
    }

    /// Renders `line` to a string using this sink's palette and color choice.
    #[must_use]
    pub fn render(&self, line: &ConsoleLine) -> String {
        if !self.colorize {
            return line.plain_text();
        }
        line.render_with(|tag, text| match tag {
            Some(tag) => self.styles.get(tag).paint(text),
            None => text.to_owned(),
        })
    }
}

impl<W> ConsoleSink for WriterSink<W>
where
    W: Write,
{
    fn write_line(&mut self, line: &ConsoleLine) -> io::Result<()> {
        let mut rendered = self.render(line);
        if self.line_mode.append_newline() {
            rendered.push('\n');
        }
        self.writer.write_all(rendered.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &self.writer)
            .field("colorize", &self.colorize)
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

impl<W> Default for WriterSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleMethod, StyleTag};

    fn sample() -> ConsoleLine {
        ConsoleLine::new(ConsoleMethod::Log)
            .styled(StyleTag::Time, "0.250")
            .styled(StyleTag::InfoPrimary, " log ")
            .plain("hello")
    }

    #[test]
    fn plain_sink_writes_text_and_newline() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line(&sample()).expect("write succeeds");
        assert_eq!(sink.into_inner(), b"0.250  log  hello\n".to_vec());
    }

    #[test]
    fn without_newline_mode_omits_terminator() {
        let mut sink = WriterSink::new(Vec::new());
        sink.set_line_mode(LineMode::WithoutNewline);
        sink.write_line(&sample()).expect("write succeeds");
        sink.write_line(&sample()).expect("write succeeds");
        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output, "0.250  log  hello0.250  log  hello");
    }

    #[test]
    fn colored_sink_paints_only_tagged_segments() {
        let mut sink = WriterSink::with_color_mode(Vec::new(), ColorMode::Always);
        assert!(sink.colorize());
        sink.write_line(&sample()).expect("write succeeds");
        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output.matches("\x1b[0m").count(), 2);
        assert!(output.ends_with(" hello\n"));
    }

    #[test]
    fn auto_mode_is_plain_for_arbitrary_writers() {
        let sink = WriterSink::with_color_mode(Vec::<u8>::new(), ColorMode::Auto);
        assert!(!sink.colorize());
    }

    #[test]
    fn replace_writer_returns_previous_output() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line(&sample()).expect("write succeeds");
        let previous = sink.replace_writer(Vec::new());
        assert!(!previous.is_empty());
        assert!(sink.get_ref().is_empty());
    }
}
