#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` is the output half of the dbglog console logger. The
//! leveled logging service decides *whether* and *what* to print; this crate
//! decides *where* and *how*: it owns the closed set of [`StyleTag`]s, the
//! immutable [`StyleTable`] palette, the [`ConsoleLine`] representation of a
//! single console write, and the [`ConsoleSink`] implementations that render
//! those lines.
//!
//! # Design
//!
//! A [`ConsoleLine`] mirrors a browser `console.*` call: it names the
//! [`ConsoleMethod`] (error, warn, info, log, debug) and carries an ordered
//! list of [`Segment`]s, each optionally tagged with a style. Sinks render
//! segments separated by a single space. When colors are disabled the tags are
//! ignored and only the text survives, so the output degrades gracefully on
//! terminals without ANSI support.
//!
//! - [`WriterSink`] renders every line into one [`std::io::Write`] target.
//! - [`SplitSink`] routes error and warn lines to a second writer, matching
//!   the way consoles separate `stderr` from `stdout`.
//! - [`CaptureSink`] records plain text for tests and embedding hosts.
//!
//! # Errors
//!
//! Sinks surface [`std::io::Error`] values from the underlying writers. The
//! logging service discards them; a console logger never fails its caller.
//!
//! # Examples
//!
//! ```
//! use logging_sink::{ConsoleLine, ConsoleMethod, ConsoleSink, StyleTag, WriterSink};
//!
//! let mut sink = WriterSink::new(Vec::new());
//! let line = ConsoleLine::new(ConsoleMethod::Log)
//!     .styled(StyleTag::Time, "0.125")
//!     .styled(StyleTag::InfoPrimary, " log ")
//!     .plain("ready");
//!
//! sink.write_line(&line).unwrap();
//! assert_eq!(sink.into_inner(), b"0.125  log  ready\n".to_vec());
//! ```

mod color;
mod line;
mod line_mode;
mod method;
mod sink;
mod style;

pub use color::{ColorMode, ParseColorModeError};
pub use line::{ConsoleLine, Segment};
pub use line_mode::LineMode;
pub use method::ConsoleMethod;
pub use sink::{CaptureHandle, CaptureSink, CapturedLine, ConsoleSink, SplitSink, WriterSink};
pub use style::{Style, StyleTable, StyleTag};
