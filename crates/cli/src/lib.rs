#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/cli/src/lib.rs
//!
//! # Overview
//!
//! `cli` is the command-line front-end of the `dbglog-demo` binary. It turns
//! a handful of switches into logger settings, then replays the log calls of
//! the demo host application (a startup hook followed by one controller) so
//! the effect of each setting can be seen on a real console.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error. A [`clap`](https://docs.rs/clap/) command
//! definition parses the switches into a settings patch. The replay writes
//! into a [`SharedLogService`](logging::SharedLogService) backed by a capture
//! sink; once it finishes, the captured lines are forwarded to a
//! [`SplitSink`](logging_sink::SplitSink) so error and warn lines reach the
//! error handle and everything else reaches the output handle.
//!
//! Settings are applied in a fixed order: the startup banner is written
//! first, then the `--settings` object, then the individual switches.
//!
//! With the `tracing` feature the replay runs under a scoped subscriber that
//! forwards `tracing` events into the same service.
//!
//! # Invariants
//!
//! - `run` never panics.
//! - Usage problems write one diagnostic to the error handle and return `1`.
//! - Errors produced by the replay itself are log lines, not failures: the
//!   exit status stays `0`.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = run(["dbglog-demo", "--enable", "--level", "trace"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! let out = String::from_utf8(stdout).unwrap();
//! assert!(out.contains("app started"));
//! assert!(out.contains("#appRun started 2"));
//! assert!(String::from_utf8(stderr).unwrap().contains("#AppController > ERROR"));
//! ```
//!
//! # See also
//!
//! - [`logging`] for the service being demonstrated.
//! - `src/bin/dbglog-demo.rs` in the workspace root for the binary wrapper.

mod arguments;
mod error;
mod scenario;

use std::ffi::OsString;
use std::io::{self, Write};

use logging::{Clock, LogService, SharedLogService, SystemClock};
use logging_sink::{
    CaptureSink, CapturedLine, ConsoleLine, ConsoleMethod, ConsoleSink, SplitSink, WriterSink,
};

use crate::arguments::{ParsedArgs, parse_args};
pub use crate::error::CliError;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Exit status when the console cannot be written.
const WRITE_FAILURE: i32 = 1;

/// Help text describing the supported switches.
const HELP_TEXT: &str = concat!(
    "dbglog-demo ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: dbglog-demo [OPTIONS]\n",
    "\n",
    "Replays the log calls of the demo application through the leveled\n",
    "console logger. The following options are recognised:\n",
    "  -h, --help             Show this help message and exit.\n",
    "      --enable           Turn the logger on.\n",
    "      --level LEVEL      Verbosity threshold: error, warn, info, debug,\n",
    "                         trace or 0-4.\n",
    "      --labels           Show category labels inside the badge.\n",
    "      --no-emitters      Hide caller locations on ordinary lines.\n",
    "      --category NAME=on|off\n",
    "                         Switch a category such as rs or directives.\n",
    "      --settings JSON    Apply a settings object before the other switches.\n",
    "      --color WHEN       Colorize output: auto, always or never.\n",
    "      --print-settings   Print the resulting settings as JSON and exit.\n",
    "      --yell             Finish the replay with an attention block.\n",
    "\n",
    "Errors are always printed. Everything else needs --enable.\n",
);

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Colors are only written with `--color always`, since the terminal status
/// of arbitrary handles is unknown. Returns the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => {
            let mut sink = SplitSink::from_sinks(
                WriterSink::with_color_mode(&mut *stdout, parsed.color),
                WriterSink::with_color_mode(&mut *stderr, parsed.color),
            );
            execute(&parsed, SystemClock::new(), &mut sink)
        }
        Err(error) => report(&error, stderr),
    }
}

/// Runs the CLI against the process's standard streams.
///
/// Unlike [`run`], `--color auto` colorizes each stream that is a terminal.
pub fn run_stdio<I, S>(arguments: I) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    match parse_args(arguments) {
        Ok(parsed) => {
            let mut sink = SplitSink::stdio(parsed.color);
            execute(&parsed, SystemClock::new(), &mut sink)
        }
        Err(error) => report(&error, &mut io::stderr()),
    }
}

fn report<Err: Write>(error: &CliError, stderr: &mut Err) -> i32 {
    let text = error.to_string();
    let _ = writeln!(stderr, "{}", text.trim_end());
    error.exit_code()
}

fn execute<C, Out>(parsed: &ParsedArgs, clock: C, console: &mut Out) -> i32
where
    C: Clock + Send + 'static,
    Out: ConsoleSink,
{
    match try_execute(parsed, clock, console) {
        Ok(()) => 0,
        Err(_) => WRITE_FAILURE,
    }
}

fn try_execute<C, Out>(parsed: &ParsedArgs, clock: C, console: &mut Out) -> io::Result<()>
where
    C: Clock + Send + 'static,
    Out: ConsoleSink,
{
    if parsed.show_help {
        console.write_line(&ConsoleLine::new(ConsoleMethod::Log).plain(HELP_TEXT.trim_end()))?;
        return console.flush();
    }

    let capture = CaptureSink::new();
    let captured = capture.handle();
    let service = SharedLogService::new(LogService::with_parts(capture, clock));

    if !parsed.print_settings {
        service.announce_start();
    }
    if let Some(settings) = &parsed.settings {
        service.apply_settings(settings);
    }
    service.configure(parsed.patch());

    if parsed.print_settings {
        forward(&captured.drain(), console)?;
        let json = serde_json::to_string_pretty(&service.snapshot()).map_err(io::Error::other)?;
        console.write_line(&ConsoleLine::new(ConsoleMethod::Log).plain(json))?;
        return console.flush();
    }

    scenario::replay(&service, parsed.yell);
    forward(&captured.drain(), console)
}

fn forward<Out: ConsoleSink>(lines: &[CapturedLine], console: &mut Out) -> io::Result<()> {
    for captured in lines {
        console.write_line(captured.line())?;
    }
    console.flush()
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}

#[cfg(test)]
mod tests;
