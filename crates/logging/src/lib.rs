#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is a leveled console logger for interactive debugging. A
//! [`LogService`] filters messages by an enable flag and a verbosity
//! threshold, formats its arguments into one line, stamps the line with the
//! time elapsed since the service started and appends the location of the
//! caller. Output goes to a [`ConsoleSink`](logging_sink::ConsoleSink) from
//! the `logging-sink` crate, which decides colors and destination.
//!
//! # Design
//!
//! Each leveled operation is described by a [`Channel`]: its gate, the style
//! of its badge and the console method it writes through. The thresholds are
//! the five [`Severity`] ranks:
//!
//! | Rank | Severity | Operations |
//! |------|----------|------------|
//! | 0 | `ERROR` | [`error`](LogService::error) (never gated) |
//! | 1 | `WARN` | [`warn`](LogService::warn) |
//! | 2 | `INFO` | [`info`](LogService::info), [`log`](LogService::log) |
//! | 3 | `DEBUG` | [`log1`](LogService::log1), [`rs`](LogService::rs), [`dlog`](LogService::dlog) |
//! | 4 | `TRACE` | [`log2`](LogService::log2) |
//!
//! [`yell`](LogService::yell) only needs the enable flag. `rs` and `dlog` are
//! also switched by the `rs` and `directives` categories of [`Settings`].
//!
//! Configuration arrives as loosely typed JSON through
//! [`LogService::apply_settings`] or as a typed [`SettingsPatch`] through
//! [`LogService::configure`]. Values the service does not understand are
//! ignored rather than rejected.
//!
//! Three ways to reach a service are provided:
//!
//! - own a [`LogService`] and call it through `&mut self`;
//! - share a [`SharedLogService`] between threads;
//! - use the per-thread default through the [`thread_local`] module and the
//!   `dbg_*!` macros.
//!
//! With the `tracing` feature, `DbgLayer` forwards events from the tracing
//! ecosystem into a shared service, and the service reports its own ignored
//! inputs as tracing events under the `logging` target.
//!
//! # Invariants
//!
//! - No leveled operation panics or returns an error; sink failures are
//!   discarded.
//! - `error` always writes; every other channel writes nothing while the
//!   service is disabled.
//! - The stored level is always one of the five severities.
//!
//! # Examples
//!
//! ```
//! use logging::{LogService, ManualClock};
//! use logging_sink::CaptureSink;
//! use serde_json::json;
//! use std::time::Duration;
//!
//! let sink = CaptureSink::new();
//! let lines = sink.handle();
//! let clock = ManualClock::new();
//! let mut service = LogService::with_parts(sink, clock.clone());
//!
//! service.apply_settings(&json!({
//!     "enable": true,
//!     "debugLevel": "debug",
//!     "emitters": false
//! }));
//!
//! clock.advance(Duration::from_millis(1_042));
//! service.log1(["user", "signed in"]);
//! service.log2(["too verbose"]);
//!
//! assert_eq!(lines.texts(), ["1.042  log  signed in  user"]);
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for sinks, styles and color handling.

mod channel;
mod clock;
mod config;
mod format;
mod levels;
mod location;
mod macros;
mod service;
mod shared;
pub mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod value;

pub use channel::Channel;
pub use clock::{Clock, ManualClock, SystemClock, format_elapsed};
pub use config::{DIRECTIVES, ROUTES_AND_STATES, Settings, SettingsError, SettingsPatch, merge_json};
pub use format::{
    ARGUMENT_SEPARATOR, CensoredJson, FormatError, Formatted, SERIALIZATION_BUDGET, censored_json,
    format_arguments,
};
pub use levels::{LevelSpec, ParseSeverityError, Severity};
pub use location::{CallerLocation, LocationContext, resolve_caller_location};
pub use service::LogService;
pub use shared::SharedLogService;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{DbgLayer, init_tracing};
pub use value::{CIRCULAR_MARKER, LogValue, Node, Structure, UNKNOWN_MARKER};
