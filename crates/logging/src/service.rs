//! crates/logging/src/service.rs
//! The console logging service.

use super::channel::Channel;
use super::clock::{Clock, SystemClock, format_elapsed};
use super::config::{Settings, SettingsError, SettingsPatch, merge_json};
use super::format::format_arguments;
use super::levels::LevelSpec;
use super::location::{CallerLocation, LocationContext, resolve_caller_location};
use super::value::LogValue;
use logging_sink::{ConsoleLine, ConsoleMethod, ConsoleSink, SplitSink, StyleTag};
use std::io::{Stderr, Stdout};
use std::time::Duration;

const LOCATION_INDENT: &str = "\t\t\t";
const ATTENTION_BADGE: &str = " ATTENTION HERE! ";
const ATTENTION_POINTER: &str = "        ^        ";

/// Leveled console logger.
///
/// A service owns its [`Settings`], an output [`ConsoleSink`] and a
/// [`Clock`] whose reading at construction is the start marker for the
/// elapsed-time stamp. Each leveled operation checks its gate, formats its
/// arguments with [`format_arguments`] and writes one or more lines to the
/// sink. Operations never fail: sink errors are discarded.
///
/// The leveled operations are `#[track_caller]`, so the location written
/// next to a message is the line that called them.
///
/// # Examples
///
/// ```
/// use logging::{LogService, ManualClock};
/// use logging_sink::CaptureSink;
/// use serde_json::json;
///
/// let sink = CaptureSink::new();
/// let lines = sink.handle();
/// let mut service = LogService::with_parts(sink, ManualClock::new());
///
/// service.log(["hidden"]);
/// service.apply_settings(&json!({"enable": true, "debugLevel": "info", "emitters": false}));
/// service.log(["shown", "also"]);
///
/// assert_eq!(lines.texts(), ["0.000  log  also  shown"]);
/// ```
pub struct LogService<S = SplitSink<Stdout, Stderr>, C = SystemClock> {
    settings: Settings,
    sink: S,
    clock: C,
    start: Duration,
    location_context: LocationContext,
}

impl LogService {
    /// Creates a service writing to the standard streams with default
    /// settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(SplitSink::default(), SystemClock::new())
    }
}

impl Default for LogService {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ConsoleSink> LogService<S, SystemClock> {
    /// Creates a service writing to `sink` with default settings.
    #[must_use]
    pub fn with_sink(sink: S) -> Self {
        Self::with_parts(sink, SystemClock::new())
    }
}

impl<S: ConsoleSink, C: Clock> LogService<S, C> {
    /// Creates a service from an explicit sink and clock.
    #[must_use]
    pub fn with_parts(sink: S, clock: C) -> Self {
        let start = clock.now();
        Self {
            settings: Settings::default(),
            sink,
            clock,
            start,
            location_context: LocationContext::default(),
        }
    }

    /// Writes an error line. Errors ignore the enable flag and the level.
    #[track_caller]
    pub fn error<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Error, CallerLocation::caller(), args);
    }

    /// Writes a warning line (rank 1).
    #[track_caller]
    pub fn warn<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Warn, CallerLocation::caller(), args);
    }

    /// Writes a multi-line informational block (rank 2).
    #[track_caller]
    pub fn info<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Info, CallerLocation::caller(), args);
    }

    /// Writes an application progress line (rank 2).
    #[track_caller]
    pub fn log<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Log, CallerLocation::caller(), args);
    }

    /// Writes a user or application action line (rank 3).
    #[track_caller]
    pub fn log1<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Log1, CallerLocation::caller(), args);
    }

    /// Writes an application process detail line (rank 4).
    #[track_caller]
    pub fn log2<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Log2, CallerLocation::caller(), args);
    }

    /// Writes a routes-and-states line (rank 3, category `rs`).
    #[track_caller]
    pub fn rs<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Rs, CallerLocation::caller(), args);
    }

    /// Writes a directive line (rank 3, category `directives`).
    #[track_caller]
    pub fn dlog<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Dlog, CallerLocation::caller(), args);
    }

    /// Writes the three-line attention banner whenever the service is
    /// enabled, regardless of the level.
    #[track_caller]
    pub fn yell<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Yell, CallerLocation::caller(), args);
    }

    /// Writes `args` on `channel` with an explicit location.
    pub fn emit<I>(&mut self, channel: Channel, location: Option<CallerLocation>, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        if !channel.admits(&self.settings) {
            return;
        }

        let output = format_arguments(args.into_iter().map(Into::into).collect()).to_string();
        let time = self.elapsed();
        let lines = self.layout(channel, &time, &output, location.as_ref());
        self.write_lines(&lines);
    }

    /// Writes `args` on `channel`, taking the location from a textual stack
    /// trace searched with the current [`LocationContext`].
    pub fn emit_with_stack<I>(&mut self, channel: Channel, stack: &str, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        if !channel.admits(&self.settings) {
            return;
        }
        let location = resolve_caller_location(stack, &self.location_context);
        self.emit(channel, location, args);
    }

    /// Writes the ungated `app started` line stamped `0.000`.
    pub fn announce_start(&mut self) {
        let line = ConsoleLine::new(ConsoleMethod::Log)
            .styled(StyleTag::Time, format_elapsed(Duration::ZERO))
            .styled(StyleTag::InfoMedium, " log ")
            .plain("app started");
        self.write_lines(&[line]);
    }

    fn layout(
        &self,
        channel: Channel,
        time: &str,
        output: &str,
        location: Option<&CallerLocation>,
    ) -> Vec<ConsoleLine> {
        let style = channel.style();
        let method = channel.method();

        match channel {
            Channel::Info => {
                let location = location.map(ToString::to_string).unwrap_or_default();
                vec![
                    ConsoleLine::new(method)
                        .styled(StyleTag::Time, format!("\n{time}"))
                        .styled(style, " LOG")
                        .styled(StyleTag::Default, format!(" {location} \n {output}\n\n")),
                ]
            }
            Channel::Yell => {
                let mut banner = ConsoleLine::new(method).styled(style, ATTENTION_BADGE);
                if let Some(location) = location {
                    banner = banner.plain(location.to_string());
                }
                vec![
                    ConsoleLine::new(method).plain("\n\n"),
                    banner.plain("\n\n\t").plain(output).plain("\n\n "),
                    ConsoleLine::new(method).styled(style, ATTENTION_POINTER),
                ]
            }
            _ => {
                let show_location =
                    channel == Channel::Error || self.settings.show_emitter_location;
                let mut line = ConsoleLine::new(method).styled(StyleTag::Time, time);

                line = match (channel.label(), self.settings.show_labels) {
                    (Some(label), true) => line.styled(style, format!(" log #{label} ")).plain(output),
                    (Some(label), false) => {
                        line.styled(style, " log ").plain(format!("#{label} > {output}"))
                    }
                    (None, _) => line.styled(style, badge(channel)).plain(output),
                };

                if show_location && let Some(location) = location {
                    line = line.plain(format!("{LOCATION_INDENT}{location}"));
                }
                vec![line]
            }
        }
    }

    fn write_lines(&mut self, lines: &[ConsoleLine]) {
        for line in lines {
            if let Err(error) = self.sink.write_line(line) {
                #[cfg(feature = "tracing")]
                tracing::trace!(target: "logging::service", %error, "console write failed");
                #[cfg(not(feature = "tracing"))]
                let _ = error;
            }
        }
        let _ = self.sink.flush();
    }

    /// Sets the enable flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    /// Sets the level from a rank (0 to 4) or a case-insensitive severity
    /// name. Any other value leaves the level unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{LogService, Severity};
    /// use logging_sink::CaptureSink;
    ///
    /// let mut service = LogService::with_sink(CaptureSink::new());
    /// service.set_level("DEBUG");
    /// assert_eq!(service.settings().level, Severity::Debug);
    ///
    /// service.set_level(9);
    /// service.set_level("loud");
    /// assert_eq!(service.settings().level, Severity::Debug);
    /// ```
    pub fn set_level(&mut self, level: impl Into<LevelSpec>) {
        let level = level.into();
        match level.resolve() {
            Some(severity) => self.settings.level = severity,
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "logging::service", ?level, "ignoring unrecognised level");
            }
        }
    }

    /// Applies a settings object.
    ///
    /// A non-object argument is reported on the warn console method,
    /// regardless of the enable flag, and changes nothing.
    pub fn apply_settings(&mut self, settings: &serde_json::Value) {
        if let Err(error) = self.try_apply_settings(settings) {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "logging::service", %error, "rejected settings");
            let line = ConsoleLine::new(ConsoleMethod::Warn).plain(error.to_string());
            self.write_lines(&[line]);
        }
    }

    /// Applies a settings object, returning the error instead of reporting
    /// it on the console.
    pub fn try_apply_settings(&mut self, settings: &serde_json::Value) -> Result<(), SettingsError> {
        let patch = SettingsPatch::from_json(settings)?;
        self.configure(patch);
        Ok(())
    }

    /// Applies a partial update.
    ///
    /// `enabled` and `level` go through [`set_enabled`](Self::set_enabled)
    /// and [`set_level`](Self::set_level). Categories merge key by key, the
    /// display flags are overwritten and unknown keys merge into
    /// [`Settings::extra`].
    pub fn configure(&mut self, patch: SettingsPatch) {
        let SettingsPatch {
            enabled,
            level,
            categories,
            show_emitter_location,
            show_labels,
            extra,
        } = patch;

        if let Some(enabled) = enabled {
            self.set_enabled(enabled);
        }
        if let Some(level) = level {
            self.set_level(level);
        }
        self.settings.categories.extend(categories);
        if let Some(show) = show_emitter_location {
            self.settings.show_emitter_location = show;
        }
        if let Some(show) = show_labels {
            self.settings.show_labels = show;
        }
        merge_json(&mut self.settings.extra, &extra);
    }

    /// Returns a copy of the current settings.
    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.settings.clone()
    }

    /// Returns the current settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the context used to search textual stacks.
    pub fn set_location_context(&mut self, context: LocationContext) {
        self.location_context = context;
    }

    /// Returns the context used to search textual stacks.
    #[must_use]
    pub const fn location_context(&self) -> &LocationContext {
        &self.location_context
    }

    /// Returns the time since the start marker as `<secs>.<mmm>`.
    #[must_use]
    pub fn elapsed(&self) -> String {
        format_elapsed(self.clock.now().saturating_sub(self.start))
    }

    /// Moves the start marker to now and returns the new reading, `0.000`.
    pub fn reinit_clock(&mut self) -> String {
        self.start = self.clock.now();
        self.elapsed()
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the service and returns its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

const fn badge(channel: Channel) -> &'static str {
    match channel {
        Channel::Error => " ERR ",
        Channel::Warn => " wrn ",
        _ => " log ",
    }
}

impl<S, C> std::fmt::Debug for LogService<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogService")
            .field("settings", &self.settings)
            .field("start", &self.start)
            .field("location_context", &self.location_context)
            .finish_non_exhaustive()
    }
}
