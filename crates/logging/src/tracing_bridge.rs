//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the console logging service.
//!
//! [`DbgLayer`] is a tracing-subscriber layer that forwards every event to a
//! [`SharedLogService`], so code instrumented with the standard tracing
//! macros shows up on the console with the same gates, colors and elapsed
//! stamps as direct calls.
//!
//! # Mapping
//!
//! - `ERROR` → `error`, `WARN` → `warn`, `INFO` → `log`, `DEBUG` → `log1`,
//!   `TRACE` → `log2`.
//! - Targets with an `rs` path segment or containing `routes` go to `rs`;
//!   targets containing `directive` go to `dlog`, whatever the level.
//! - Events targeting this crate are ignored, so the service's own
//!   diagnostics never loop back into it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{SharedLogService, init_tracing};
//!
//! let service = SharedLogService::default();
//! service.apply_settings(&serde_json::json!({"enable": true, "debugLevel": "debug"}));
//! init_tracing(service)?;
//!
//! tracing::info!("server listening");
//! tracing::debug!(target: "app::routes", path = "/home", "entered");
//! ```

use super::channel::Channel;
use super::clock::Clock;
use super::location::CallerLocation;
use super::shared::SharedLogService;
use super::value::LogValue;
use logging_sink::ConsoleSink;
use std::fmt;
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

const OWN_TARGET: &str = "logging";

/// A tracing layer that writes events through a [`SharedLogService`].
pub struct DbgLayer<S, C> {
    service: SharedLogService<S, C>,
}

impl<S, C> DbgLayer<S, C> {
    /// Creates a layer forwarding to `service`.
    #[must_use]
    pub const fn new(service: SharedLogService<S, C>) -> Self {
        Self { service }
    }

    /// Maps an event's level and target to a channel.
    fn channel_for(level: &Level, target: &str) -> Channel {
        if target.split("::").any(|segment| segment == "rs") || target.contains("routes") {
            return Channel::Rs;
        }
        if target.contains("directive") {
            return Channel::Dlog;
        }
        match *level {
            Level::ERROR => Channel::Error,
            Level::WARN => Channel::Warn,
            Level::INFO => Channel::Log,
            Level::DEBUG => Channel::Log1,
            Level::TRACE => Channel::Log2,
        }
    }

    fn is_own_target(target: &str) -> bool {
        target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl<S, C> fmt::Debug for DbgLayer<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbgLayer").finish_non_exhaustive()
    }
}

impl<Sub, S, C> Layer<Sub> for DbgLayer<S, C>
where
    Sub: Subscriber + for<'a> LookupSpan<'a>,
    S: ConsoleSink + Send + 'static,
    C: Clock + Send + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, Sub>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if Self::is_own_target(target) {
            return;
        }

        let channel = Self::channel_for(metadata.level(), target);
        let location = metadata
            .file()
            .map(|file| CallerLocation::new(file, metadata.line(), None));

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.service.try_emit(channel, location, visitor.into_args());
    }
}

/// Collects the message and the remaining fields of an event.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<String>,
}

impl FieldVisitor {
    fn into_args(self) -> Vec<LogValue> {
        self.message
            .into_iter()
            .chain(self.fields)
            .map(LogValue::from)
            .collect()
    }
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// Installs a global subscriber that forwards tracing events to `service`.
///
/// # Errors
///
/// Fails when a global subscriber is already set.
pub fn init_tracing<S, C>(service: SharedLogService<S, C>) -> Result<(), TryInitError>
where
    S: ConsoleSink + Send + 'static,
    C: Clock + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(DbgLayer::new(service))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use logging_sink::CaptureSink;

    type TestLayer = DbgLayer<CaptureSink, SystemClock>;

    #[test]
    fn levels_map_to_tiers() {
        assert_eq!(TestLayer::channel_for(&Level::ERROR, "app"), Channel::Error);
        assert_eq!(TestLayer::channel_for(&Level::WARN, "app"), Channel::Warn);
        assert_eq!(TestLayer::channel_for(&Level::INFO, "app"), Channel::Log);
        assert_eq!(TestLayer::channel_for(&Level::DEBUG, "app"), Channel::Log1);
        assert_eq!(TestLayer::channel_for(&Level::TRACE, "app"), Channel::Log2);
    }

    #[test]
    fn targets_select_categories() {
        assert_eq!(TestLayer::channel_for(&Level::INFO, "app::rs"), Channel::Rs);
        assert_eq!(TestLayer::channel_for(&Level::ERROR, "app::routes::home"), Channel::Rs);
        assert_eq!(TestLayer::channel_for(&Level::DEBUG, "ui::directives"), Channel::Dlog);
        assert_eq!(TestLayer::channel_for(&Level::DEBUG, "app::rsvp"), Channel::Log1);
    }

    #[test]
    fn own_targets_are_recognised() {
        assert!(TestLayer::is_own_target("logging"));
        assert!(TestLayer::is_own_target("logging::service"));
        assert!(!TestLayer::is_own_target("logging_ext"));
        assert!(!TestLayer::is_own_target("app"));
    }

    #[test]
    fn visitor_puts_message_first() {
        let visitor = FieldVisitor {
            message: Some("hello".to_owned()),
            fields: vec!["user=ann".to_owned()],
        };
        assert_eq!(
            visitor.into_args(),
            vec![LogValue::from("hello"), LogValue::from("user=ann")]
        );
    }
}
