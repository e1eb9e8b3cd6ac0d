//! crates/logging/src/thread_local.rs
//! Per-thread default service used by the `dbg_*!` macros.

use super::channel::Channel;
use super::clock::{Clock, SystemClock};
use super::config::{Settings, SettingsPatch};
use super::location::CallerLocation;
use super::service::LogService;
use super::value::LogValue;
use logging_sink::{ConsoleSink, SplitSink};
use std::cell::RefCell;

/// Service type stored per thread.
pub type DefaultService = LogService<Box<dyn ConsoleSink>, Box<dyn Clock>>;

thread_local! {
    static SERVICE: RefCell<DefaultService> = RefCell::new(stdio_service());
}

fn stdio_service() -> DefaultService {
    service_with(SplitSink::default())
}

/// Builds a default-configured service around `sink`, suitable for
/// [`install`].
#[must_use]
pub fn service_with(sink: impl ConsoleSink + 'static) -> DefaultService {
    service_with_clock(sink, SystemClock::new())
}

/// Builds a default-configured service around `sink` and `clock`, suitable
/// for [`install`].
#[must_use]
pub fn service_with_clock(
    sink: impl ConsoleSink + 'static,
    clock: impl Clock + 'static,
) -> DefaultService {
    let sink: Box<dyn ConsoleSink> = Box::new(sink);
    let clock: Box<dyn Clock> = Box::new(clock);
    LogService::with_parts(sink, clock)
}

/// Resets this thread's service to a fresh stdio service, writes the
/// startup banner and applies `settings`.
pub fn init(settings: &serde_json::Value) {
    let mut service = stdio_service();
    service.announce_start();
    service.apply_settings(settings);
    install(service);
}

/// Replaces this thread's service and returns the previous one.
///
/// # Panics
///
/// Panics when called from inside [`with_service`].
pub fn install(service: DefaultService) -> DefaultService {
    SERVICE.with(|slot| slot.replace(service))
}

/// Runs `f` with this thread's service.
///
/// # Panics
///
/// Panics when nested inside another `with_service` call on the same thread.
pub fn with_service<R>(f: impl FnOnce(&mut DefaultService) -> R) -> R {
    SERVICE.with(|slot| f(&mut slot.borrow_mut()))
}

/// Writes `args` on `channel` through this thread's service.
///
/// Calls made while the service is busy on this thread, or after the thread
/// has started tearing down its locals, are dropped.
pub fn emit(channel: Channel, location: Option<CallerLocation>, args: Vec<LogValue>) {
    let _ = SERVICE.try_with(|slot| {
        if let Ok(mut service) = slot.try_borrow_mut() {
            service.emit(channel, location, args);
        }
    });
}

/// Applies a partial update to this thread's service.
pub fn configure(patch: SettingsPatch) {
    with_service(|service| service.configure(patch));
}

/// Returns a copy of this thread's settings.
#[must_use]
pub fn snapshot() -> Settings {
    with_service(|service| service.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use logging_sink::CaptureSink;
    use serde_json::json;

    fn capture() -> logging_sink::CaptureHandle {
        let sink = CaptureSink::new();
        let handle = sink.handle();
        install(service_with_clock(sink, ManualClock::new()));
        handle
    }

    #[test]
    fn install_replaces_and_returns_previous() {
        let handle = capture();
        configure(SettingsPatch {
            enabled: Some(true),
            ..SettingsPatch::default()
        });
        let previous = install(service_with(CaptureSink::new()));
        assert!(previous.settings().enabled);
        assert!(!snapshot().enabled);
        assert!(handle.is_empty());
    }

    #[test]
    fn emit_goes_through_gates() {
        let handle = capture();
        emit(Channel::Log, None, vec!["dropped".into()]);
        let patch = SettingsPatch::from_json(&json!({"enable": true, "debugLevel": "info"}));
        configure(patch.expect("object"));
        emit(Channel::Log, None, vec!["kept".into()]);
        assert_eq!(handle.texts(), ["0.000  log  kept"]);
    }

    #[test]
    fn nested_emit_is_dropped_instead_of_panicking() {
        let handle = capture();
        with_service(|_| emit(Channel::Error, None, vec!["nested".into()]));
        assert!(handle.is_empty());
    }

    #[test]
    fn threads_have_independent_services() {
        configure(SettingsPatch {
            enabled: Some(true),
            ..SettingsPatch::default()
        });
        let other = std::thread::spawn(|| snapshot().enabled)
            .join()
            .expect("thread finished");
        assert!(snapshot().enabled);
        assert!(!other);
    }
}
