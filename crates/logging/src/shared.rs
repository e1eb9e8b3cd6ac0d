//! crates/logging/src/shared.rs
//! Thread-safe handle around a [`LogService`].

use super::channel::Channel;
use super::clock::{Clock, SystemClock};
use super::config::{Settings, SettingsError, SettingsPatch};
use super::levels::LevelSpec;
use super::location::CallerLocation;
use super::service::LogService;
use super::value::LogValue;
use logging_sink::{ConsoleSink, SplitSink};
use std::io::{Stderr, Stdout};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

/// Cloneable, lock-protected [`LogService`].
///
/// Every call holds the lock for its whole duration, so a leveled call sees
/// one consistent set of settings even while another thread reconfigures
/// the service. A panic on another thread never poisons the logger.
///
/// # Examples
///
/// ```
/// use logging::{LogService, SharedLogService};
/// use logging_sink::CaptureSink;
/// use std::thread;
///
/// let sink = CaptureSink::new();
/// let lines = sink.handle();
/// let shared = SharedLogService::new(LogService::with_sink(sink));
///
/// let worker = shared.clone();
/// thread::spawn(move || worker.error(["from worker"]))
///     .join()
///     .unwrap();
///
/// assert_eq!(lines.len(), 1);
/// ```
pub struct SharedLogService<S = SplitSink<Stdout, Stderr>, C = SystemClock> {
    inner: Arc<Mutex<LogService<S, C>>>,
}

impl<S, C> Clone for SharedLogService<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, C> std::fmt::Debug for SharedLogService<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLogService").finish_non_exhaustive()
    }
}

impl Default for SharedLogService {
    fn default() -> Self {
        Self::new(LogService::new())
    }
}

impl<S: ConsoleSink, C: Clock> SharedLogService<S, C> {
    /// Wraps `service`.
    #[must_use]
    pub fn new(service: LogService<S, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LogService<S, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut LogService<S, C>) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`LogService::error`].
    #[track_caller]
    pub fn error<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Error, CallerLocation::caller(), args);
    }

    /// See [`LogService::warn`].
    #[track_caller]
    pub fn warn<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Warn, CallerLocation::caller(), args);
    }

    /// See [`LogService::info`].
    #[track_caller]
    pub fn info<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Info, CallerLocation::caller(), args);
    }

    /// See [`LogService::log`].
    #[track_caller]
    pub fn log<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Log, CallerLocation::caller(), args);
    }

    /// See [`LogService::log1`].
    #[track_caller]
    pub fn log1<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Log1, CallerLocation::caller(), args);
    }

    /// See [`LogService::log2`].
    #[track_caller]
    pub fn log2<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Log2, CallerLocation::caller(), args);
    }

    /// See [`LogService::rs`].
    #[track_caller]
    pub fn rs<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Rs, CallerLocation::caller(), args);
    }

    /// See [`LogService::dlog`].
    #[track_caller]
    pub fn dlog<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Dlog, CallerLocation::caller(), args);
    }

    /// See [`LogService::yell`].
    #[track_caller]
    pub fn yell<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.emit(Channel::Yell, CallerLocation::caller(), args);
    }

    /// See [`LogService::emit`].
    pub fn emit<I>(&self, channel: Channel, location: Option<CallerLocation>, args: I)
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        self.lock().emit(channel, location, args);
    }

    /// Like [`emit`](Self::emit), but drops the event instead of waiting when
    /// the lock is held. Returns whether the event reached the service.
    pub fn try_emit<I>(&self, channel: Channel, location: Option<CallerLocation>, args: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<LogValue>,
    {
        let mut service = match self.inner.try_lock() {
            Ok(service) => service,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return false,
        };
        service.emit(channel, location, args);
        true
    }

    /// See [`LogService::announce_start`].
    pub fn announce_start(&self) {
        self.lock().announce_start();
    }

    /// See [`LogService::set_enabled`].
    pub fn set_enabled(&self, enabled: bool) {
        self.lock().set_enabled(enabled);
    }

    /// See [`LogService::set_level`].
    pub fn set_level(&self, level: impl Into<LevelSpec>) {
        self.lock().set_level(level);
    }

    /// See [`LogService::apply_settings`].
    pub fn apply_settings(&self, settings: &serde_json::Value) {
        self.lock().apply_settings(settings);
    }

    /// See [`LogService::try_apply_settings`].
    pub fn try_apply_settings(&self, settings: &serde_json::Value) -> Result<(), SettingsError> {
        self.lock().try_apply_settings(settings)
    }

    /// See [`LogService::configure`].
    pub fn configure(&self, patch: SettingsPatch) {
        self.lock().configure(patch);
    }

    /// See [`LogService::snapshot`].
    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.lock().snapshot()
    }

    /// See [`LogService::elapsed`].
    #[must_use]
    pub fn elapsed(&self) -> String {
        self.lock().elapsed()
    }

    /// See [`LogService::reinit_clock`].
    pub fn reinit_clock(&self) -> String {
        self.lock().reinit_clock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use logging_sink::CaptureSink;
    use serde_json::json;
    use std::thread;

    fn shared() -> (SharedLogService<CaptureSink, ManualClock>, logging_sink::CaptureHandle) {
        let sink = CaptureSink::new();
        let handle = sink.handle();
        (
            SharedLogService::new(LogService::with_parts(sink, ManualClock::new())),
            handle,
        )
    }

    #[test]
    fn clones_share_settings() {
        let (first, _) = shared();
        let second = first.clone();
        second.apply_settings(&json!({"enable": true, "debugLevel": "trace"}));
        assert!(first.snapshot().enabled);
    }

    #[test]
    fn try_emit_drops_events_while_locked() {
        let (service, handle) = shared();
        let delivered = service.with(|_locked| service.try_emit(Channel::Error, None, ["nested"]));
        assert!(!delivered);
        assert!(handle.is_empty());

        assert!(service.try_emit(Channel::Error, None, ["later"]));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn survives_a_poisoned_lock() {
        let (service, handle) = shared();
        let poisoner = service.clone();
        let result = thread::spawn(move || {
            poisoner.with::<()>(|_| panic!("poison the lock"));
        })
        .join();
        assert!(result.is_err());

        service.error(["after panic"]);
        assert_eq!(handle.len(), 1);
        assert!(service.try_emit(Channel::Error, None, ["again"]));
    }

    #[test]
    fn concurrent_writers_never_interleave_lines() {
        let (service, handle) = shared();
        service.set_enabled(true);
        service.set_level(4);

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let service = service.clone();
                thread::spawn(move || {
                    for step in 0..25 {
                        service.log2([format!("worker {worker} step {step}")]);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker finished");
        }

        let texts = handle.texts();
        assert_eq!(texts.len(), 100);
        assert!(texts.iter().all(|text| text.starts_with("0.000  log  worker ")));
    }
}
