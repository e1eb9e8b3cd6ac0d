//! crates/logging/src/clock.rs
//! Time sources for the elapsed-time stamp.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Returns the time since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually driven time source.
///
/// Clones share the same reading, so a test can keep one handle while the
/// service owns another.
///
/// # Examples
///
/// ```
/// use logging::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let observer = clock.clone();
/// clock.advance(Duration::from_millis(1_250));
/// assert_eq!(observer.now(), Duration::from_millis(1_250));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current reading.
    pub fn set(&self, now: Duration) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the reading forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.saturating_add(step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Renders an elapsed duration as seconds with exactly three fractional
/// digits. Sub-millisecond precision is truncated.
///
/// # Examples
///
/// ```
/// use logging::format_elapsed;
/// use std::time::Duration;
///
/// assert_eq!(format_elapsed(Duration::ZERO), "0.000");
/// assert_eq!(format_elapsed(Duration::from_millis(2_600)), "2.600");
/// assert_eq!(format_elapsed(Duration::from_micros(61_007_900)), "61.007");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!("{}.{:03}", millis / 1_000, millis % 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_fraction_to_three_digits() {
        assert_eq!(format_elapsed(Duration::from_millis(5)), "0.005");
        assert_eq!(format_elapsed(Duration::from_millis(50)), "0.050");
        assert_eq!(format_elapsed(Duration::from_millis(1_000)), "1.000");
        assert_eq!(format_elapsed(Duration::from_millis(12_345)), "12.345");
    }

    #[test]
    fn manual_clock_set_and_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.set(Duration::from_secs(3));
        clock.advance(Duration::from_millis(7));
        assert_eq!(clock.now(), Duration::from_millis(3_007));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn boxed_clock_delegates() {
        let manual = ManualClock::new();
        manual.set(Duration::from_millis(42));
        let boxed: Box<dyn Clock> = Box::new(manual);
        assert_eq!(boxed.now(), Duration::from_millis(42));
    }
}
