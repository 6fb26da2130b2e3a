use core::time::Duration;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
///
/// Discord IDs share this crate's 42/5/5/12 layout, so generators configured
/// with this epoch produce IDs that decode with Discord's own tooling.
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the system clock, a monotonic ticker,
/// or a mocked time source in tests.
///
/// The unit is **milliseconds since the Unix epoch**. Generators subtract
/// their configured epoch themselves, so one clock can serve generators with
/// different epochs.
///
/// # Example
///
/// ```
/// use snowfall::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(duration_millis)
        .unwrap_or(0)
}

/// Reads `SystemTime::now()` on every call.
///
/// Follows every wall-clock adjustment, including ones that move time
/// backwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        system_millis()
    }
}

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    current: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source anchored to the wall clock at construction.
///
/// This avoids wall-clock adjustments (e.g., NTP steps) after startup while
/// still reporting Unix-epoch milliseconds.
///
/// Internally, the clock spawns a background thread that stores the
/// milliseconds elapsed since construction (measured with `Instant`) in a
/// shared atomic once per millisecond. Reads are a single atomic load plus the
/// offset captured from `SystemTime::now()` at startup. The thread exits once
/// every clone has been dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    offset: u64, // in milliseconds
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Starts a new ticker anchored to the current system time.
    pub fn new() -> Self {
        let offset = system_millis();

        let inner = Arc::new(SharedTickerInner {
            current: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let start = Instant::now();
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);

                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let now_ms = duration_millis(start.elapsed());
                inner_ref.current.store(now_ms, Ordering::Relaxed);

                tick = now_ms + 1;
            }
        });

        let _ = inner._handle.set(handle);

        Self { inner, offset }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.offset + self.inner.current.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_wall_clock() {
        let before = duration_millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap());
        let now = SystemClock.current_millis();
        let after = duration_millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap());
        assert!(before <= now && now <= after);
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let mut last = clock.current_millis();
        for _ in 0..50 {
            thread::sleep(Duration::from_micros(200));
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn monotonic_clock_advances() {
        let clock = MonotonicClock::new();
        let start = clock.current_millis();
        thread::sleep(Duration::from_millis(20));
        assert!(clock.current_millis() > start);
    }

    #[test]
    fn duration_millis_saturates() {
        assert_eq!(duration_millis(Duration::from_millis(42)), 42);
        assert_eq!(duration_millis(Duration::MAX), u64::MAX);
    }
}
