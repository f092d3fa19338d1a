use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

/// The uncorrected local clock.
pub trait SystemClock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// The operating system wall clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemUtc;

impl SystemClock for SystemUtc {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Signed millisecond correction applied to the local clock.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimeOffset(i64);

impl TimeOffset {
    pub const ZERO: TimeOffset = TimeOffset(0);

    #[inline]
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Offset that maps `local` onto `reference`.
    #[inline]
    pub fn between(reference: DateTime<Utc>, local: DateTime<Utc>) -> Self {
        Self((reference - local).num_milliseconds())
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}ms", self.0)
    }
}

/// Corrected wall clock shared by the frame loop and the sync task.
///
/// Clones share the stored offset. The offset starts at zero, is replaced on
/// every successful sync and is never reset on failure: a stale correction is
/// preferred over none.
#[derive(Clone)]
pub struct TimeSource {
    clock: Arc<dyn SystemClock>,
    offset_ms: Arc<AtomicI64>,
    synced: Arc<AtomicBool>,
}

impl TimeSource {
    /// A source backed by the operating system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemUtc)
    }

    pub fn with_clock(clock: impl SystemClock) -> Self {
        Self {
            clock: Arc::new(clock),
            offset_ms: Arc::new(AtomicI64::new(0)),
            synced: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Corrected current instant: `local_now() + offset()`.
    pub fn now(&self) -> DateTime<Utc> {
        let local = self.local_now();
        local
            .checked_add_signed(TimeDelta::milliseconds(self.offset().as_millis()))
            .unwrap_or(local)
    }

    /// Uncorrected local instant.
    #[inline]
    pub fn local_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[inline]
    pub fn offset(&self) -> TimeOffset {
        TimeOffset::from_millis(self.offset_ms.load(Ordering::Relaxed))
    }

    /// True once any sync has succeeded.
    #[inline]
    pub fn is_synced(&self) -> bool {
        self.synced.load(Ordering::Relaxed)
    }

    /// Stores a new correction. Last write wins.
    pub fn apply_offset(&self, offset: TimeOffset) {
        self.offset_ms.store(offset.as_millis(), Ordering::Relaxed);
        self.synced.store(true, Ordering::Relaxed);
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSource")
            .field("offset", &self.offset())
            .field("synced", &self.is_synced())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Manually stepped clock for tests.
    #[derive(Clone)]
    pub struct ManualClock(pub Arc<Mutex<DateTime<Utc>>>);

    impl ManualClock {
        pub fn at(t: DateTime<Utc>) -> Self {
            Self(Arc::new(Mutex::new(t)))
        }

        pub fn advance_ms(&self, ms: i64) {
            let mut t = self.0.lock().unwrap();
            *t += TimeDelta::milliseconds(ms);
        }
    }

    impl SystemClock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }
}
